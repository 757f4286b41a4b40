//! Core Quill tokeniser: converts a program to a `Vec<Op>`.
//!
//! Features:
//! - Single left-to-right pass with at most two characters of lookahead
//! - String literals (`"…"`, `'…'`, `\c`) and number literals with the
//!   `⏨` exponent marker
//! - Argument and variable slots recognised by their code-page range
//! - Spaces and newlines separate literals and emit nothing
//! - Fails fast on the first unrecognised character

use quill_codepage::CodePage;
use quill_types::op::{
    ARGUMENT_SYMBOLS, DIGIT_SYMBOLS, EXPONENT_MARKER, GET_VARIABLE_SYMBOLS, SET_VARIABLE_SYMBOLS,
};
use quill_types::{Op, QuillError, Result};
use tracing::debug;

/// Tokenise a whole program against a code page.
pub fn tokenise(code: &str, code_page: &CodePage) -> Result<Vec<Op>> {
    Tokeniser::new(code, code_page).tokenise()
}

/// The Quill tokeniser.
pub struct Tokeniser<'src> {
    /// Program text, one entry per character.
    source: Vec<char>,
    /// Code page used to classify the reserved ranges.
    code_page: &'src CodePage,
    /// Current character offset into `source`.
    pos: usize,
}

impl<'src> Tokeniser<'src> {
    /// Create a tokeniser over the given program text.
    pub fn new(code: &str, code_page: &'src CodePage) -> Self {
        Self {
            source: code.chars().collect(),
            code_page,
            pos: 0,
        }
    }

    /// Scan the entire program.
    pub fn tokenise(mut self) -> Result<Vec<Op>> {
        let mut ops = Vec::new();
        while let Some(op) = self.scan_next()? {
            ops.push(op);
        }
        debug!(chars = self.source.len(), ops = ops.len(), "tokenised program");
        Ok(ops)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn peek_is_digit(&self, offset: usize) -> bool {
        self.peek_at(offset).is_some_and(|c| c.is_ascii_digit())
    }

    // ─────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────

    /// Scan one operation, or `None` at end of input.
    fn scan_next(&mut self) -> Result<Option<Op>> {
        loop {
            let start = self.pos;
            let Some(ch) = self.advance() else {
                return Ok(None);
            };

            let op = match ch {
                // ── Separators ──
                ' ' | '\n' => continue,

                // ── String literals ──
                '\\' => self.scan_escape(start)?,
                '"' | '\'' => self.scan_string(ch),

                // ── Number literals ──
                '0' => Op::Number(0.0),
                '1'..='9' | '.' | EXPONENT_MARKER => self.scan_number(ch, start)?,

                _ => self.scan_symbol(ch, start)?,
            };
            return Ok(Some(op));
        }
    }

    /// Classify a character that is neither a literal nor a separator.
    fn scan_symbol(&self, ch: char, start: usize) -> Result<Op> {
        if let Some(digit) = self.range_offset(ch, &DIGIT_SYMBOLS) {
            return Ok(Op::Number(f64::from(digit)));
        }
        if let Some(slot) = self.range_offset(ch, &ARGUMENT_SYMBOLS) {
            return Ok(Op::Argument(slot));
        }
        if let Some(slot) = self.range_offset(ch, &GET_VARIABLE_SYMBOLS) {
            return Ok(Op::GetVariable(slot));
        }
        if let Some(slot) = self.range_offset(ch, &SET_VARIABLE_SYMBOLS) {
            return Ok(Op::SetVariable(slot));
        }
        if self.code_page.exists(ch) {
            if let Some(op) = Op::from_symbol(ch) {
                return Ok(op);
            }
        }
        Err(QuillError::UnrecognisedToken { ch, offset: start })
    }

    /// Position of `ch` inside a reserved range of ten consecutive
    /// code-page slots starting at `range[0]`.
    fn range_offset(&self, ch: char, range: &[char; 10]) -> Option<u8> {
        let first = self.code_page.index_of(range[0]).ok()?;
        let index = self.code_page.index_of(ch).ok()?;
        let offset = index.checked_sub(first)?;
        (usize::from(offset) < range.len() && range[usize::from(offset)] == ch)
            .then_some(offset)
    }

    // ─────────────────────────────────────────────────────────────
    // String literals
    // ─────────────────────────────────────────────────────────────

    /// `\c`: a one-character string.
    fn scan_escape(&mut self, start: usize) -> Result<Op> {
        match self.advance() {
            Some(ch) => Ok(Op::String(ch.to_string())),
            None => Err(QuillError::DanglingEscape { offset: start }),
        }
    }

    /// Scan a quoted string after its opening delimiter. `\<delimiter>`
    /// stands for the delimiter itself; an unterminated string is empty.
    fn scan_string(&mut self, delimiter: char) -> Op {
        let mut buf = String::new();
        loop {
            match self.advance() {
                None => return Op::String(String::new()),
                Some('\\') if self.peek() == Some(delimiter) => {
                    self.advance();
                    buf.push(delimiter);
                }
                Some(ch) if ch == delimiter => return Op::String(buf),
                Some(ch) => buf.push(ch),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    /// Scan `(\d+(\.\d+)?|\.\d+)(⏨-?\d*)?` or `⏨-?\d*`; `first` is already
    /// consumed. The marker reads as `e`, with `1` filled in for a missing
    /// mantissa or exponent.
    fn scan_number(&mut self, first: char, start: usize) -> Result<Op> {
        let mut text = String::new();

        match first {
            EXPONENT_MARKER => {
                text.push('1');
                self.scan_exponent(&mut text);
            }
            '.' => {
                if !self.peek_is_digit(0) {
                    return Err(QuillError::UnrecognisedToken { ch: '.', offset: start });
                }
                text.push_str("0.");
                self.scan_digits(&mut text);
                self.scan_optional_exponent(&mut text);
            }
            digit => {
                text.push(digit);
                self.scan_digits(&mut text);
                if self.peek() == Some('.') && self.peek_is_digit(1) {
                    self.advance();
                    text.push('.');
                    self.scan_digits(&mut text);
                }
                self.scan_optional_exponent(&mut text);
            }
        }

        text.parse::<f64>()
            .map(Op::Number)
            .map_err(|_| QuillError::UnrecognisedToken { ch: first, offset: start })
    }

    fn scan_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            self.advance();
            text.push(ch);
        }
    }

    fn scan_optional_exponent(&mut self, text: &mut String) {
        if self.peek() == Some(EXPONENT_MARKER) {
            self.advance();
            self.scan_exponent(text);
        }
    }

    /// Exponent after a consumed marker: optional `-`, then digits
    /// (defaulting to `1`).
    fn scan_exponent(&mut self, text: &mut String) {
        text.push('e');
        if self.peek() == Some('-') {
            self.advance();
            text.push('-');
        }
        let before = text.len();
        self.scan_digits(text);
        if text.len() == before {
            text.push('1');
        }
    }
}
