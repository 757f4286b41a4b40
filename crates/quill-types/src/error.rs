use crate::ValueKind;
use thiserror::Error;

/// Every failure the interpreter can raise.
///
/// All variants are terminal for the current run: they propagate to the
/// host, which reports the message next to any results already produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuillError {
    // ── Tokeniser ──
    /// A character that is neither syntax nor a known operation.
    #[error("unrecognised token '{ch}' at offset {offset}")]
    UnrecognisedToken { ch: char, offset: usize },

    /// `\` as the very last character of the program.
    #[error("escape at offset {offset} has no character to escape")]
    DanglingEscape { offset: usize },

    // ── Code page ──
    /// The character is not part of the code page.
    #[error("character '{0}' is not in the code page")]
    UnknownToken(char),

    /// Code-page index outside the table.
    #[error("code page index {0} is out of range")]
    InvalidIndex(usize),

    /// No character is registered under this mnemonic.
    #[error("unknown combination '{0}'")]
    UnknownCombination(String),

    /// The code-page resource could not be loaded.
    #[error("invalid code page: {0}")]
    InvalidCodePage(String),

    // ── Evaluation ──
    /// An operator received a variant combination it does not support.
    #[error("invalid argument types for '{symbol}': {}", join_kinds(.kinds))]
    InvalidArgumentTypes { symbol: char, kinds: Vec<ValueKind> },

    /// Division, modulo or splitting by zero.
    #[error("division by zero in '{symbol}'")]
    DivisionByZero { symbol: char },

    // ── Argument reader ──
    /// A `]` with no open `[`.
    #[error("unmatched ']' in arguments")]
    UnmatchedBracket,

    /// Input ended while a `[` was still open.
    #[error("unclosed '[' in arguments")]
    UnmatchedOpenBracket,

    /// Generic run fault.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl QuillError {
    /// Type error for a unary operator.
    pub fn unary_types(symbol: char, operand: ValueKind) -> Self {
        Self::InvalidArgumentTypes {
            symbol,
            kinds: vec![operand],
        }
    }

    /// Type error for a binary operator, operands in evaluation order.
    pub fn binary_types(symbol: char, left: ValueKind, right: ValueKind) -> Self {
        Self::InvalidArgumentTypes {
            symbol,
            kinds: vec![left, right],
        }
    }
}

fn join_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ValueKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
