//! Literal advisor: alternative spellings of an integer literal.
//!
//! Purely informational. Every spelling it proposes tokenises and
//! evaluates back to the requested number.

use quill_codepage::{CodePage, COMPRESSION_BASE};
use quill_types::op::EXPONENT_MARKER;
use serde::Serialize;

/// How a number is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodingKind {
    /// Decimal digits.
    Plain,
    /// `O\c`: the code-page index of one character.
    SingleCodePoint,
    /// `Ö"hl"`: two characters as base-256 digits.
    DoubleCodePoint,
    /// `Ð"…"`: base-254 digits.
    Compressed,
    /// `m⏨k`
    Exponent,
}

/// One spelling and its size in code-page bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub kind: EncodingKind,
    pub text: String,
    pub length: usize,
}

impl Encoding {
    fn new(kind: EncodingKind, text: String) -> Self {
        let length = text.chars().count();
        Self { kind, text, length }
    }
}

/// All applicable spellings of `n`, plain first.
pub fn advise(n: u64, code_page: &CodePage) -> Vec<Encoding> {
    let mut encodings = vec![Encoding::new(EncodingKind::Plain, n.to_string())];
    encodings.extend(single_code_point(n, code_page));
    encodings.extend(double_code_point(n, code_page));
    encodings.extend(compressed(n, code_page));
    encodings.extend(exponent(n));
    encodings
}

/// The shortest spelling.
pub fn shortest(n: u64, code_page: &CodePage) -> Encoding {
    let mut all = advise(n, code_page);
    all.sort_by_key(|e| e.length);
    // Plain is always present
    all.swap_remove(0)
}

fn single_code_point(n: u64, code_page: &CodePage) -> Option<Encoding> {
    let index = usize::try_from(n).ok().filter(|&i| i < 256)?;
    let ch = code_page.char_at(index).ok()?;
    Some(Encoding::new(EncodingKind::SingleCodePoint, format!("O\\{ch}")))
}

fn double_code_point(n: u64, code_page: &CodePage) -> Option<Encoding> {
    if !(256..65536).contains(&n) {
        return None;
    }
    let high = code_page.char_at((n / 256) as usize).ok()?;
    let low = code_page.char_at((n % 256) as usize).ok()?;
    if [high, low].iter().any(|c| matches!(c, '"' | '\\')) {
        return None;
    }
    Some(Encoding::new(
        EncodingKind::DoubleCodePoint,
        format!("Ö\"{high}{low}\""),
    ))
}

fn compressed(n: u64, code_page: &CodePage) -> Option<Encoding> {
    if n == 0 {
        return None;
    }
    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        digits.push(code_page.compressed_char(rest % COMPRESSION_BASE).ok()?);
        rest /= COMPRESSION_BASE;
    }
    let body: String = digits.into_iter().rev().collect();
    Some(Encoding::new(EncodingKind::Compressed, format!("Ð\"{body}\"")))
}

fn exponent(n: u64) -> Option<Encoding> {
    if n < 10 || n % 10 != 0 {
        return None;
    }
    let mut mantissa = n;
    let mut power = 0;
    while mantissa % 10 == 0 {
        mantissa /= 10;
        power += 1;
    }
    let mantissa = if mantissa == 1 { String::new() } else { mantissa.to_string() };
    let power = if power == 1 { String::new() } else { power.to_string() };
    Some(Encoding::new(
        EncodingKind::Exponent,
        format!("{mantissa}{EXPONENT_MARKER}{power}"),
    ))
}
