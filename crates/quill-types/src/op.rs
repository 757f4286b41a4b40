//! Operation nodes.
//!
//! The tokeniser turns a program into a flat `Vec<Op>`. Every operation
//! has a fixed [`arity`](Op::arity): the number of following
//! sub-expressions it consumes. Because arity never depends on operand
//! values, the flat list can be read as a prefix-order tree.

use crate::value::format_number;
use std::fmt;

/// Superscript digits: `⁰`–`⁹` read program arguments.
pub const ARGUMENT_SYMBOLS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
/// Circled digits: `⓪`–`⑨` read variable slots.
pub const GET_VARIABLE_SYMBOLS: [char; 10] = ['⓪', '①', '②', '③', '④', '⑤', '⑥', '⑦', '⑧', '⑨'];
/// Negative circled digits: `⓿`–`❾` write variable slots.
pub const SET_VARIABLE_SYMBOLS: [char; 10] = ['⓿', '❶', '❷', '❸', '❹', '❺', '❻', '❼', '❽', '❾'];
/// Subscript digits: `₀`–`₉` are single-digit number literals.
pub const DIGIT_SYMBOLS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
/// Scientific-notation marker inside number literals.
pub const EXPONENT_MARKER: char = '⏨';

/// Every operation in the Quill language.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ── Literals & nullary reads ─────────────────────────────

    /// Number literal: `42`, `.5`, `3⏨2`, `₇`
    Number(f64),
    /// String literal: `"ab"`, `'ab'`, `\a`
    String(String),
    /// `⁰`…`⁹`
    Argument(u8),
    /// `⓪`…`⑨`
    GetVariable(u8),
    /// `α`
    ArgumentArray,
    /// `φ`
    FilterValue,
    /// `ψ`
    MapValue,

    // ── Unary ────────────────────────────────────────────────

    /// `⓿`…`❾`
    SetVariable(u8),
    /// `¡`
    Truthify,
    /// `¬`
    Untruthify,
    /// `r`
    Range,
    /// `R`
    ReverseRange,
    /// `ṙ`
    RangeFrom1,
    /// `Ṙ`
    ReverseRangeFrom1,
    /// `½`
    Halve,
    /// `_`
    Negate,
    /// `A`
    Absolute,
    /// `→`
    Increment,
    /// `←`
    Decrement,
    /// `l`
    Length,
    /// `u`
    Reverse,
    /// `h`
    Head,
    /// `t`
    Tail,
    /// `w`
    Wrap,
    /// `C`
    Chars,
    /// `N`
    ToNumber,
    /// `S`
    ToString,
    /// `o`
    Sort,
    /// `Σ`
    Sum,
    /// `↑`
    Uppercase,
    /// `↓`
    Lowercase,
    /// `p`
    IsPrime,
    /// `P`
    PrimeFactors,
    /// `π`
    NthPrime,
    /// `?`
    Random,
    /// `X`
    Shuffle,
    /// `€`
    Each,
    /// `O`
    Ordinal,
    /// `Ö`
    FromBase256,
    /// `Ð`
    Decompress,

    // ── Binary ───────────────────────────────────────────────

    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Division,
    /// `%`
    Modulo,
    /// `^`
    Power,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`
    Equal,
    /// `≠`
    NotEqual,
    /// `&`
    And,
    /// `|`
    Or,
    /// `$`
    Interpolate,
    /// `,`
    Pair,
    /// `i`
    Index,
    /// `j`
    Join,
    /// `s`
    Split,
    /// `Φ`
    Filter,
    /// `Ψ`
    Map,
}

impl Op {
    /// Look up a single-character operation. Literals and the digit
    /// ranges are recognised by the tokeniser itself, not here.
    pub fn from_symbol(ch: char) -> Option<Op> {
        Some(match ch {
            'α' => Op::ArgumentArray,
            'φ' => Op::FilterValue,
            'ψ' => Op::MapValue,

            '¡' => Op::Truthify,
            '¬' => Op::Untruthify,
            'r' => Op::Range,
            'R' => Op::ReverseRange,
            'ṙ' => Op::RangeFrom1,
            'Ṙ' => Op::ReverseRangeFrom1,
            '½' => Op::Halve,
            '_' => Op::Negate,
            'A' => Op::Absolute,
            '→' => Op::Increment,
            '←' => Op::Decrement,
            'l' => Op::Length,
            'u' => Op::Reverse,
            'h' => Op::Head,
            't' => Op::Tail,
            'w' => Op::Wrap,
            'C' => Op::Chars,
            'N' => Op::ToNumber,
            'S' => Op::ToString,
            'o' => Op::Sort,
            'Σ' => Op::Sum,
            '↑' => Op::Uppercase,
            '↓' => Op::Lowercase,
            'p' => Op::IsPrime,
            'P' => Op::PrimeFactors,
            'π' => Op::NthPrime,
            '?' => Op::Random,
            'X' => Op::Shuffle,
            '€' => Op::Each,
            'O' => Op::Ordinal,
            'Ö' => Op::FromBase256,
            'Ð' => Op::Decompress,

            '+' => Op::Add,
            '-' => Op::Subtract,
            '*' => Op::Multiply,
            '/' => Op::Division,
            '%' => Op::Modulo,
            '^' => Op::Power,
            '<' => Op::Less,
            '>' => Op::Greater,
            '=' => Op::Equal,
            '≠' => Op::NotEqual,
            '&' => Op::And,
            '|' => Op::Or,
            '$' => Op::Interpolate,
            ',' => Op::Pair,
            'i' => Op::Index,
            'j' => Op::Join,
            's' => Op::Split,
            'Φ' => Op::Filter,
            'Ψ' => Op::Map,
            _ => return None,
        })
    }

    /// Number of sub-expressions this operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Number(_)
            | Op::String(_)
            | Op::Argument(_)
            | Op::GetVariable(_)
            | Op::ArgumentArray
            | Op::FilterValue
            | Op::MapValue => 0,

            Op::Add
            | Op::Subtract
            | Op::Multiply
            | Op::Division
            | Op::Modulo
            | Op::Power
            | Op::Less
            | Op::Greater
            | Op::Equal
            | Op::NotEqual
            | Op::And
            | Op::Or
            | Op::Interpolate
            | Op::Pair
            | Op::Index
            | Op::Join
            | Op::Split
            | Op::Filter
            | Op::Map => 2,

            _ => 1,
        }
    }

    /// The code-page character this operation is written with. Literals
    /// report the character that introduces them.
    pub fn symbol(&self) -> char {
        match self {
            Op::Number(_) => '0',
            Op::String(_) => '"',
            Op::Argument(i) => ARGUMENT_SYMBOLS[usize::from(*i)],
            Op::GetVariable(i) => GET_VARIABLE_SYMBOLS[usize::from(*i)],
            Op::SetVariable(i) => SET_VARIABLE_SYMBOLS[usize::from(*i)],
            Op::ArgumentArray => 'α',
            Op::FilterValue => 'φ',
            Op::MapValue => 'ψ',
            Op::Truthify => '¡',
            Op::Untruthify => '¬',
            Op::Range => 'r',
            Op::ReverseRange => 'R',
            Op::RangeFrom1 => 'ṙ',
            Op::ReverseRangeFrom1 => 'Ṙ',
            Op::Halve => '½',
            Op::Negate => '_',
            Op::Absolute => 'A',
            Op::Increment => '→',
            Op::Decrement => '←',
            Op::Length => 'l',
            Op::Reverse => 'u',
            Op::Head => 'h',
            Op::Tail => 't',
            Op::Wrap => 'w',
            Op::Chars => 'C',
            Op::ToNumber => 'N',
            Op::ToString => 'S',
            Op::Sort => 'o',
            Op::Sum => 'Σ',
            Op::Uppercase => '↑',
            Op::Lowercase => '↓',
            Op::IsPrime => 'p',
            Op::PrimeFactors => 'P',
            Op::NthPrime => 'π',
            Op::Random => '?',
            Op::Shuffle => 'X',
            Op::Each => '€',
            Op::Ordinal => 'O',
            Op::FromBase256 => 'Ö',
            Op::Decompress => 'Ð',
            Op::Add => '+',
            Op::Subtract => '-',
            Op::Multiply => '*',
            Op::Division => '/',
            Op::Modulo => '%',
            Op::Power => '^',
            Op::Less => '<',
            Op::Greater => '>',
            Op::Equal => '=',
            Op::NotEqual => '≠',
            Op::And => '&',
            Op::Or => '|',
            Op::Interpolate => '$',
            Op::Pair => ',',
            Op::Index => 'i',
            Op::Join => 'j',
            Op::Split => 's',
            Op::Filter => 'Φ',
            Op::Map => 'Ψ',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Number(n) => f.write_str(&format_number(*n)),
            Op::String(s) => write!(f, "\"{s}\""),
            other => write!(f, "{}", other.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trips_through_table() {
        for ch in "αφψ¡¬rRṙṘ½_A→←luhtwCNSoΣ↑↓pPπ?X€OÖÐ+-*/%^<>=≠&|$,ijsΦΨ".chars() {
            let op = Op::from_symbol(ch).unwrap_or_else(|| panic!("no op for '{ch}'"));
            assert_eq!(op.symbol(), ch);
        }
    }

    #[test]
    fn test_arity_classes() {
        assert_eq!(Op::Number(1.0).arity(), 0);
        assert_eq!(Op::Argument(3).arity(), 0);
        assert_eq!(Op::SetVariable(0).arity(), 1);
        assert_eq!(Op::Reverse.arity(), 1);
        assert_eq!(Op::Filter.arity(), 2);
        assert_eq!(Op::And.arity(), 2);
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(Op::from_symbol('!'), None);
        assert_eq!(Op::from_symbol('0'), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Op::Number(2.5).to_string(), "2.5");
        assert_eq!(Op::String("ab".into()).to_string(), "\"ab\"");
        assert_eq!(Op::Argument(2).to_string(), "²");
    }
}
