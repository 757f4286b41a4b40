//! Runtime values.
//!
//! A [`Value`] is one of three immutable variants. String and Array values
//! additionally carry the `each` flag: when set, vectorising operators map
//! over the value's [projection](Value::projection) instead of treating it
//! as one unit.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Largest magnitude rendered as a plain integer.
const INTEGER_RENDER_LIMIT: f64 = 1e16;

/// The runtime value of a Quill expression.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed decimal number. Integrality is derived, not a separate variant.
    Number(f64),
    /// Sequence of code-page characters.
    String { text: String, each: bool },
    /// Ordered, heterogeneous sequence of values.
    Array { items: Vec<Value>, each: bool },
}

/// The broad category of a [`Value`], used in error messages and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ValueKind {
    Numeric,
    String,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::String => write!(f, "String"),
            Self::Array => write!(f, "Array"),
        }
    }
}

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String {
            text: text.into(),
            each: false,
        }
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array {
            items: items.into_iter().collect(),
            each: false,
        }
    }

    /// `1` for true, `0` for false.
    pub fn boolean(b: bool) -> Self {
        Value::Number(if b { 1.0 } else { 0.0 })
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Numeric,
            Value::String { .. } => ValueKind::String,
            Value::Array { .. } => ValueKind::Array,
        }
    }

    /// Nonzero numbers and non-empty sequences are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::String { text, .. } => !text.is_empty(),
            Value::Array { items, .. } => !items.is_empty(),
        }
    }

    /// Whether this value asked to be mapped over by vectorising operators.
    pub fn is_each(&self) -> bool {
        match self {
            Value::Number(_) => false,
            Value::String { each, .. } | Value::Array { each, .. } => *each,
        }
    }

    /// Copy of this value with the `each` flag set. Numbers are unchanged.
    pub fn into_each(self) -> Self {
        match self {
            Value::Number(n) => Value::Number(n),
            Value::String { text, .. } => Value::String { text, each: true },
            Value::Array { items, .. } => Value::Array { items, each: true },
        }
    }

    /// The per-element decomposition used when mapping over this value:
    /// a number yields itself, a string its single-character strings,
    /// an array its items.
    pub fn projection(&self) -> Vec<Value> {
        match self {
            Value::Number(n) => vec![Value::Number(*n)],
            Value::String { text, .. } => text.chars().map(|c| Value::string(c)).collect(),
            Value::Array { items, .. } => items.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Whether this is a number with no fractional part.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_finite() && n.fract() == 0.0)
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String { text, .. } => write!(f, "\"{text}\""),
            other => write!(f, "{other}"),
        }
    }
}

/// Canonical rendering of a number: integral values without a fraction,
/// everything else in shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < INTEGER_RENDER_LIMIT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Parse text matching `-?\d+(\.\d+)?([eE]-?\d+)?` in full.
pub fn parse_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let whole = count_digits(&bytes[i..]);
    if whole == 0 {
        return None;
    }
    i += whole;

    if bytes.get(i) == Some(&b'.') {
        let fraction = count_digits(&bytes[i + 1..]);
        if fraction == 0 {
            return None;
        }
        i += 1 + fraction;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if bytes.get(i) == Some(&b'-') {
            i += 1;
        }
        let exponent = count_digits(&bytes[i..]);
        if exponent == 0 {
            return None;
        }
        i += exponent;
    }

    if i == bytes.len() {
        text.parse().ok()
    } else {
        None
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String { text, .. } => f.write_str(text),
            Value::Array { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Deep, order-sensitive equality. The `each` flag is not part of a
/// value's identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String { text: a, .. }, Value::String { text: b, .. }) => a == b,
            (Value::Array { items: a, .. }, Value::Array { items: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < INTEGER_RENDER_LIMIT => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String { text, .. } => serializer.serialize_str(text),
            Value::Array { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::number(-2.0).is_truthy());
        assert!(!Value::number(0.0).is_truthy());
        assert!(Value::string("a").is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::array([Value::number(0.0)]).is_truthy());
        assert!(!Value::array([]).is_truthy());
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(Value::number(3.0).to_string(), "3");
        assert_eq!(Value::number(-12.0).to_string(), "-12");
        assert_eq!(Value::number(2.5).to_string(), "2.5");
        assert_eq!(Value::number(-0.0).to_string(), "0");
    }

    #[test]
    fn test_array_rendering_quotes_nested_strings() {
        let v = Value::array([
            Value::number(1.0),
            Value::string("ab"),
            Value::array([Value::number(2.0)]),
        ]);
        assert_eq!(v.to_string(), "[1 \"ab\" [2]]");
    }

    #[test]
    fn test_projection_of_string_is_characters() {
        let p = Value::string("ab").projection();
        assert_eq!(p, vec![Value::string("a"), Value::string("b")]);
    }

    #[test]
    fn test_equality_ignores_each_flag() {
        let plain = Value::array([Value::number(1.0)]);
        let flagged = plain.clone().into_each();
        assert!(flagged.is_each());
        assert_eq!(plain, flagged);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = Value::array([Value::number(1.0), Value::number(2.0)]);
        let b = Value::array([Value::number(2.0), Value::number(1.0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_mixed_kinds_are_unequal() {
        assert_ne!(Value::number(1.0), Value::string("1"));
    }

    #[test]
    fn test_parse_number_grammar() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("2e3"), Some(2000.0));
        assert_eq!(parse_number("2E-1"), Some(0.2));
        assert_eq!(parse_number(".5"), None);
        assert_eq!(parse_number("1."), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("12ab"), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn test_json_serialization() {
        let v = Value::array([Value::number(1.0), Value::number(0.5), Value::string("x")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1,0.5,\"x\"]");
    }
}
