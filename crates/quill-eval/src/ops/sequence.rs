//! String and array manipulation.

use super::compare::ordering;
use super::{count, same_shape, sequence_len};
use quill_types::value::format_number;
use quill_types::{QuillError, Result, Value};
use std::cmp::Ordering;

// ══════════════════════════════════════════════════════════════════════
// Ranges
// ══════════════════════════════════════════════════════════════════════

/// Length of the range an operand describes: `floor(n)` for a number,
/// the element count for a sequence.
fn range_len(symbol: char, value: &Value) -> Result<usize> {
    match value {
        Value::Number(n) => sequence_len(symbol, *n),
        seq => Ok(seq.projection().len()),
    }
}

fn numbers(iter: impl Iterator<Item = usize>) -> Value {
    Value::array(iter.map(|i| Value::number(i as f64)))
}

/// `r`: `[0 … n-1]`.
pub fn range(value: &Value) -> Result<Value> {
    Ok(numbers(0..range_len('r', value)?))
}

/// `R`: `[n-1 … 0]`.
pub fn reverse_range(value: &Value) -> Result<Value> {
    Ok(numbers((0..range_len('R', value)?).rev()))
}

/// `ṙ`: `[1 … n]`.
pub fn range_from_1(value: &Value) -> Result<Value> {
    Ok(numbers(1..=range_len('ṙ', value)?))
}

/// `Ṙ`: `[n … 1]`.
pub fn reverse_range_from_1(value: &Value) -> Result<Value> {
    Ok(numbers((1..=range_len('Ṙ', value)?).rev()))
}

// ══════════════════════════════════════════════════════════════════════
// Unary
// ══════════════════════════════════════════════════════════════════════

/// `l`: characters, elements, or the length of a number's rendering.
pub fn length(value: &Value) -> Value {
    let len = match value {
        Value::Number(n) => format_number(*n).chars().count(),
        Value::String { text, .. } => text.chars().count(),
        Value::Array { items, .. } => items.len(),
    };
    Value::number(len as f64)
}

/// `u`: reversal. A number has its digits reversed and keeps its sign.
pub fn reverse(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) => {
            let digits: String = format_number(n.abs()).chars().rev().collect();
            let magnitude: f64 = digits
                .parse()
                .map_err(|_| QuillError::Runtime(format!("cannot reverse {}", format_number(*n))))?;
            Ok(Value::number(if *n < 0.0 { -magnitude } else { magnitude }))
        }
        seq => {
            let mut items = seq.projection();
            items.reverse();
            Ok(same_shape(seq, items))
        }
    }
}

fn first_or_last(symbol: char, value: &Value, last: bool) -> Result<Value> {
    if let Value::Number(_) = value {
        return Err(QuillError::unary_types(symbol, value.kind()));
    }
    let items = value.projection();
    let picked = if last { items.last() } else { items.first() };
    picked
        .cloned()
        .ok_or_else(|| QuillError::Runtime(format!("'{symbol}' of an empty sequence")))
}

/// `h`: first element or character.
pub fn head(value: &Value) -> Result<Value> {
    first_or_last('h', value, false)
}

/// `t`: last element or character.
pub fn tail(value: &Value) -> Result<Value> {
    first_or_last('t', value, true)
}

/// `w`
pub fn wrap(value: &Value) -> Value {
    Value::array([value.clone()])
}

/// `C`
pub fn chars(value: &Value) -> Value {
    Value::array(value.projection())
}

/// `o`: ascending under the ordering of `<`. Strings sort their
/// characters; a number sorts the digits of its rendering.
pub fn sort(value: &Value) -> Result<Value> {
    let mut items = match value {
        Value::Number(n) => Value::string(format_number(*n)).projection(),
        seq => seq.projection(),
    };

    let mut failure = None;
    items.sort_by(|a, b| match ordering('o', a, b) {
        Ok(order) => order,
        Err(e) => {
            failure.get_or_insert(e);
            Ordering::Equal
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    match value {
        Value::Number(_) => super::convert::to_number(&same_shape(&Value::string(""), items)),
        seq => Ok(same_shape(seq, items)),
    }
}

/// `Σ`: `+` folded over the elements (0 when empty). A number sums the
/// digits of its rendering.
pub fn sum(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) => Ok(Value::number(
            format_number(*n)
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(f64::from)
                .sum(),
        )),
        seq => {
            let mut items = seq.projection().into_iter();
            let Some(first) = items.next() else {
                return Ok(Value::number(0.0));
            };
            items.try_fold(first, |acc, item| super::arith::add(&acc, &item))
        }
    }
}

// ══════════════════════════════════════════════════════════════════════
// Binary
// ══════════════════════════════════════════════════════════════════════

/// `,`
pub fn pair(left: &Value, right: &Value) -> Value {
    Value::array([left.clone(), right.clone()])
}

/// `i`: element at a wrapped index; either operand order.
pub fn index(left: &Value, right: &Value) -> Result<Value> {
    let (seq, n) = match (left, right) {
        (Value::Number(n), seq @ (Value::String { .. } | Value::Array { .. }))
        | (seq @ (Value::String { .. } | Value::Array { .. }), Value::Number(n)) => (seq, *n),
        (a, b) => return Err(QuillError::binary_types('i', a.kind(), b.kind())),
    };
    let items = seq.projection();
    if items.is_empty() {
        return Err(QuillError::Runtime("'i' into an empty sequence".into()));
    }
    let len = items.len() as f64;
    let at = n.floor().rem_euclid(len) as usize;
    Ok(items[at.min(items.len() - 1)].clone())
}

/// `j`: elements rendered and joined with the rendered separator.
pub fn join(left: &Value, separator: &Value) -> Result<Value> {
    match left {
        Value::Number(_) => Err(QuillError::binary_types('j', left.kind(), separator.kind())),
        seq => {
            let sep = separator.to_string();
            let parts: Vec<String> = seq.projection().iter().map(Value::to_string).collect();
            Ok(Value::string(parts.join(&sep)))
        }
    }
}

/// `s`: a string split on a separator string (characters if the
/// separator is empty), or a sequence cut into chunks of `n`.
pub fn split(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::String { text, .. }, Value::String { text: sep, .. }) => {
            if sep.is_empty() {
                Ok(chars(left))
            } else {
                Ok(Value::array(text.split(sep.as_str()).map(Value::string)))
            }
        }
        (seq @ (Value::String { .. } | Value::Array { .. }), Value::Number(n))
        | (Value::Number(n), seq @ (Value::String { .. } | Value::Array { .. })) => {
            let size = count(*n);
            if size == 0 {
                return Err(QuillError::Runtime(format!(
                    "'s' chunk size must be at least 1, got {}",
                    format_number(*n)
                )));
            }
            let items = seq.projection();
            Ok(Value::array(
                items.chunks(size).map(|chunk| same_shape(seq, chunk.to_vec())),
            ))
        }
        (a, b) => Err(QuillError::binary_types('s', a.kind(), b.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::MAX_SEQUENCE_LEN;

    fn nums(xs: &[f64]) -> Value {
        Value::array(xs.iter().map(|&x| Value::number(x)))
    }

    #[test]
    fn test_ranges() {
        let three = Value::number(3.0);
        assert_eq!(range(&three).unwrap(), nums(&[0.0, 1.0, 2.0]));
        assert_eq!(reverse_range(&three).unwrap(), nums(&[2.0, 1.0, 0.0]));
        assert_eq!(range_from_1(&three).unwrap(), nums(&[1.0, 2.0, 3.0]));
        assert_eq!(reverse_range_from_1(&three).unwrap(), nums(&[3.0, 2.0, 1.0]));
        assert_eq!(range(&Value::string("ab")).unwrap(), nums(&[0.0, 1.0]));
        assert_eq!(range(&Value::number(-4.0)).unwrap(), nums(&[]));
    }

    #[test]
    fn test_oversized_range_fails_before_allocating() {
        for huge in [1e18, f64::INFINITY, (MAX_SEQUENCE_LEN + 1) as f64] {
            assert!(matches!(range(&Value::number(huge)), Err(QuillError::Runtime(_))));
            assert!(matches!(
                reverse_range_from_1(&Value::number(huge)),
                Err(QuillError::Runtime(_))
            ));
        }
    }

    #[test]
    fn test_reverse_number_keeps_sign() {
        assert_eq!(reverse(&Value::number(-120.0)).unwrap(), Value::number(-21.0));
        assert_eq!(reverse(&Value::string("abc")).unwrap(), Value::string("cba"));
    }

    #[test]
    fn test_head_and_tail() {
        let text = Value::string("xyz");
        assert_eq!(head(&text).unwrap(), Value::string("x"));
        assert_eq!(tail(&text).unwrap(), Value::string("z"));
        assert!(matches!(head(&Value::array([])), Err(QuillError::Runtime(_))));
    }

    #[test]
    fn test_sort_strings_and_arrays() {
        assert_eq!(sort(&Value::string("cab")).unwrap(), Value::string("abc"));
        assert_eq!(sort(&nums(&[3.0, 1.0, 2.0])).unwrap(), nums(&[1.0, 2.0, 3.0]));
        assert_eq!(sort(&Value::number(3142.0)).unwrap(), Value::number(1234.0));
        assert!(sort(&Value::array([Value::number(1.0), Value::string("a")])).is_err());
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&nums(&[1.0, 2.0, 3.0])).unwrap(), Value::number(6.0));
        assert_eq!(sum(&nums(&[])).unwrap(), Value::number(0.0));
        assert_eq!(sum(&Value::number(-405.0)).unwrap(), Value::number(9.0));
    }

    #[test]
    fn test_index_wraps_both_ways() {
        let text = Value::string("abc");
        assert_eq!(index(&text, &Value::number(4.0)).unwrap(), Value::string("b"));
        assert_eq!(index(&Value::number(-1.0), &text).unwrap(), Value::string("c"));
        assert!(index(&Value::string(""), &Value::number(0.0)).is_err());
    }

    #[test]
    fn test_join_and_split() {
        assert_eq!(
            join(&nums(&[1.0, 2.0]), &Value::string("-")).unwrap(),
            Value::string("1-2")
        );
        assert_eq!(
            split(&Value::string("a,b"), &Value::string(",")).unwrap(),
            Value::array([Value::string("a"), Value::string("b")])
        );
        assert_eq!(
            split(&Value::string("abcde"), &Value::number(2.0)).unwrap(),
            Value::array([Value::string("ab"), Value::string("cd"), Value::string("e")])
        );
        assert!(split(&Value::string("ab"), &Value::number(0.0)).is_err());
    }
}
