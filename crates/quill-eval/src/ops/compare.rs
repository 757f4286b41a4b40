//! Ordering and equality.

use super::vectorised;
use quill_types::{QuillError, Result, Value};
use std::cmp::Ordering;

/// Order of comparable pairs: numbers numerically (so `-0` equals `0`),
/// strings lexicographically, arrays element-wise. Mixed kinds and NaN
/// are errors attributed to `symbol`.
pub(crate) fn ordering(symbol: char, left: &Value, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).ok_or_else(|| {
            QuillError::Runtime(format!("'{symbol}' cannot order {a} and {b}"))
        }),
        (Value::String { text: a, .. }, Value::String { text: b, .. }) => Ok(a.cmp(b)),
        (Value::Array { items: a, .. }, Value::Array { items: b, .. }) => {
            for (x, y) in a.iter().zip(b) {
                match ordering(symbol, x, y)? {
                    Ordering::Equal => continue,
                    unequal => return Ok(unequal),
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        (a, b) => Err(QuillError::binary_types(symbol, a.kind(), b.kind())),
    }
}

/// `<`
pub fn less(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| {
        Ok(Value::boolean(ordering('<', l, r)? == Ordering::Less))
    })
}

/// `>`
pub fn greater(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| {
        Ok(Value::boolean(ordering('>', l, r)? == Ordering::Greater))
    })
}

/// `=`: deep equality; never fails.
pub fn equal(left: &Value, right: &Value) -> Value {
    Value::boolean(left == right)
}

/// `≠`
pub fn not_equal(left: &Value, right: &Value) -> Value {
    Value::boolean(left != right)
}
