//! The operation library.
//!
//! Every function here is pure: it takes evaluated operands and returns a
//! new value or an error, never touching engine state. Control constructs
//! that need the cursor (`&`, `|`, `Φ`, `Ψ`) live in the engine.

pub mod arith;
pub mod compare;
pub mod convert;
pub mod interpolate;
pub mod primes;
pub mod random;
pub mod sequence;

use quill_types::value::format_number;
use quill_types::{QuillError, Result, Value};

/// Apply a binary operator, mapping over any operand flagged with `€`.
///
/// The left operand's flag is honoured first; each projected element is
/// paired with the other operand and the mapping recurses, so flagged
/// elements nested in the projection are mapped again. An unflagged array
/// paired with a scalar has its flagged elements mapped against that
/// scalar before the operator sees it.
pub(crate) fn vectorised<F>(left: &Value, right: &Value, op: &F) -> Result<Value>
where
    F: Fn(&Value, &Value) -> Result<Value>,
{
    if left.is_each() {
        return left
            .projection()
            .iter()
            .map(|l| vectorised(l, right, op))
            .collect::<Result<Vec<_>>>()
            .map(Value::array);
    }
    if right.is_each() {
        return right
            .projection()
            .iter()
            .map(|r| vectorised(left, r, op))
            .collect::<Result<Vec<_>>>()
            .map(Value::array);
    }
    match (left, right) {
        (Value::Array { items, .. }, scalar @ (Value::Number(_) | Value::String { .. }))
            if items.iter().any(Value::is_each) =>
        {
            let items = map_flagged(items, |item| vectorised(item, scalar, op))?;
            op(&items, scalar)
        }
        (scalar @ (Value::Number(_) | Value::String { .. }), Value::Array { items, .. })
            if items.iter().any(Value::is_each) =>
        {
            let items = map_flagged(items, |item| vectorised(scalar, item, op))?;
            op(scalar, &items)
        }
        _ => op(left, right),
    }
}

/// Replace each flagged item with `map(item)`, keeping the rest as they are.
fn map_flagged<M>(items: &[Value], map: M) -> Result<Value>
where
    M: Fn(&Value) -> Result<Value>,
{
    items
        .iter()
        .map(|item| {
            if item.is_each() {
                map(item)
            } else {
                Ok(item.clone())
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::array)
}

/// Apply a numeric unary operator, mapping over arrays (and flagged
/// strings) element by element.
pub(crate) fn map_numeric<F>(symbol: char, value: &Value, op: &F) -> Result<Value>
where
    F: Fn(f64) -> Result<Value>,
{
    match value {
        Value::Number(n) => op(*n),
        Value::Array { .. } => map_elements(value, &|v| map_numeric(symbol, v, op)),
        Value::String { each: true, .. } => map_elements(value, &|v| map_numeric(symbol, v, op)),
        other => Err(QuillError::unary_types(symbol, other.kind())),
    }
}

/// Map `op` over a value's projection, collecting an Array.
pub(crate) fn map_elements<F>(value: &Value, op: &F) -> Result<Value>
where
    F: Fn(&Value) -> Result<Value>,
{
    value
        .projection()
        .iter()
        .map(op)
        .collect::<Result<Vec<_>>>()
        .map(Value::array)
}

/// Rebuild `items` in the shape of `like`: a String if `like` is one
/// (items concatenated by rendering), an Array otherwise.
pub(crate) fn same_shape(like: &Value, items: Vec<Value>) -> Value {
    match like {
        Value::String { .. } => {
            Value::string(items.iter().map(Value::to_string).collect::<String>())
        }
        _ => Value::array(items),
    }
}

/// Longest sequence an operator may build from a numeric operand.
pub const MAX_SEQUENCE_LEN: usize = 1 << 22;

/// Elements a filter or map block iterates: `0…n-1` for a number,
/// characters for a string, items for an array.
pub(crate) fn iteration_source(symbol: char, value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Number(n) => Ok((0..sequence_len(symbol, *n)?)
            .map(|i| Value::number(i as f64))
            .collect()),
        other => Ok(other.projection()),
    }
}

/// `floor(n)` as a count, zero for negative or non-finite input.
pub(crate) fn count(n: f64) -> usize {
    if n.is_finite() && n > 0.0 {
        n.floor() as usize
    } else {
        0
    }
}

/// [`count`] for a length `symbol` is about to allocate. Lengths over
/// [`MAX_SEQUENCE_LEN`] fail before anything is built.
pub(crate) fn sequence_len(symbol: char, n: f64) -> Result<usize> {
    if n >= (MAX_SEQUENCE_LEN + 1) as f64 {
        return Err(QuillError::Runtime(format!(
            "'{symbol}' would build {} elements, over the limit of {MAX_SEQUENCE_LEN}",
            format_number(n.floor())
        )));
    }
    Ok(count(n))
}
