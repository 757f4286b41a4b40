//! Arithmetic-like operators and their cross-type overloads.

use super::{map_elements, map_numeric, same_shape, sequence_len, vectorised};
use quill_types::{QuillError, Result, Value};

// ══════════════════════════════════════════════════════════════════════
// Binary
// ══════════════════════════════════════════════════════════════════════

/// `+`: sum, concatenation, append or prepend.
pub fn add(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| {
        Ok(match (l, r) {
            (Value::Number(a), Value::Number(b)) => Value::number(a + b),
            (Value::Array { items: a, .. }, Value::Array { items: b, .. }) => {
                Value::array(a.iter().chain(b).cloned())
            }
            (Value::Array { items, .. }, scalar) => {
                Value::array(items.iter().cloned().chain([scalar.clone()]))
            }
            (scalar, Value::Array { items, .. }) => {
                Value::array([scalar.clone()].into_iter().chain(items.iter().cloned()))
            }
            (a, b) => Value::string(format!("{a}{b}")),
        })
    })
}

/// `-`: difference, or removal of occurrences.
pub fn subtract(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a - b)),
        (Value::Array { items: a, .. }, Value::Array { items: b, .. }) => Ok(Value::array(
            a.iter().filter(|x| !b.contains(x)).cloned(),
        )),
        (Value::Array { items, .. }, unwanted) => Ok(Value::array(
            items.iter().filter(|x| *x != unwanted).cloned(),
        )),
        (Value::String { text, .. }, unwanted @ (Value::String { .. } | Value::Number(_))) => {
            let pattern = unwanted.to_string();
            if pattern.is_empty() {
                Ok(Value::string(text.clone()))
            } else {
                Ok(Value::string(text.replace(&pattern, "")))
            }
        }
        (a, b) => Err(QuillError::binary_types('-', a.kind(), b.kind())),
    })
}

/// `*`: product, signed fractional repetition, or cartesian product.
pub fn multiply(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a * b)),
        (Value::Number(n), seq) | (seq, Value::Number(n)) => repeat(seq, *n),
        (a, b) => cartesian(a, b),
    })
}

/// `/`: the first operand divides the second. A number and a sequence
/// split the sequence into that many pieces.
pub fn division(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| match (l, r) {
        (Value::Number(divisor), Value::Number(dividend)) => {
            if *divisor == 0.0 {
                Err(QuillError::DivisionByZero { symbol: '/' })
            } else {
                Ok(Value::number(dividend / divisor))
            }
        }
        (Value::Number(n), seq) | (seq, Value::Number(n)) => split_into(seq, n.abs(), '/'),
        (a, b) => Err(QuillError::binary_types('/', a.kind(), b.kind())),
    })
}

/// `%`: Euclidean remainder of the left operand by the right.
pub fn modulo(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| match (l, r) {
        (Value::Number(_), Value::Number(b)) if *b == 0.0 => {
            Err(QuillError::DivisionByZero { symbol: '%' })
        }
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a.rem_euclid(*b))),
        (a, b) => Err(QuillError::binary_types('%', a.kind(), b.kind())),
    })
}

/// `^`: left raised to the right.
pub fn power(left: &Value, right: &Value) -> Result<Value> {
    vectorised(left, right, &|l, r| match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a.powf(*b))),
        (a, b) => Err(QuillError::binary_types('^', a.kind(), b.kind())),
    })
}

// ══════════════════════════════════════════════════════════════════════
// Unary
// ══════════════════════════════════════════════════════════════════════

/// `½`: half a number, or a sequence split in two.
pub fn halve(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) => Ok(Value::number(n / 2.0)),
        v if v.is_each() => map_elements(v, &halve),
        Value::Array { items, .. } => match halve_integers(items) {
            Some(halves) => Ok(halves),
            None => split_into(value, 2.0, '½'),
        },
        seq => split_into(seq, 2.0, '½'),
    }
}

/// Halves of an odd-length array of integers. The middle element is
/// split as well: the first half ends with its floored half and the
/// second half starts with the remainder.
fn halve_integers(items: &[Value]) -> Option<Value> {
    if items.len() % 2 == 0 {
        return None;
    }
    let integers = items
        .iter()
        .map(|v| v.as_number().filter(|n| n.is_finite() && n.fract() == 0.0))
        .collect::<Option<Vec<f64>>>()?;
    let middle = integers.len() / 2;
    let low = (integers[middle] / 2.0).floor();
    let high = integers[middle] - low;

    let first = integers[..middle].iter().copied().chain([low]);
    let second = [high].into_iter().chain(integers[middle + 1..].iter().copied());
    Some(Value::array([
        Value::array(first.map(Value::number)),
        Value::array(second.map(Value::number)),
    ]))
}

pub fn negate(value: &Value) -> Result<Value> {
    map_numeric('_', value, &|n| Ok(Value::number(-n)))
}

pub fn absolute(value: &Value) -> Result<Value> {
    map_numeric('A', value, &|n| Ok(Value::number(n.abs())))
}

pub fn increment(value: &Value) -> Result<Value> {
    map_numeric('→', value, &|n| Ok(Value::number(n + 1.0)))
}

pub fn decrement(value: &Value) -> Result<Value> {
    map_numeric('←', value, &|n| Ok(Value::number(n - 1.0)))
}

// ══════════════════════════════════════════════════════════════════════
// Sequence helpers
// ══════════════════════════════════════════════════════════════════════

/// Repeat a sequence `|times|` times, including a rounded fractional
/// share of one more copy. A negative count reverses the whole sequence
/// before repeating.
fn repeat(seq: &Value, times: f64) -> Result<Value> {
    let mut items = seq.projection();
    if times < 0.0 {
        items.reverse();
    }
    let total = if items.is_empty() {
        0
    } else {
        sequence_len('*', (times.abs() * items.len() as f64).round())?
    };
    let repeated = items.iter().cycle().take(total).cloned().collect();
    Ok(same_shape(seq, repeated))
}

/// Every left element paired with every right element, row-major.
fn cartesian(left: &Value, right: &Value) -> Result<Value> {
    let lefts = left.projection();
    let rights = right.projection();
    sequence_len('*', lefts.len() as f64 * rights.len() as f64)?;
    Ok(Value::array(lefts.into_iter().flat_map(|l| {
        rights
            .iter()
            .map(move |r| Value::array([l.clone(), r.clone()]))
            .collect::<Vec<_>>()
    })))
}

/// Split a sequence into `floor(pieces)` parts as equal as possible; the
/// earliest parts absorb the remainder.
pub(crate) fn split_into(seq: &Value, pieces: f64, symbol: char) -> Result<Value> {
    let pieces = sequence_len(symbol, pieces)?;
    if pieces == 0 {
        return Err(QuillError::DivisionByZero { symbol });
    }
    let items = seq.projection();
    let base = items.len() / pieces;
    let extra = items.len() % pieces;

    let mut rest = items.into_iter();
    let parts = (0..pieces)
        .map(|i| {
            let size = if i < extra { base + 1 } else { base };
            same_shape(seq, rest.by_ref().take(size).collect())
        })
        .collect::<Vec<_>>();
    Ok(Value::array(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: f64) -> Value {
        Value::number(x)
    }

    fn s(x: &str) -> Value {
        Value::string(x)
    }

    fn lengths(v: &Value) -> Vec<usize> {
        v.as_items()
            .unwrap()
            .iter()
            .map(|p| p.as_text().unwrap().chars().count())
            .collect()
    }

    #[test]
    fn test_add_preserves_order_with_strings() {
        assert_eq!(add(&s("ab"), &n(1.0)).unwrap(), s("ab1"));
        assert_eq!(add(&n(1.0), &s("ab")).unwrap(), s("1ab"));
    }

    #[test]
    fn test_add_appends_and_prepends_scalars() {
        let arr = Value::array([n(1.0), n(2.0)]);
        assert_eq!(
            add(&arr, &n(3.0)).unwrap(),
            Value::array([n(1.0), n(2.0), n(3.0)])
        );
        assert_eq!(
            add(&s("x"), &arr).unwrap(),
            Value::array([s("x"), n(1.0), n(2.0)])
        );
    }

    #[test]
    fn test_negative_repetition_reverses_first() {
        assert_eq!(multiply(&n(-3.0), &s("abc")).unwrap(), s("cbacbacba"));
    }

    #[test]
    fn test_fractional_repetition() {
        let arr = Value::array([n(1.0), n(2.0), n(3.0)]);
        assert_eq!(
            multiply(&n(2.2), &arr).unwrap(),
            Value::array([n(1.0), n(2.0), n(3.0), n(1.0), n(2.0), n(3.0), n(1.0)])
        );
        assert_eq!(multiply(&s("ab"), &n(0.5)).unwrap(), s("a"));
    }

    #[test]
    fn test_cartesian_product_is_row_major() {
        let product = multiply(&s("abc"), &s("xy")).unwrap();
        let expected = Value::array(
            [("a", "x"), ("a", "y"), ("b", "x"), ("b", "y"), ("c", "x"), ("c", "y")]
                .iter()
                .map(|(l, r)| Value::array([s(l), s(r)])),
        );
        assert_eq!(product, expected);
    }

    #[test]
    fn test_division_divides_second_by_first() {
        assert_eq!(division(&n(4.0), &n(10.0)).unwrap(), n(2.5));
        assert_eq!(
            division(&n(0.0), &n(15.0)),
            Err(QuillError::DivisionByZero { symbol: '/' })
        );
    }

    #[test]
    fn test_division_splits_with_ceil_sized_first_pieces() {
        let text = s("abcdefghijkl");
        assert_eq!(lengths(&division(&n(3.0), &text).unwrap()), vec![4, 4, 4]);
        assert_eq!(lengths(&division(&n(5.0), &text).unwrap()), vec![3, 3, 2, 2, 2]);
        assert_eq!(lengths(&division(&text, &n(5.0)).unwrap()), vec![3, 3, 2, 2, 2]);
    }

    #[test]
    fn test_halve() {
        assert_eq!(halve(&n(7.0)).unwrap(), n(3.5));
        assert_eq!(
            halve(&s("abcde")).unwrap(),
            Value::array([s("abc"), s("de")])
        );
    }

    #[test]
    fn test_halve_odd_integer_array_splits_the_middle() {
        let arr = Value::array([n(4.0), n(7.0), n(2.0)]);
        assert_eq!(
            halve(&arr).unwrap(),
            Value::array([
                Value::array([n(4.0), n(3.0)]),
                Value::array([n(4.0), n(2.0)])
            ])
        );
        assert_eq!(
            halve(&Value::array([n(-3.0)])).unwrap(),
            Value::array([Value::array([n(-2.0)]), Value::array([n(-1.0)])])
        );
    }

    #[test]
    fn test_halve_other_arrays_split_plainly() {
        let even = Value::array([n(1.0), n(2.0), n(3.0), n(4.0)]);
        assert_eq!(
            halve(&even).unwrap(),
            Value::array([Value::array([n(1.0), n(2.0)]), Value::array([n(3.0), n(4.0)])])
        );
        let mixed = Value::array([n(1.0), s("x"), n(2.5)]);
        assert_eq!(
            halve(&mixed).unwrap(),
            Value::array([Value::array([n(1.0), s("x")]), Value::array([n(2.5)])])
        );
    }

    #[test]
    fn test_oversized_repetition_is_a_runtime_error() {
        assert!(matches!(multiply(&n(1e18), &s("a")), Err(QuillError::Runtime(_))));
        assert!(matches!(
            division(&n(1e18), &s("abc")),
            Err(QuillError::Runtime(_))
        ));
        assert_eq!(multiply(&n(1e18), &s("")).unwrap(), s(""));
    }

    #[test]
    fn test_subtract_removes_occurrences() {
        assert_eq!(subtract(&s("banana"), &s("an")).unwrap(), s("ba"));
        assert_eq!(
            subtract(&Value::array([n(1.0), n(2.0), n(1.0)]), &n(1.0)).unwrap(),
            Value::array([n(2.0)])
        );
        assert!(matches!(
            subtract(&n(1.0), &s("a")),
            Err(QuillError::InvalidArgumentTypes { symbol: '-', .. })
        ));
    }

    #[test]
    fn test_modulo_is_euclidean() {
        assert_eq!(modulo(&n(-1.0), &n(3.0)).unwrap(), n(2.0));
        assert_eq!(
            modulo(&n(1.0), &n(0.0)),
            Err(QuillError::DivisionByZero { symbol: '%' })
        );
    }

    #[test]
    fn test_each_flag_maps_over_operand() {
        let flagged = Value::array([n(1.0), n(2.0)]).into_each();
        assert_eq!(
            add(&flagged, &n(10.0)).unwrap(),
            Value::array([n(11.0), n(12.0)])
        );
        let text = s("ab").into_each();
        assert_eq!(
            add(&Value::array([text]).into_each(), &n(1.0)).unwrap(),
            Value::array([Value::array([s("a1"), s("b1")])])
        );
    }

    #[test]
    fn test_flagged_element_maps_against_scalar() {
        let arr = Value::array([s("ab").into_each(), n(5.0)]);
        assert_eq!(
            add(&arr, &n(1.0)).unwrap(),
            Value::array([Value::array([s("a1"), s("b1")]), n(5.0), n(1.0)])
        );
        assert_eq!(
            add(&n(1.0), &arr).unwrap(),
            Value::array([n(1.0), Value::array([s("1a"), s("1b")]), n(5.0)])
        );
    }

    #[test]
    fn test_unary_numeric_maps_over_arrays() {
        let arr = Value::array([n(1.0), Value::array([n(-2.0)])]);
        assert_eq!(
            negate(&arr).unwrap(),
            Value::array([n(-1.0), Value::array([n(2.0)])])
        );
        assert!(increment(&s("a")).is_err());
    }
}
