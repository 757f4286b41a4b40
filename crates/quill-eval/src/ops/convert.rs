//! Conversions between value kinds and code-page numerals.

use super::map_elements;
use quill_codepage::{CodePage, COMPRESSION_BASE};
use quill_types::value::parse_number;
use quill_types::{QuillError, Result, Value};

/// `¡`
pub fn truthify(value: &Value) -> Value {
    Value::boolean(value.is_truthy())
}

/// `¬`
pub fn untruthify(value: &Value) -> Value {
    Value::boolean(!value.is_truthy())
}

/// `S`
pub fn to_string(value: &Value) -> Value {
    Value::string(value.to_string())
}

/// `N`: read a string as a number.
pub fn to_number(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) => Ok(Value::number(*n)),
        Value::String { text, .. } => parse_number(text.trim())
            .map(Value::number)
            .ok_or_else(|| QuillError::Runtime(format!("cannot read \"{text}\" as a number"))),
        Value::Array { .. } => map_elements(value, &to_number),
    }
}

fn map_text<F>(symbol: char, value: &Value, op: &F) -> Result<Value>
where
    F: Fn(&str) -> String,
{
    match value {
        Value::String { text, .. } => Ok(Value::string(op(text))),
        Value::Array { .. } => map_elements(value, &|v| map_text(symbol, v, op)),
        other => Err(QuillError::unary_types(symbol, other.kind())),
    }
}

/// `↑`
pub fn uppercase(value: &Value) -> Result<Value> {
    map_text('↑', value, &str::to_uppercase)
}

/// `↓`
pub fn lowercase(value: &Value) -> Result<Value> {
    map_text('↓', value, &str::to_lowercase)
}

/// `€`: flag a sequence for iteration projection.
pub fn each(value: &Value) -> Value {
    value.clone().into_each()
}

// ══════════════════════════════════════════════════════════════════════
// Code-page numerals
// ══════════════════════════════════════════════════════════════════════

/// `O`: code-page index of a string's first character.
pub fn ordinal(value: &Value, code_page: &CodePage) -> Result<Value> {
    match value {
        Value::String { text, .. } => {
            let first = text
                .chars()
                .next()
                .ok_or_else(|| QuillError::Runtime("'O' of an empty string".into()))?;
            Ok(Value::number(f64::from(code_page.index_of(first)?)))
        }
        Value::Array { .. } => map_elements(value, &|v| ordinal(v, code_page)),
        other => Err(QuillError::unary_types('O', other.kind())),
    }
}

/// Fold a string's characters as digits, most significant first.
fn digits_value<F>(symbol: char, value: &Value, base: u64, digit: F) -> Result<Value>
where
    F: Fn(char) -> Result<u64>,
{
    let Value::String { text, .. } = value else {
        return Err(QuillError::unary_types(symbol, value.kind()));
    };
    let mut total: f64 = 0.0;
    for ch in text.chars() {
        total = total * base as f64 + digit(ch)? as f64;
    }
    Ok(Value::number(total))
}

/// `Ö`: a string read as base-256 code-page digits.
pub fn from_base_256(value: &Value, code_page: &CodePage) -> Result<Value> {
    digits_value('Ö', value, 256, |ch| code_page.index_of(ch).map(u64::from))
}

/// `Ð`: a string read as base-254 compressed digits.
pub fn decompress(value: &Value, code_page: &CodePage) -> Result<Value> {
    digits_value('Ð', value, COMPRESSION_BASE, |ch| code_page.compressed_digit(ch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_codepage::bundled;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&"-2.5".into()).unwrap(), Value::number(-2.5));
        assert_eq!(
            to_number(&Value::array(["1".into(), "2".into()])).unwrap(),
            Value::array([1.into(), 2.into()])
        );
        assert!(matches!(to_number(&"x1".into()), Err(QuillError::Runtime(_))));
    }

    #[test]
    fn test_case_mapping() {
        assert_eq!(uppercase(&"aB".into()).unwrap(), Value::string("AB"));
        assert_eq!(lowercase(&"aB".into()).unwrap(), Value::string("ab"));
        assert!(uppercase(&1.into()).is_err());
    }

    #[test]
    fn test_ordinal_uses_code_page_index() {
        let page = bundled();
        assert_eq!(ordinal(&"A".into(), page).unwrap(), Value::number(65.0));
        assert_eq!(ordinal(&"\n".into(), page).unwrap(), Value::number(10.0));
    }

    #[test]
    fn test_base_256_digits() {
        let page = bundled();
        assert_eq!(from_base_256(&"AB".into(), page).unwrap(), Value::number(65.0 * 256.0 + 66.0));
        assert_eq!(from_base_256(&"".into(), page).unwrap(), Value::number(0.0));
    }

    #[test]
    fn test_decompress_skips_quote_and_backslash() {
        let page = bundled();
        assert_eq!(decompress(&"#".into(), page).unwrap(), Value::number(34.0));
        assert_eq!(decompress(&"!#".into(), page).unwrap(), Value::number(33.0 * 254.0 + 34.0));
    }
}
