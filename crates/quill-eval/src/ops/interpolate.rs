//! `$` string interpolation.
//!
//! The template is scanned once. Each marker character owns an index
//! pointer into the value array, so `%` and `@` draw their replacements
//! independently.

use quill_types::{QuillError, Result, Value};

/// Placeholder characters recognised in a template.
pub const MARKERS: [char; 2] = ['%', '@'];

/// `$`: fill the markers of `template` from `value`.
pub fn interpolate(template: &Value, value: &Value) -> Result<Value> {
    let Value::String { text, .. } = template else {
        return Err(QuillError::binary_types('$', template.kind(), value.kind()));
    };

    let mut pointers = [0usize; MARKERS.len()];
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let Some(marker) = MARKERS.iter().position(|&m| m == ch) else {
            out.push(ch);
            continue;
        };
        match value {
            Value::Array { items, .. } if items.is_empty() => {}
            Value::Array { items, .. } => {
                let pointer = &mut pointers[marker];
                out.push_str(&items[*pointer % items.len()].to_string());
                *pointer += 1;
            }
            scalar => out.push_str(&scalar.to_string()),
        }
    }
    Ok(Value::string(out))
}
