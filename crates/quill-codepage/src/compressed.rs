//! Base-254 digit alphabet for compressed number literals.
//!
//! Digits are the code-page characters in index order with `"` and `\`
//! removed, so any digit string can sit inside a `"…"` literal unescaped.

use crate::CodePage;
use quill_types::{QuillError, Result};

/// Radix of a compressed number.
pub const COMPRESSION_BASE: u64 = 254;

/// Code-page indices left out of the alphabet: `"` and `\`.
const EXCLUDED: [u8; 2] = [b'"', b'\\'];

impl CodePage {
    /// Digit value of a character in the compressed alphabet.
    pub fn compressed_digit(&self, ch: char) -> Result<u64> {
        let index = self.index_of(ch)?;
        if EXCLUDED.contains(&index) {
            return Err(QuillError::Runtime(format!(
                "'{ch}' is not a compressed digit"
            )));
        }
        let skipped = EXCLUDED.iter().filter(|&&e| e < index).count() as u64;
        Ok(u64::from(index) - skipped)
    }

    /// Character for a compressed digit value.
    pub fn compressed_char(&self, digit: u64) -> Result<char> {
        if digit >= COMPRESSION_BASE {
            return Err(QuillError::InvalidIndex(digit as usize));
        }
        let mut index = digit;
        for excluded in EXCLUDED {
            if index >= u64::from(excluded) {
                index += 1;
            }
        }
        self.char_at(index as usize)
    }
}
