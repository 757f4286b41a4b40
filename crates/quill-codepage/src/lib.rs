//! The Quill code page: a fixed table mapping between the language's
//! characters, their one-byte index, and optional multi-character
//! mnemonics ("combinations").
//!
//! The bundled table is parsed once, on first access, and is read-only
//! afterwards. Callers take a `&CodePage` and pass it down, so independent
//! runs can share it across threads.

mod compressed;
mod table;

pub use compressed::COMPRESSION_BASE;
pub use table::CodePage;

use once_cell::sync::Lazy;

/// JSON source of the bundled table.
pub const BUNDLED_TABLE: &str = include_str!("codepage.json");

static BUNDLED: Lazy<CodePage> = Lazy::new(|| match CodePage::from_json(BUNDLED_TABLE) {
    Ok(page) => page,
    Err(e) => panic!("bundled code page is invalid: {e}"),
});

/// The code page shipped with the interpreter.
pub fn bundled() -> &'static CodePage {
    &BUNDLED
}
