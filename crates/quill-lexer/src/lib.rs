//! Quill tokeniser: converts code-page text into a flat operation sequence.

pub mod tokeniser;

pub use tokeniser::{tokenise, Tokeniser};
