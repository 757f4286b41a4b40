//! Shared types for the Quill interpreter.
//!
//! This crate defines the runtime [`Value`] model, the operation nodes
//! ([`Op`]) produced by the tokeniser, and the error type shared by every
//! stage of the pipeline.

mod error;
pub mod op;
pub mod value;

pub use error::QuillError;
pub use op::Op;
pub use value::{Value, ValueKind};

/// Result type used throughout the Quill interpreter.
pub type Result<T> = std::result::Result<T, QuillError>;
