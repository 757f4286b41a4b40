//! Quill execution engine.
//!
//! Evaluates a tokenised program (a flat `Vec<Op>`) against its arguments.
//! The [`Engine`] owns all mutable run state; operators in [`ops`] are pure
//! functions over [`Value`](quill_types::Value)s.

pub mod bindings;
pub mod config;
pub mod engine;
pub mod ops;

pub use bindings::{BindingKind, Bindings};
pub use config::RunConfig;
pub use engine::{Engine, RunOutcome, VARIABLE_COUNT};
