//! Quill: an interpreter for a one-character-per-operation golfing
//! language.
//!
//! ```
//! use quill::{run, RunConfig, Value};
//!
//! let outcome = run("+⁰ 1", vec![Value::number(41.0)], &RunConfig::default());
//! assert_eq!(outcome.results, vec![Value::number(42.0)]);
//! ```
//!
//! The pipeline is: code page lookup ([`quill_codepage`]), tokenising
//! ([`quill_lexer`]) and evaluation ([`quill_eval`]). This crate ties them
//! together and adds the argument reader and the literal advisor.

pub mod advisor;
pub mod args;

pub use advisor::{advise, Encoding, EncodingKind};
pub use args::parse_arguments;
pub use quill_codepage::{bundled as code_page, CodePage};
pub use quill_eval::{Engine, RunConfig, RunOutcome};
pub use quill_types::{Op, QuillError, Result, Value, ValueKind};

use tracing::debug;

/// Tokenise a program against the bundled code page.
pub fn tokenise(code: &str) -> Result<Vec<Op>> {
    quill_lexer::tokenise(code, code_page())
}

/// Run a program to completion. A program that does not tokenise yields
/// no results and the tokeniser's error.
pub fn run(code: &str, arguments: Vec<Value>, config: &RunConfig) -> RunOutcome {
    let ops = match tokenise(code) {
        Ok(ops) => ops,
        Err(error) => {
            debug!(%error, "tokenise failed");
            return RunOutcome {
                results: Vec::new(),
                error: Some(error),
            };
        }
    };
    Engine::new(ops, arguments, code_page(), config).run()
}

/// Run a program and return its last value.
pub fn evaluate(code: &str, arguments: Vec<Value>, config: &RunConfig) -> Result<Value> {
    run(code, arguments, config).into_result()
}

/// Run a program whose arguments are given in textual form.
pub fn run_with_text(code: &str, arguments: &str, config: &RunConfig) -> Result<RunOutcome> {
    let arguments = parse_arguments(arguments)?;
    Ok(run(code, arguments, config))
}
