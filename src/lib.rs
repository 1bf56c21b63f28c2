//! # logoscript
//!
//! logoscript is an interpreter for a Logo-family language written in Rust.
//! It tokenizes, parses and evaluates Logo source text, with an arity-driven
//! parser, procedures defined with `to ... end`, global variables, and
//! control structures that run bracketed lists as instructions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::evaluator::core::Context;

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of Logo source as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for literals, variables, infix operations, lists,
///   procedure calls and definitions, and conditionals.
/// - Attaches the source line to every node for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code. It
/// standardizes error reporting and carries the source line of every
/// failure.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and Logo-style messages.
/// - Supports integration with `std::error::Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, the command registry, parsing,
/// variable frames, evaluation and values to provide a complete runtime for
/// Logo source text.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Logo numbers are `f64`; primitives that need integers convert through
/// these helpers so that nothing is silently truncated.
pub mod util;

/// Runs a complete Logo script with output going to standard output.
///
/// A fresh interpreter is created for the script. If execution succeeds, it
/// returns `Ok(())`; otherwise, it returns the first error.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use logoscript::run_script;
///
/// // A definition and a call: no error should occur.
/// let source = "to double :n\noutput :n * 2\nend\nmake \"x double 21";
/// assert!(run_script(source).is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let source = "make \"y :x + 1"; // 'x' is not defined
/// assert!(run_script(source).is_err());
/// ```
pub fn run_script(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = Context::new();
    context.run_source(source)?;
    Ok(())
}
