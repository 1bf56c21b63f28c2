/// Lexical errors.
///
/// Raised by the tokenizer for characters it does not recognise and for
/// malformed numeric literals. Carries the line and column of the offending
/// input.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning a token stream into
/// an AST: unbalanced brackets and parentheses, unknown commands, malformed
/// procedure definitions and unexpected tokens.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// variables, unknown procedures, inputs a primitive does not accept, values
/// no procedure consumes, and failures of re-entrant parsing.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
