/// Entry point and the precedence-climbing expression loop.
///
/// Contains `parse`, which turns a token stream into a `Program`, and
/// `parse_expression`, which every other parsing routine calls for its
/// operands.
pub mod core;

/// Arity-driven procedure calls, `to ... end` definitions and conditionals.
///
/// These are the constructs that consult (and, for definitions, update) the
/// command registry while parsing.
pub mod procedure;

/// Parenthesised call groups and bracketed lists.
///
/// Lists are kept as inert words so that control primitives can run them
/// later.
pub mod list;

/// Small helpers shared by the parsing routines.
pub mod utils;
