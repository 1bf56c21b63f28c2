/// The primitive table and its dispatcher.
///
/// Declares every built-in name with its default arity, the fewest inputs it
/// accepts and its implementation.
pub mod core;

/// `print`, `show` and `type`.
///
/// Write their inputs to the interpreter's output sink.
pub mod communication;

/// `make`, `name`, `thing` and `load`.
pub mod workspace;

/// Word and list primitives.
///
/// Constructors, selectors, predicates and queries over Logo's two data
/// types.
pub mod data;

/// Numeric and bitwise primitives.
pub mod arithmetic;

/// `and`, `or` and `not`.
pub mod logic;

/// Control structures.
///
/// `run`, `repeat`, `foreach`, `output`, `stop` and `ignore`. These receive
/// instruction lists as data and run them through the re-entrant
/// tokenize/parse/evaluate step.
pub mod control;
