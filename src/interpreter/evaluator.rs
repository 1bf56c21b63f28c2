/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, the `Flow`
/// signal type and statement execution.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic and comparison operators between two values.
pub mod binary;

/// User-defined procedures.
///
/// Holds the `Procedure` value created by `to ... end` and the logic that
/// calls it in a fresh frame.
pub mod procedure;

/// Running lists as instructions.
///
/// Turns list values back into source text and feeds them through the
/// tokenizer, parser and evaluator again.
pub mod instruction;

/// The primitive library.
///
/// Declares the table of built-in commands and operations, and the
/// dispatcher that checks their inputs before calling them.
pub mod primitive;
