/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a stream of tokens: numbers,
/// quoted words, variable references, bare words, operators, brackets and
/// line breaks. Every token carries its line and column.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source positions.
/// - Decodes backslash escapes inside words.
/// - Reports lexical errors for unknown characters and malformed numbers.
pub mod lexer;
/// The command registry shared by the parser and the evaluator.
///
/// Logo has no fixed statement grammar: how many expressions follow a command
/// name depends on the command's arity, which the parser looks up here. The
/// evaluator resolves the same names to primitives and user procedures.
pub mod registry;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into AST nodes using arities from the registry.
/// - Applies operator precedence to infix expressions.
/// - Keeps bracketed lists unevaluated so they can be run later.
/// - Reports unbalanced brackets, unknown commands and malformed definitions.
pub mod parser;
/// Variable frames.
///
/// Frames form a parent-linked chain: one global frame per interpreter and
/// one child frame per procedure call. Reads walk the chain; `make` always
/// writes the global frame.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// # Responsibilities
/// - Evaluates AST nodes, calling primitives and user procedures.
/// - Runs instruction lists by tokenizing and parsing them again.
/// - Carries `output` and `stop` back to the enclosing procedure.
/// - Reports runtime errors with the line they happened on.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
pub mod value;
