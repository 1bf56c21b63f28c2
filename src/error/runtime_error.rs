use crate::error::{LexError, ParseError};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// An instruction list or loaded file failed to tokenize or parse.
    Syntax(ParseError),
    /// Tried to read a variable that no scope in the chain binds.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a procedure that was never defined.
    UnknownProcedure {
        /// The name of the procedure.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An infix operator has no meaning for the given operands.
    UnsupportedOperator {
        /// The operator symbol.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A primitive was called with fewer inputs than it needs.
    NotEnoughInputs {
        /// The name of the primitive.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A primitive or operator rejected one of its inputs.
    InvalidInput {
        /// The name of the primitive or operator.
        name:  String,
        /// The rejected input, as Logo would show it.
        input: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value was produced but nothing consumed it.
    UnconsumedValue {
        /// The leftover value, as Logo would show it.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A procedure used as an input did not output anything.
    NoOutput {
        /// The procedure that produced nothing.
        name:     String,
        /// The procedure that wanted its output.
        consumer: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `output` or `stop` was used outside of a procedure body.
    OutsideProcedure {
        /// The primitive that was used.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The primitive exists in the registry but has no implementation yet.
    Unimplemented {
        /// The name of the primitive.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access a list/word element outside the allowed bounds.
    IndexOutOfBounds {
        /// The largest valid index.
        max:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Procedure calls nested deeper than the interpreter allows.
    RecursionLimit {
        /// The configured limit.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A script requested by `load` could not be read.
    LoadFailed {
        /// The path that was tried.
        path:    String,
        /// The underlying I/O failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Writing to the output sink failed.
    Output {
        /// The underlying I/O failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A value was too large to be converted safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value was too small to be converted safely.
    LiteralTooSmall {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a fractional number where an integer was required.
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl From<ParseError> for RuntimeError {
    fn from(e: ParseError) -> Self {
        Self::Syntax(e)
    }
}

impl From<LexError> for RuntimeError {
    fn from(e: LexError) -> Self {
        Self::Syntax(ParseError::Lex(e))
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: {name} has no value.")
            },
            Self::UnknownProcedure { name, line } => {
                write!(f, "Error on line {line}: I don't know how to {name}.")
            },
            Self::UnsupportedOperator { operator, line } => {
                write!(f, "Error on line {line}: Can't apply operator {operator}.")
            },
            Self::NotEnoughInputs { name, line } => {
                write!(f, "Error on line {line}: Not enough inputs to {name}.")
            },
            Self::InvalidInput { name, input, line } => {
                write!(f, "Error on line {line}: {name} doesn't like {input} as input.")
            },
            Self::UnconsumedValue { value, line } => {
                write!(f, "Error on line {line}: You don't say what to do with {value}.")
            },
            Self::NoOutput { name,
                             consumer,
                             line, } => {
                write!(f, "Error on line {line}: {name} didn't output to {consumer}.")
            },
            Self::OutsideProcedure { name, line } => write!(f,
                                                            "Error on line {line}: Can only use {name} inside a procedure."),
            Self::Unimplemented { name, line } => {
                write!(f, "Error on line {line}: {name} is not implemented.")
            },
            Self::IndexOutOfBounds { max, found, line } => write!(f,
                                                                  "Error on line {line}: Index out of bounds. Maximum is {max}, but found {found} instead."),
            Self::RecursionLimit { depth, line } => write!(f,
                                                           "Error on line {line}: Procedure calls nested deeper than {depth} levels."),
            Self::LoadFailed { path, details, line } => {
                write!(f, "Error on line {line}: Failed to load '{path}': {details}.")
            },
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Failed to write output: {details}.")
            },
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::LiteralTooSmall { line } => {
                write!(f, "Error on line {line}: Literal is too small.")
            },
            Self::RealIsFractional { line } => write!(f,
                                                      "Error on line {line}: Value is fractional and cannot be safely converted to an integer."),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            _ => None,
        }
    }
}
