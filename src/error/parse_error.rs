use crate::error::LexError;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The source could not be tokenized.
    Lex(LexError),
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line of the opening parenthesis.
        line: usize,
    },
    /// A closing bracket `]` was expected but not found.
    ExpectedClosingBracket {
        /// The source line of the opening bracket.
        line: usize,
    },
    /// A word was used as a command but has no registered arity.
    UnknownCommand {
        /// The command name as written.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The `to` syntax was invalid.
    InvalidProcedureDefinition {
        /// Details about what is missing.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A procedure body ran to the end of input without `end`.
    MissingEnd {
        /// The name of the procedure being defined.
        name: String,
        /// The source line of the `to` keyword.
        line: usize,
    },
}

impl ParseError {
    /// The source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line,
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedClosingParen { line }
            | Self::ExpectedClosingBracket { line }
            | Self::UnknownCommand { line, .. }
            | Self::InvalidProcedureDefinition { line, .. }
            | Self::MissingEnd { line, .. } => *line,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::ExpectedClosingBracket { line } => write!(f,
                                                            "Error on line {line}: Expected closing bracket ']' but none found."),

            Self::UnknownCommand { name, line } => {
                write!(f, "Error on line {line}: I don't know how to {name}.")
            },

            Self::InvalidProcedureDefinition { details, line } => write!(f,
                                                                         "Error on line {line}: Invalid procedure definition: {details}. Example: to double :n output :n * 2 end"),

            Self::MissingEnd { name, line } => write!(f,
                                                      "Error on line {line}: Procedure '{name}' is missing 'end'."),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            _ => None,
        }
    }
}
