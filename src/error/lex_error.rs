/// The reason a piece of input could not be tokenized.
///
/// This is also the error type of the `logos` lexer, which is why it needs a
/// `Default`: logos produces the default value for input no rule matches.
/// The tokenizer replaces it with the offending character afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[default]
    UnrecognizedInput,
    /// A character that starts no token, once it is known.
    UnknownCharacter(char),
    /// A number with more than one decimal point, such as `1.2.3`.
    MalformedNumber(String),
}

/// A tokenizer failure with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub kind:   LexErrorKind,
    /// The source line (1-based).
    pub line:   usize,
    /// The source column (1-based).
    pub column: usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { kind, line, column } = self;
        match kind {
            LexErrorKind::UnrecognizedInput => {
                write!(f, "Error on line {line}:{column}: Unrecognized input.")
            },
            LexErrorKind::UnknownCharacter(c) => {
                write!(f, "Error on line {line}:{column}: Unknown token '{c}'.")
            },
            LexErrorKind::MalformedNumber(text) => write!(f,
                                                          "Error on line {line}:{column}: Invalid number '{text}' - multiple decimals found."),
        }
    }
}

impl std::error::Error for LexError {}
