use logos::Logos;

use crate::error::{LexError, LexErrorKind};

/// Represents a lexical token in the source input.
///
/// Logo words come in three flavours that the lexer can tell apart from their
/// first character: `"word` is a quoted word, `:word` reads a variable, and a
/// bare word names a procedure (or a keyword, which the parser decides).
/// Words carry their decoded text, with escape backslashes removed.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2.`, kept as
    /// written so that `[007]` stays `007` inside a list.
    #[regex(r"[0-9]+(\.[0-9]*)?", numeral)]
    #[regex(r"\.[0-9]+", numeral)]
    #[regex(r"[0-9]*\.[0-9]*\.[0-9.]*", malformed_number)]
    Number(String),
    /// Quoted word tokens, such as `"hello`.
    #[regex(r#""([A-Za-z0-9_.?']|\\.)*"#, decode_prefixed_word, allow_greedy = true)]
    Word(String),
    /// Variable reference tokens, such as `:size`.
    #[regex(r":([A-Za-z0-9_.?']|\\.)+", decode_prefixed_word, allow_greedy = true)]
    Variable(String),
    /// Bare word tokens, such as `print`, `to` or `.setfirst`.
    #[regex(r"([A-Za-z_?#]|\.[A-Za-z_]|\\.)([A-Za-z0-9_.?']|\\.)*", decode_word, allow_greedy = true)]
    Procedure(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `; comments` run to the end of the line.
    #[regex(r";[^\n]*", allow_greedy = true)]
    Semicolon,
    /// `~` marks a continued line. The rest of the physical line is dropped
    /// and the lines are not joined.
    #[regex(r"~[^\n]*", logos::skip, allow_greedy = true)]
    Continuation,
    /// Line breaks terminate arity-driven argument lists.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
    })]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by logos; appended by [`tokenize`].
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where it starts, so
/// that every token can be given a line and column.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

/// Where a token starts in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number.
    pub column: usize,
}

/// Tokenizes a complete source text.
///
/// The returned stream always ends with exactly one [`Token::Eof`]. Newlines
/// are kept as [`Token::NewLine`] because they terminate argument lists.
///
/// # Errors
/// Returns a [`LexError`] for an unknown character or a number with more than
/// one decimal point.
///
/// # Example
/// ```
/// use logoscript::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("print :x + 1").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Procedure("print".into()),
///                 Token::Variable("x".into()),
///                 Token::Plus,
///                 Token::Number("1".into()),
///                 Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source,
                                             LexerExtras { line:       1,
                                                           line_start: 0, });

    loop {
        // Read before advancing: a newline token moves both forward.
        let line = lexer.extras.line;
        let line_start = lexer.extras.line_start;
        let Some(token) = lexer.next() else { break };

        let position = if token == Ok(Token::NewLine) {
            Position { line, column: 0 }
        } else {
            Position { line,
                       column: column_of(source, line_start, lexer.span().start) }
        };

        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(kind) => {
                let kind = match kind {
                    LexErrorKind::UnrecognizedInput => {
                        lexer.slice()
                             .chars()
                             .next()
                             .map_or(LexErrorKind::UnrecognizedInput,
                                     LexErrorKind::UnknownCharacter)
                    },
                    other => other,
                };
                return Err(LexError { kind,
                                      line: position.line,
                                      column: position.column });
            },
        }
    }

    let end = Position { line:   lexer.extras.line,
                         column: column_of(source, lexer.extras.line_start, source.len()), };
    tokens.push((Token::Eof, end));

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// 1-based column of the byte offset `at`, counted in characters.
fn column_of(source: &str, line_start: usize, at: usize) -> usize {
    source.get(line_start..at)
          .map_or(0, |text| text.chars().count())
          + 1
}

/// Returns `true` for characters that may appear unescaped inside a word.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '?' | '\'')
}

/// Escapes a decoded word so that it lexes back to the same text.
///
/// Every character that would end a word is prefixed with a backslash.
///
/// # Example
/// ```
/// use logoscript::interpreter::lexer::escape_word;
///
/// assert_eq!(escape_word("hello"), "hello");
/// assert_eq!(escape_word("a b"), "a\\ b");
/// ```
#[must_use]
pub fn escape_word(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for c in word.chars() {
        if !is_word_char(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl std::fmt::Display for Token {
    /// Writes the token the way it would appear in source code.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(text) => f.write_str(text),
            Self::Word(w) => write!(f, "\"{}", escape_word(w)),
            Self::Variable(v) => write!(f, ":{}", escape_word(v)),
            Self::Procedure(p) => match p.strip_prefix('#') {
                Some(rest) => write!(f, "#{}", escape_word(rest)),
                None => write!(f, "{}", escape_word(p)),
            },
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "<>"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Semicolon => write!(f, ";"),
            Self::Continuation => write!(f, "~"),
            Self::NewLine => writeln!(f),
            Self::Ignored => write!(f, " "),
            Self::Eof => write!(f, "<EOF>"),
        }
    }
}

/// Checks a numeric literal and keeps its source text.
fn numeral(lex: &logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let text = lex.slice();
    text.parse::<f64>()
        .map(|_| text.to_string())
        .map_err(|_| LexErrorKind::MalformedNumber(text.to_string()))
}

/// Rejects a numeric literal with more than one decimal point.
fn malformed_number(lex: &logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::MalformedNumber(lex.slice().to_string()))
}

/// Decodes a `"word` or `:word`, dropping the prefix character.
fn decode_prefixed_word(lex: &logos::Lexer<Token>) -> String {
    unescape(&lex.slice()[1..])
}

/// Decodes a bare word.
fn decode_word(lex: &logos::Lexer<Token>) -> String {
    unescape(lex.slice())
}

/// Removes escape backslashes, keeping the escaped characters verbatim.
fn unescape(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                decoded.push(escaped);
            }
        } else {
            decoded.push(c);
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn single_literals_decode_exactly() {
        assert_eq!(kinds("\"word"), vec![Token::Word("word".into()), Token::Eof]);
        assert_eq!(kinds(":var"), vec![Token::Variable("var".into()), Token::Eof]);
        assert_eq!(kinds("123"), vec![Token::Number("123".into()), Token::Eof]);
        assert_eq!(kinds("12.5"), vec![Token::Number("12.5".into()), Token::Eof]);
        assert_eq!(kinds(".5"), vec![Token::Number(".5".into()), Token::Eof]);
    }

    #[test]
    fn two_decimal_points_is_an_error() {
        let err = tokenize("print 1.2.3").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::MalformedNumber("1.2.3".into()));
        assert_eq!((err.line, err.column), (1, 7));
    }

    #[test]
    fn unknown_character_reports_position() {
        let err = tokenize("print 1\nprint $").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnknownCharacter('$'));
        assert_eq!((err.line, err.column), (2, 7));
    }

    #[test]
    fn comparison_operators_use_lookahead() {
        assert_eq!(kinds("1 <= 2 >= 3 <> 4 < 5 > 6 = 7"),
                   vec![Token::Number("1".into()),
                        Token::LessEqual,
                        Token::Number("2".into()),
                        Token::GreaterEqual,
                        Token::Number("3".into()),
                        Token::NotEqual,
                        Token::Number("4".into()),
                        Token::Less,
                        Token::Number("5".into()),
                        Token::Greater,
                        Token::Number("6".into()),
                        Token::Equal,
                        Token::Number("7".into()),
                        Token::Eof]);
    }

    #[test]
    fn newlines_are_kept_and_stream_ends_with_one_eof() {
        let tokens = kinds("print 1\n\nprint 2\n");
        assert_eq!(tokens.iter().filter(|t| **t == Token::NewLine).count(), 3);
        assert_eq!(tokens.iter().filter(|t| **t == Token::Eof).count(), 1);
        assert_eq!(tokens.last(), Some(&Token::Eof));
    }

    #[test]
    fn comment_emits_semicolon_and_skips_line() {
        assert_eq!(kinds("print 1 ; print 2\nprint 3"),
                   vec![Token::Procedure("print".into()),
                        Token::Number("1".into()),
                        Token::Semicolon,
                        Token::NewLine,
                        Token::Procedure("print".into()),
                        Token::Number("3".into()),
                        Token::Eof]);
    }

    #[test]
    fn continuation_drops_rest_of_physical_line() {
        assert_eq!(kinds("print ~ ignored\n1"),
                   vec![Token::Procedure("print".into()),
                        Token::NewLine,
                        Token::Number("1".into()),
                        Token::Eof]);
    }

    #[test]
    fn backslash_escapes_word_terminators() {
        assert_eq!(kinds(r#""a\ b\]c"#), vec![Token::Word("a b]c".into()), Token::Eof]);
    }

    #[test]
    fn brackets_terminate_words() {
        assert_eq!(kinds("[print \"yes]"),
                   vec![Token::LBracket,
                        Token::Procedure("print".into()),
                        Token::Word("yes".into()),
                        Token::RBracket,
                        Token::Eof]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("make \"x 1\n  print :x").unwrap();
        let print = &tokens[4];
        assert_eq!(print.0, Token::Procedure("print".into()));
        assert_eq!(print.1, Position { line: 2, column: 3 });
    }

    #[test]
    fn newline_position_is_on_the_line_it_ends() {
        let tokens = tokenize("print 1\nprint 2").unwrap();
        assert_eq!(tokens[2], (Token::NewLine, Position { line: 1, column: 0 }));
        assert_eq!(tokens[3].1, Position { line: 2, column: 1 });
        assert_eq!(tokens.last().map(|t| t.1), Some(Position { line: 2, column: 8 }));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens = tokenize("\"\\\u{e9} x").unwrap();
        assert_eq!(tokens[0].0, Token::Word("\u{e9}".into()));
        assert_eq!(tokens[1], (Token::Procedure("x".into()), Position { line: 1, column: 5 }));
    }

    #[test]
    fn escape_word_round_trips_through_lexer() {
        let word = "a b";
        let source = format!("\"{}", escape_word(word));
        assert_eq!(kinds(&source), vec![Token::Word(word.into()), Token::Eof]);
    }
}
