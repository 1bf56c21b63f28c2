use std::iter::Peekable;

use crate::{
    ast::BinaryOperator,
    interpreter::lexer::{Position, Token},
};

/// Words the parser handles itself instead of looking them up as commands.
pub const KEYWORDS: &[&str] = &["to", "end", "if", "ifelse", "true", "false"];

/// Returns `true` if `name` is a reserved word, ignoring case.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(name))
}

/// Maps an operator token to its `BinaryOperator`.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Skips newlines and comments between instructions.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Position)>
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Returns `true` when the next token ends an arity-driven argument list.
///
/// Arguments stop at the end of a line, a comment, the end of input, or a
/// closing `)` or `]` that belongs to an enclosing construct.
pub(in crate::interpreter::parser) fn at_terminator<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, Position)>
{
    matches!(tokens.peek(),
             None
             | Some((Token::NewLine
                     | Token::Semicolon
                     | Token::Eof
                     | Token::RParen
                     | Token::RBracket,
                     _)))
}

/// Line of the next token, or `0` when the stream is exhausted.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, Position)>
{
    tokens.peek().map_or(0, |(_, position)| position.line)
}
