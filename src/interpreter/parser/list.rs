use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{is_keyword, skip_separators},
        },
        registry::Registry,
    },
};

/// Parses a parenthesised group after its `(`.
///
/// When the group starts with a command name, the group is a call that takes
/// every expression up to the matching `)` as an input, whatever the
/// command's normal arity:
/// ```text
///     (sum 1 2 3)
///     (print "a "b "c)
/// ```
/// Otherwise the parentheses just group a single expression, as in
/// `(1 + 2) * 3`.
///
/// # Errors
/// - `UnknownCommand` if the leading word has no registered arity.
/// - `ExpectedClosingParen` if the input ends before `)`.
pub fn parse_group<'a, I>(tokens: &mut Peekable<I>,
                          registry: &mut Registry,
                          line: usize)
                          -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    skip_separators(tokens);

    let call_name = match tokens.peek() {
        Some((Token::Procedure(name), _)) if !is_keyword(name) => Some(name.clone()),
        _ => None,
    };

    let node = if let Some(name) = call_name {
        tokens.next();
        if registry.lookup_arity(&name).is_none() {
            return Err(ParseError::UnknownCommand { name, line });
        }

        let mut arguments = Vec::new();
        loop {
            skip_separators(tokens);
            match tokens.peek() {
                Some((Token::RParen, _)) => break,
                Some((Token::Eof, _)) | None => {
                    return Err(ParseError::ExpectedClosingParen { line });
                },
                Some(_) => arguments.push(parse_expression(tokens, registry, 0)?),
            }
        }

        Node::ProcedureCall { name: name.to_lowercase(),
                              arguments,
                              line }
    } else {
        let inner = parse_expression(tokens, registry, 0)?;
        skip_separators(tokens);
        inner
    };

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(node),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a bracketed list after its `[`.
///
/// Nothing inside a list is evaluated. Every token becomes a word holding its
/// source text, so `[print "yes]` is the two words `print` and `"yes`, and
/// nested brackets become nested lists. Line breaks and comments inside a
/// list only separate words.
///
/// # Errors
/// `ExpectedClosingBracket` (pointing at the opening bracket) if the input
/// ends before `]`.
pub fn parse_list<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut elements = Vec::new();

    loop {
        match tokens.next() {
            Some((Token::RBracket, _)) => break,
            Some((Token::LBracket, position)) => elements.push(parse_list(tokens, position.line)?),
            Some((Token::NewLine | Token::Semicolon, _)) => {},
            Some((Token::Eof, _)) | None => {
                return Err(ParseError::ExpectedClosingBracket { line });
            },
            Some((token, position)) => {
                elements.push(Node::StringLiteral { value: token.to_string(),
                                                    line:  position.line, });
            },
        }
    }

    Ok(Node::List { elements, line })
}
