use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, ConditionalKind, Node, Program},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            list::{parse_group, parse_list},
            procedure::{parse_conditional, parse_procedure_call, parse_procedure_definition},
            utils::{skip_separators, token_to_binary_operator},
        },
        registry::Registry,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a [`Program`].
///
/// Newlines and comments between instructions are skipped; parsing stops at
/// the end-of-input token. `to` definitions register their arity in
/// `registry` as soon as their inputs are known, so later instructions (and
/// the procedure's own body) can call them.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use logoscript::{
///     ast::{Node, BinaryOperator},
///     interpreter::{lexer::tokenize, parser::core::parse, registry::Registry},
/// };
///
/// let mut registry = Registry::with_primitives();
/// let tokens = tokenize("1 + 2").unwrap();
/// let program = parse(&tokens, &mut registry).unwrap();
///
/// assert!(matches!(program.body[0],
///                  Node::InfixOperation { op: BinaryOperator::Add, .. }));
/// ```
pub fn parse(tokens: &[(Token, Position)], registry: &mut Registry) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut body = Vec::new();

    loop {
        skip_separators(&mut iter);
        match iter.peek() {
            None | Some((Token::Eof, _)) => break,
            Some(_) => body.push(parse_expression(&mut iter, registry, 0)?),
        }
    }

    tracing::trace!(nodes = body.len(), "parsed program");
    Ok(Program { body })
}

/// Parses one expression, consuming infix operators that bind tighter than
/// `min_precedence`.
///
/// This is a precedence-climbing loop: the right operand of each operator is
/// parsed with that operator's own precedence as the new floor, which makes
/// operators of equal precedence associate to the left.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
/// - `registry`: Command arities, consulted for procedure calls.
/// - `min_precedence`: Operators at or below this precedence are left for the
///   caller. `0` parses a full expression.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               registry: &mut Registry,
                               min_precedence: u8)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_primary(tokens, registry)?;

    while let Some((token, position)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && op.precedence() > min_precedence
    {
        let line = position.line;
        tokens.next();
        let right = parse_expression(tokens, registry, op.precedence())?;
        left = Node::InfixOperation { op,
                                      left: Box::new(left),
                                      right: Box::new(right),
                                      line };
    }

    Ok(left)
}

/// Parses a single operand: a literal, a variable, a group, a list, or
/// anything introduced by a bare word.
///
/// A leading `-` negates the operand that follows it and binds tighter than
/// every infix operator.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, registry: &mut Registry) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let Some((token, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = position.line;

    match token {
        Token::Number(text) => {
            text.parse()
                .map(|value| Node::NumberLiteral { value, line })
                .map_err(|_| ParseError::UnexpectedToken { token: text.clone(),
                                                           line })
        },
        Token::Word(value) => Ok(Node::StringLiteral { value: value.clone(),
                                                       line }),
        Token::Variable(name) => Ok(Node::Variable { name: name.to_lowercase(),
                                                     line }),
        Token::Minus => {
            let operand = parse_primary(tokens, registry)?;
            Ok(Node::InfixOperation { op: BinaryOperator::Sub,
                                      left: Box::new(Node::NumberLiteral { value: 0.0,
                                                                           line }),
                                      right: Box::new(operand),
                                      line })
        },
        Token::LParen => parse_group(tokens, registry, line),
        Token::LBracket => parse_list(tokens, line),
        Token::Procedure(name) => parse_word(tokens, registry, name, line),
        Token::Eof => Err(ParseError::UnexpectedEndOfInput { line }),
        Token::NewLine => Err(ParseError::UnexpectedToken { token: "end of line".to_string(),
                                                            line }),
        other => Err(ParseError::UnexpectedToken { token: other.to_string(),
                                                   line }),
    }
}

/// Dispatches a bare word on its (case-insensitive) text.
fn parse_word<'a, I>(tokens: &mut Peekable<I>,
                     registry: &mut Registry,
                     name: &str,
                     line: usize)
                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match name.to_lowercase().as_str() {
        "to" => Ok(Node::ProcedureDefinition(parse_procedure_definition(tokens, registry, line)?)),
        "if" => parse_conditional(tokens, registry, ConditionalKind::If, line),
        "ifelse" => parse_conditional(tokens, registry, ConditionalKind::IfElse, line),
        "true" => Ok(Node::Boolean { value: true,
                                     line }),
        "false" => Ok(Node::Boolean { value: false,
                                      line }),
        "end" => Err(ParseError::UnexpectedToken { token: name.to_string(),
                                                   line }),
        _ => parse_procedure_call(tokens, registry, name, line),
    }
}
