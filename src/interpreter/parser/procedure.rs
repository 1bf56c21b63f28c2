use std::iter::Peekable;

use crate::{
    ast::{ConditionalKind, Node, ProcedureDef, Program},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{at_terminator, is_keyword, peek_line, skip_separators},
        },
        registry::{Arity, Registry},
    },
};

/// Parses a call written without parentheses.
///
/// The registry says how many inputs `name` takes; that many expressions are
/// parsed, stopping early at the end of the line or at a closing bracket or
/// parenthesis. A command with nothing after it therefore gets no inputs,
/// and the evaluator decides whether that is enough.
///
/// # Errors
/// - `UnknownCommand` if `name` has no registered arity.
/// - Propagates errors from the argument expressions.
pub fn parse_procedure_call<'a, I>(tokens: &mut Peekable<I>,
                                   registry: &mut Registry,
                                   name: &str,
                                   line: usize)
                                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let arity = match registry.lookup_arity(name) {
        Some(Arity::Fixed(n)) => n,
        Some(Arity::Special) => {
            return Err(ParseError::UnexpectedToken { token: name.to_string(),
                                                     line });
        },
        None => {
            return Err(ParseError::UnknownCommand { name: name.to_string(),
                                                    line });
        },
    };

    let mut arguments = Vec::with_capacity(arity);
    while arguments.len() < arity && !at_terminator(tokens) {
        arguments.push(parse_expression(tokens, registry, 0)?);
    }

    Ok(Node::ProcedureCall { name: name.to_lowercase(),
                             arguments,
                             line })
}

/// Parses a procedure definition after the `to` keyword.
///
/// Syntax:
/// ```text
///     to NAME :input1 :input2 ...
///         instructions...
///     end
/// ```
/// The arity is registered as soon as the inputs are read, before the body,
/// so the body may call the procedure recursively.
///
/// # Errors
/// - `InvalidProcedureDefinition` if the name is missing, is not a word, or
///   names a primitive or reserved word.
/// - `MissingEnd` if the input runs out before `end`.
pub fn parse_procedure_definition<'a, I>(tokens: &mut Peekable<I>,
                                         registry: &mut Registry,
                                         line: usize)
                                         -> ParseResult<ProcedureDef>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let name = match tokens.next() {
        Some((Token::Procedure(name), _)) => name.to_lowercase(),
        Some((Token::Eof | Token::NewLine, _)) | None => {
            return Err(ParseError::InvalidProcedureDefinition { details:
                                                                    "missing procedure name".to_string(),
                                                                line });
        },
        Some((token, _)) => {
            return Err(ParseError::InvalidProcedureDefinition { details:
                                                                    format!("{token} is not a valid procedure name"),
                                                                line });
        },
    };

    if is_keyword(&name) || registry.is_primitive(&name) {
        return Err(ParseError::InvalidProcedureDefinition { details:
                                                                format!("{name} is already defined"),
                                                            line });
    }

    let mut params = Vec::new();
    while let Some((Token::Variable(param), _)) = tokens.peek() {
        params.push(param.to_lowercase());
        tokens.next();
    }

    registry.register(&name, Arity::Fixed(params.len()));
    tracing::debug!(name = %name, inputs = params.len(), "registered procedure");

    let mut body = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::Procedure(word), _)) if word.eq_ignore_ascii_case("end") => {
                tokens.next();
                break;
            },
            Some((Token::Eof, _)) | None => return Err(ParseError::MissingEnd { name, line }),
            Some(_) => body.push(parse_expression(tokens, registry, 0)?),
        }
    }

    Ok(ProcedureDef { name,
                      params,
                      body: Program { body },
                      line })
}

/// Parses an `if` or `ifelse` form after its keyword.
///
/// Syntax:
/// ```text
///     if condition [instructions]
///     ifelse condition [instructions] [instructions]
/// ```
/// The branches are usually bracketed lists. They are kept as list nodes
/// and only run by the evaluator once the condition is known.
///
/// # Errors
/// - `UnexpectedEndOfInput` if a branch is missing at the end of input.
/// - Propagates errors from the sub-expressions.
pub fn parse_conditional<'a, I>(tokens: &mut Peekable<I>,
                                registry: &mut Registry,
                                kind: ConditionalKind,
                                line: usize)
                                -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let condition = parse_branch(tokens, registry, line)?;
    let then_branch = parse_branch(tokens, registry, line)?;
    let else_branch = match kind {
        ConditionalKind::IfElse => Some(Box::new(parse_branch(tokens, registry, line)?)),
        ConditionalKind::If => None,
    };

    Ok(Node::Conditional { kind,
                           condition: Box::new(condition),
                           then_branch: Box::new(then_branch),
                           else_branch,
                           line })
}

fn parse_branch<'a, I>(tokens: &mut Peekable<I>,
                       registry: &mut Registry,
                       line: usize)
                       -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    if matches!(tokens.peek(), Some((Token::Eof, _)) | None) {
        return Err(ParseError::UnexpectedEndOfInput { line: peek_line(tokens).max(line) });
    }
    parse_expression(tokens, registry, 0)
}
