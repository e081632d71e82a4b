use std::iter::Peekable;

use crate::{
    ast::{Domain, Function, Param, Type},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            block::parse_block,
            core::ParseResult,
            utils::{expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
};

/// Parses a function declaration.
///
/// An optional domain annotation may precede `fn`. Unknown annotations never
/// reach the parser; the lexer drops them.
///
/// Grammar:
/// ```text
///     function := annotation? "fn" identifier "(" params ")" "->" type block
///     params   := (param ("," param)*)?
///     param    := identifier ":" type
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned at the annotation or `fn` keyword.
///
/// # Returns
/// The parsed [`Function`].
///
/// # Errors
/// Returns a `ParseError` if any part of the header or body is malformed.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Function>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let domain = match tokens.peek() {
        Some((Token::GpuAnnotation, _)) => {
            tokens.next();
            Domain::Gpu
        },
        Some((Token::QuantumAnnotation, _)) => {
            tokens.next();
            Domain::Quantum
        },
        _ => Domain::Classical,
    };

    expect(tokens, &Token::Fn)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_param, &Token::RParen)?;
    expect(tokens, &Token::Arrow)?;
    let return_type = parse_type(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Function { name,
                  params,
                  return_type,
                  body,
                  domain })
}

fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let ty = parse_type(tokens)?;
    Ok(Param { name, ty })
}

/// Parses a type annotation.
///
/// Grammar:
/// ```text
///     type := "int" | "float" | "bool" | "qubit" | "void" | "qstate"
///           | "tensor" "<" type ">"
///           | "[" type (";" integer)? "]"
/// ```
///
/// # Errors
/// Returns `InvalidArraySize` if a fixed array size does not fit in `usize`.
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let Some((token, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "type".to_string() });
    };

    match token {
        Token::Int => Ok(Type::Int),
        Token::Float => Ok(Type::Float),
        Token::Bool => Ok(Type::Bool),
        Token::Qubit => Ok(Type::Qubit),
        Token::Void => Ok(Type::Void),
        Token::QState => Ok(Type::QState),
        Token::Tensor => {
            expect(tokens, &Token::Less)?;
            let element = parse_type(tokens)?;
            expect(tokens, &Token::Greater)?;
            Ok(Type::Tensor(Box::new(element)))
        },
        Token::LBracket => {
            let element = parse_type(tokens)?;
            let size = match tokens.next() {
                Some((Token::RBracket, _)) => return Ok(Type::Array(Box::new(element), None)),
                Some((Token::Semicolon, _)) => parse_array_size(tokens)?,
                Some((tok, position)) => return Err(unexpected("';' or ']'", tok, *position)),
                None => {
                    return Err(ParseError::UnexpectedEndOfInput { expected: "']'".to_string() });
                },
            };
            expect(tokens, &Token::RBracket)?;
            Ok(Type::Array(Box::new(element), Some(size)))
        },
        tok => Err(unexpected("type", tok, *position)),
    }
}

fn parse_array_size<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<usize>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.next() {
        Some((Token::IntLiteral(n), position)) => {
            usize::try_from(*n).map_err(|_| ParseError::InvalidArraySize { size:   *n,
                                                                            line:   position.line,
                                                                            column: position.column, })
        },
        Some((tok, position)) => Err(unexpected("array size", tok, *position)),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "array size".to_string() }),
    }
}
