use std::iter::Peekable;

use crate::{
    ast::{Expression, Program},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{binary::parse_logical_or, function::parse_function},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token sequence into a [`Program`].
///
/// The sequence is consumed function by function until the end-of-input
/// token. Parsing is single pass with one token of lookahead; the first error
/// aborts and is returned.
///
/// Grammar: `program := function* EOF`
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The parsed program.
///
/// # Example
/// ```
/// use quarkdsl::{
///     ast::Domain,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("@quantum fn bell() -> int { h(0); return measure(0); }").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.functions.len(), 1);
/// assert_eq!(program.functions[0].domain, Domain::Quantum);
/// ```
pub fn parse(tokens: &[Spanned]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut functions = Vec::new();

    while let Some((token, _)) = iter.peek() {
        if *token == Token::EndOfInput {
            break;
        }
        functions.push(parse_function(&mut iter)?);
    }

    Ok(Program { functions })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_logical_or(tokens)
}
