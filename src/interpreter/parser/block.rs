use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{core::ParseResult, statement::parse_statement, utils::expect},
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` token is encountered, which is consumed.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The statements of the block, in order.
///
/// # Errors
/// Returns `UnexpectedEndOfInput` if the input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::LBrace)?;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::EndOfInput, _)) | None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string() });
            },
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}
