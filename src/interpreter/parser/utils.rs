use std::{iter::Peekable, mem::discriminant};

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Spanned, Token},
        parser::core::ParseResult,
    },
};

/// Builds the error for a token that does not fit the grammar.
pub(in crate::interpreter::parser) fn unexpected(expected: impl Into<String>,
                                                 found: &Token,
                                                 position: Position)
                                                 -> ParseError {
    ParseError::UnexpectedToken { expected: expected.into(),
                                  found:    found.to_string(),
                                  line:     position.line,
                                  column:   position.column, }
}

/// Returns `true` if the next token has the same kind as `expected`.
///
/// Literal payloads are ignored, so any identifier matches
/// `Token::Identifier(String::new())`.
pub(in crate::interpreter::parser) fn peek_is<'a, I>(tokens: &mut Peekable<I>,
                                                     expected: &Token)
                                                     -> bool
    where I: Iterator<Item = &'a Spanned>
{
    tokens.peek()
          .is_some_and(|(tok, _)| discriminant(tok) == discriminant(expected))
}

/// Consumes the next token, requiring it to have the kind of `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns `UnexpectedToken` naming both the expected and the found token, or
/// `UnexpectedEndOfInput` if the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((tok, position)) if discriminant(tok) == discriminant(expected) => Ok(*position),
        Some((tok, position)) => Err(unexpected(expected.to_string(), tok, *position)),
        None => Err(ParseError::UnexpectedEndOfInput { expected: expected.to_string() }),
    }
}

/// Consumes a statement terminator.
///
/// A `;` is required unless the statement is the last one in its block, in
/// which case the closing `}` may follow directly. The brace is not consumed.
pub(in crate::interpreter::parser) fn expect_terminator<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<()>
    where I: Iterator<Item = &'a Spanned>
{
    if peek_is(tokens, &Token::RBrace) {
        return Ok(());
    }
    expect(tokens, &Token::Semicolon).map(|_| ())
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, position)) => Err(unexpected("identifier", tok, *position)),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "identifier".to_string() }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by parameter lists, argument lists and array
/// literals. It repeatedly calls `parse_item` to parse one element,
/// expecting either a comma to continue the list or `closing` to end it.
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items. The closing token is consumed.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    if peek_is(tokens, closing) {
        tokens.next();
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => {
                return Err(unexpected(format!("',' or {closing}"), tok, *position));
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: closing.to_string() });
            },
        }
    }
    Ok(items)
}
