use std::iter::Peekable;

use crate::{
    ast::{Expression, Statement},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            function::parse_type,
            utils::{expect, expect_terminator, parse_identifier, peek_is},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `let` binding.
/// - a `return` statement.
/// - a `for` loop.
/// - an `if` statement.
/// - an assignment to a variable or an array element.
/// - an expression used as a statement.
///
/// The leading keyword selects the form. Assignments are recognised by a
/// lookahead of one token past the leading identifier; everything else is
/// parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Position)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.peek() {
        Some((Token::Let, _)) => return parse_let(tokens),
        Some((Token::Return, _)) => return parse_return(tokens),
        Some((Token::For, _)) => return parse_for(tokens),
        Some((Token::If, _)) => return parse_if(tokens),
        _ => {},
    }

    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let expr = parse_expression(tokens)?;
    expect_terminator(tokens)?;
    Ok(Statement::Expression(expr))
}

/// Parses a variable binding.
///
/// Grammar: `let := "let" identifier (":" type)? "=" expression ";"`
///
/// # Returns
/// A [`Statement::Let`] carrying the optional type annotation.
fn parse_let<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::Let)?;
    let name = parse_identifier(tokens)?;

    let ty = if peek_is(tokens, &Token::Colon) {
        tokens.next();
        Some(parse_type(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Statement::Let { name, ty, value })
}

/// Parses a return statement.
///
/// A bare `return;` returns the integer `0`.
///
/// Grammar: `return := "return" expression? ";"`
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::Return)?;

    let value = if peek_is(tokens, &Token::Semicolon) || peek_is(tokens, &Token::RBrace) {
        Expression::IntLiteral(0)
    } else {
        parse_expression(tokens)?
    };
    expect_terminator(tokens)?;

    Ok(Statement::Return(value))
}

/// Parses a counted loop.
///
/// The range is half-open. Both bounds are ordinary expressions; the end
/// bound is re-evaluated before each iteration.
///
/// Grammar: `for := "for" identifier "in" expression ".." expression block`
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::For)?;
    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::In)?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::DotDot)?;
    let end = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::For { var, start, end, body })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// `else if` is accepted and becomes an else branch holding a single nested
/// `if` statement.
///
/// Grammar:
/// ```text
///     if := "if" expression block ("else" (if | block))?
/// ```
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::If)?;
    let condition = parse_expression(tokens)?;
    let then_body = parse_block(tokens)?;

    let else_body = if peek_is(tokens, &Token::Else) {
        tokens.next();
        if peek_is(tokens, &Token::If) {
            Some(vec![parse_if(tokens)?])
        } else {
            Some(parse_block(tokens)?)
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_body,
                       else_body })
}

/// Attempts to parse an assignment statement.
///
/// An identifier followed by `=` or `[` starts an assignment. Any other
/// continuation rewinds the iterator so the caller can parse an expression
/// statement from the same identifier.
///
/// Grammar:
/// ```text
///     assignment := identifier ("[" expression "]")? "=" expression ";"
/// ```
///
/// # Returns
/// - `Ok(Some(statement))` if an assignment was parsed,
/// - `Ok(None)` if the statement is not an assignment.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !peek_is(tokens, &Token::Identifier(String::new())) {
        return Ok(None);
    }

    let checkpoint = tokens.clone();
    let target = parse_identifier(tokens)?;

    let index = match tokens.peek() {
        Some((Token::Equals, _)) => None,
        Some((Token::LBracket, _)) => {
            tokens.next();
            let index = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket)?;
            Some(Box::new(index))
        },
        _ => {
            *tokens = checkpoint;
            return Ok(None);
        },
    };

    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Some(Statement::Assign { target, index, value }))
}
