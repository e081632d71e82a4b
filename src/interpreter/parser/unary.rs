use std::iter::Peekable;

use crate::{
    ast::{Expression, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expression::Unary`] or a primary expression possibly followed by
/// postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Bang, _)) => UnaryOperator::Not,
        _ => {
            let primary = parse_primary(tokens)?;
            return parse_postfix(tokens, primary);
        },
    };

    tokens.next();
    let operand = parse_unary(tokens)?;
    Ok(Expression::Unary { op,
                           operand: Box::new(operand) })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric and boolean literals
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - `map(f, array)`
///
/// Calls and indexing are applied afterwards by [`parse_postfix`].
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
///              | "map" "(" identifier "," expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expression`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let Some((token, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "expression".to_string() });
    };

    match token {
        Token::IntLiteral(n) => Ok(Expression::IntLiteral(*n)),
        Token::FloatLiteral(n) => Ok(Expression::FloatLiteral(*n)),
        Token::BoolLiteral(b) => Ok(Expression::BoolLiteral(*b)),
        Token::Identifier(name) => Ok(Expression::Variable(name.clone())),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Token::LBracket => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expression::ArrayLiteral(elements))
        },
        Token::Map => parse_map(tokens),
        tok => Err(unexpected("expression", tok, *position)),
    }
}

/// Parses postfix operations applied to a primary expression.
///
/// Indexing may follow any expression and chains, so `grid[i][j]` indexes
/// twice. A call is only recognised directly after a plain identifier; the
/// identifier becomes the callee name.
///
/// Grammar:
/// ```text
///     postfix := "[" expression "]"
///              | "(" arguments ")"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the primary expression.
/// - `expr`: The expression to which postfix operations apply.
///
/// # Returns
/// The expression with all postfix operations applied.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>,
                                   mut expr: Expression)
                                   -> ParseResult<Expression>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LBracket, _)) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket)?;
                expr = Expression::Index { array: Box::new(expr),
                                           index: Box::new(index), };
            },
            Some((Token::LParen, _)) => {
                let Expression::Variable(name) = &expr else {
                    break;
                };
                let function = name.clone();
                tokens.next();
                let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expr = Expression::Call { function, args };
            },
            _ => break,
        }
    }
    Ok(expr)
}

/// Parses the `map` builtin form after its keyword.
///
/// The first argument must be a bare function name; it is not evaluated.
///
/// Grammar: `map := "map" "(" identifier "," expression ")"`
fn parse_map<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::LParen)?;
    let function = parse_identifier(tokens)?;
    expect(tokens, &Token::Comma)?;
    let array = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    Ok(Expression::Map { function,
                         array: Box::new(array) })
}
