/// Parser entry points.
///
/// Defines the result alias, the whole-program entry point and the
/// expression entry point that the other parser modules recurse through.
pub mod core;

/// Function declaration parsing.
///
/// Handles domain annotations, parameter lists and type annotations.
pub mod function;

/// Block parsing.
///
/// Parses brace-delimited statement lists.
pub mod block;

/// Statement parsing.
///
/// Parses `let`, `return`, `for`, `if`, assignments and expression statements.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence levels from logical OR down to multiplication.
pub mod binary;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix operators, indexing, calls, literals, grouping, array
/// literals and `map`.
pub mod unary;

/// Shared parsing helpers.
///
/// Token expectations, identifiers and comma-separated lists.
pub mod utils;
