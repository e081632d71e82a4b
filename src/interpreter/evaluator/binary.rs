/// Operator routing.
pub mod core;

/// `+ - * / %` on numbers.
pub mod arithmetic;

/// Equality and ordering.
pub mod comparison;

/// `&&` and `||`.
pub mod logic;
