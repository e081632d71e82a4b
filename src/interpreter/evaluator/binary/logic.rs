use crate::{ast::BinaryOperator, interpreter::value::core::Value};

/// Evaluates a logical operation on the truthiness of two values.
///
/// Both operands have already been evaluated; there is no short-circuiting
/// at this level.
///
/// # Example
/// ```
/// use quarkdsl::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::logic::eval_logic, value::core::Value},
/// };
///
/// let a = Value::Number(2.0);
/// let b = Value::Bool(false);
///
/// assert_eq!(eval_logic(BinaryOperator::And, &a, &b), Value::Bool(false));
/// assert_eq!(eval_logic(BinaryOperator::Or, &a, &b), Value::Bool(true));
/// ```
#[must_use]
pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOperator::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinaryOperator::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        _ => unreachable!("eval_logic called with {op}"),
    }
}
