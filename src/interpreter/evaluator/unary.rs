use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a unary operation on a value.
///
/// Supported operators:
/// - `Negate`: numeric negation; booleans negate as `1` and `0`.
/// - `Not`: the inverse of the operand's truthiness, as a boolean.
///
/// # Parameters
/// - `op`: Unary operator.
/// - `value`: Input value.
/// - `function`: The executing function, for error reporting.
///
/// # Returns
/// The computed `Value` wrapped in `EvalResult`.
///
/// # Example
/// ```
/// use quarkdsl::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// // Negation
/// let v = eval_unary(UnaryOperator::Negate, &Value::Number(5.0), "main").unwrap();
/// assert_eq!(v, Value::Number(-5.0));
///
/// // Boolean not
/// let v = eval_unary(UnaryOperator::Not, &Value::Number(0.0), "main").unwrap();
/// assert_eq!(v, Value::Bool(true));
/// ```
pub fn eval_unary(op: UnaryOperator, value: &Value, function: &str) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => Ok(Value::Number(-value.as_number(function)?)),
        UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}
