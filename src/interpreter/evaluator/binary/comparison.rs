use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a comparison between two values.
///
/// `==` and `!=` accept any pair of values and use [`Value::equals`]. The
/// ordering operators compare numerically; any comparison involving `NaN` is
/// false.
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `function`: The executing function, for error reporting.
///
/// # Returns
/// A `Value::Bool`.
///
/// # Errors
/// Returns `TypeMismatch` if an ordering operator is applied to an array.
pub fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       function: &str)
                       -> EvalResult<Value> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    if matches!(op, Equal | NotEqual) {
        let equal = left.equals(right);
        return Ok(Value::Bool(if op == Equal { equal } else { !equal }));
    }

    let l = left.as_number(function)?;
    let r = right.as_number(function)?;
    let result = match op {
        Less => l < r,
        LessEqual => l <= r,
        Greater => l > r,
        GreaterEqual => l >= r,
        _ => unreachable!("eval_comparison called with {op}"),
    };
    Ok(Value::Bool(result))
}
