use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates an arithmetic operator on two numbers.
///
/// Booleans take part as `1` and `0`. Division and remainder follow IEEE-754,
/// so dividing by zero yields an infinity or `NaN` instead of an error.
///
/// # Errors
/// Returns `TypeMismatch` if either operand is an array.
pub fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       function: &str)
                       -> EvalResult<Value> {
    let l = left.as_number(function)?;
    let r = right.as_number(function)?;

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Sub => l - r,
        BinaryOperator::Mul => l * r,
        BinaryOperator::Div => l / r,
        BinaryOperator::Mod => l % r,
        _ => unreachable!("eval_arithmetic called with {op}"),
    };
    Ok(Value::Number(result))
}
