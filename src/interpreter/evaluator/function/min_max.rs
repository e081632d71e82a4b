use ordered_float::OrderedFloat;

use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    value::core::Value,
};

/// Computes the minimum or maximum of the arguments.
///
/// A single array argument is searched element-wise; otherwise every
/// argument must be a number or boolean. With nothing to compare, `min`
/// returns `Infinity` and `max` returns `-Infinity`. A `NaN` anywhere makes
/// the result `NaN`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `interpreter`: The running interpreter, for error reporting.
/// - `args`: The arguments.
///
/// # Errors
/// Returns `TypeMismatch` if an element to compare is an array.
pub fn min_max(name: &str, interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
    let function = interpreter.current_function();
    let numbers = match args {
        [Value::Array(elements)] => elements.borrow()
                                            .iter()
                                            .map(|v| v.as_number(function))
                                            .collect::<EvalResult<Vec<_>>>()?,
        _ => args.iter()
                 .map(|v| v.as_number(function))
                 .collect::<EvalResult<Vec<_>>>()?,
    };

    if numbers.iter().any(|n| n.is_nan()) {
        return Ok(Value::Number(f64::NAN));
    }

    let values = numbers.into_iter().map(OrderedFloat);
    let result = if name == "min" {
        values.min().map_or(f64::INFINITY, |v| v.0)
    } else {
        values.max().map_or(f64::NEG_INFINITY, |v| v.0)
    };
    Ok(Value::Number(result))
}
