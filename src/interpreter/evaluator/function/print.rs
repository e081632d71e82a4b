use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    value::core::Value,
};

/// Appends one line of output.
///
/// The arguments are formatted with their `Display` form and joined by a
/// single space, so `println(1, true, [1, 2])` prints `1 true [1, 2]`.
/// `print` and `println` both end up here.
///
/// # Returns
/// Always `Value::Number(0.0)`.
pub fn print(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
    let line = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    interpreter.output.push(line);
    Ok(Value::Number(0.0))
}
