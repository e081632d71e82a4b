use crate::{
    error::{QuantumError, RuntimeError},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_usize_checked,
};

/// Validates that a call received exactly `expected` arguments.
///
/// # Parameters
/// - `name`: The callee, for error reporting.
/// - `args`: The supplied arguments.
/// - `expected`: The required number of arguments.
///
/// # Returns
/// `Ok(())` if the count matches, otherwise `ArgumentCountMismatch`.
///
/// # Example
/// ```
/// use quarkdsl::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let args = vec![Value::Number(2.0), Value::Number(1.0)];
///
/// assert!(check_arity("cx", &args, 2).is_ok()); // Requires exactly 2 arguments.
/// assert!(check_arity("h", &args, 1).is_err());
/// ```
pub fn check_arity<T>(name: &str, args: &[T], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                  expected: expected.to_string(),
                                                  found:    args.len(), })
    }
}

/// Converts a gate argument to a qubit index.
///
/// Range checking against the register width is left to the simulator.
///
/// # Errors
/// Returns `QuantumError::InvalidQubit` unless the value is a non-negative
/// integral number.
pub fn to_qubit(value: &Value) -> EvalResult<usize> {
    let invalid = || RuntimeError::from(QuantumError::InvalidQubit { value: value.to_string() });
    match value {
        Value::Number(n) => f64_to_usize_checked(*n, ()).map_err(|()| invalid()),
        _ => Err(invalid()),
    }
}
