use rand::Rng;

use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::check_arity,
        },
        value::core::Value,
    },
    util::num::usize_to_f64,
};

/// Applies a unary `f64` function to a numeric argument.
///
/// The generated functions accept exactly one argument. Booleans are taken as
/// `1` and `0`; arrays produce a `TypeMismatch` error.
///
/// # Parameters
/// - `interpreter`: The running interpreter, for error reporting.
/// - `args`: Slice containing one argument.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed number.
///
/// # Example
/// ```
/// use quarkdsl::interpreter::{
///     bytecode::Module,
///     evaluator::{
///         core::{ExecutionConfig, Interpreter},
///         function::builtin::sqrt,
///     },
///     value::core::Value,
/// };
///
/// let module = Module::default();
/// let mut interpreter = Interpreter::new(&module, ExecutionConfig::default());
///
/// let r = sqrt(&mut interpreter, &[Value::Number(16.0)]).unwrap();
/// assert_eq!(r, Value::Number(4.0));
/// ```
macro_rules! math_builtin {
    ($fname:ident, $name:literal, $real_fn:expr) => {
        pub fn $fname(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
            check_arity($name, args, 1)?;
            let x = args[0].as_number(interpreter.current_function())?;
            let f: fn(f64) -> f64 = $real_fn;
            Ok(Value::Number(f(x)))
        }
    };
}

math_builtin!(sqrt, "sqrt", f64::sqrt);
math_builtin!(sin, "sin", f64::sin);
math_builtin!(cos, "cos", f64::cos);
math_builtin!(tan, "tan", f64::tan);
math_builtin!(exp, "exp", f64::exp);
math_builtin!(log, "log", f64::ln);
math_builtin!(abs, "abs", f64::abs);
math_builtin!(floor, "floor", f64::floor);
math_builtin!(ceil, "ceil", f64::ceil);
math_builtin!(round, "round", round_half_up);

/// Rounds to the nearest integer, with halves rounded towards positive
/// infinity (`-2.5` becomes `-2`).
fn round_half_up(x: f64) -> f64 {
    let rounded = x.round();
    if (rounded - x).abs() == 0.5 { x.ceil() } else { rounded }
}

/// Returns the number of elements of an array.
///
/// # Errors
/// Returns `NotAnArray` for any other value.
pub fn len(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
    check_arity("len", args, 1)?;
    let elements = args[0].as_array(interpreter.current_function())?;
    Ok(Value::Number(usize_to_f64(elements.borrow().len())))
}

/// Returns a uniform number in `[0, 1)` drawn from the interpreter's
/// random source.
pub fn random(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
    check_arity("random", args, 0)?;
    Ok(Value::Number(interpreter.rng.r#gen()))
}
