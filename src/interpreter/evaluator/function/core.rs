use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::{builtin, min_max, print},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the interpreter, for output and randomness, and a slice
/// of evaluated argument values.
type BuiltinFn = fn(&mut Interpreter<'_>, &[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Any` means the builtin is variadic.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    Any,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names the compiler lowers to `CallBuiltin`.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"   => { arity: Arity::Any, func: print::print },
    "println" => { arity: Arity::Any, func: print::print },
    "sqrt"    => { arity: Arity::Exact(1), func: builtin::sqrt },
    "sin"     => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"     => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"     => { arity: Arity::Exact(1), func: builtin::tan },
    "exp"     => { arity: Arity::Exact(1), func: builtin::exp },
    "log"     => { arity: Arity::Exact(1), func: builtin::log },
    "abs"     => { arity: Arity::Exact(1), func: builtin::abs },
    "floor"   => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"    => { arity: Arity::Exact(1), func: builtin::ceil },
    "round"   => { arity: Arity::Exact(1), func: builtin::round },
    "min"     => { arity: Arity::Any, func: |interp, args| min_max::min_max("min", interp, args) },
    "max"     => { arity: Arity::Any, func: |interp, args| min_max::min_max("max", interp, args) },
    "len"     => { arity: Arity::Exact(1), func: builtin::len },
    "random"  => { arity: Arity::Exact(0), func: builtin::random },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Any => write!(f, "any number of"),
        }
    }
}

/// Returns `true` if `name` is a builtin function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl Interpreter<'_> {
    /// Evaluates a builtin call.
    ///
    /// The name is looked up in the builtin table, its arity verified, and
    /// the builtin executed. `map:<f>` calls are started by the dispatch loop
    /// instead, since they may need frames of their own.
    ///
    /// # Parameters
    /// - `name`: Builtin name.
    /// - `args`: Evaluated argument values, in source order.
    ///
    /// # Returns
    /// The builtin's result. Builtins run for their effect return `0`.
    ///
    /// # Errors
    /// - Unknown builtin name.
    /// - Wrong number of arguments.
    /// - Any error raised by the builtin.
    pub fn call_builtin(&mut self, name: &str, args: &[Value]) -> EvalResult<Value> {
        let builtin =
            BUILTIN_TABLE.iter()
                         .find(|b| b.name == name)
                         .ok_or_else(|| RuntimeError::UnknownBuiltin { name:     name.to_string(),
                                                                       function: self.current_function().to_string(), })?;

        if !builtin.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: builtin.arity.to_string(),
                                                             found:    args.len(), });
        }
        (builtin.func)(self, args)
    }
}
