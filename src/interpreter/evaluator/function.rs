/// Builtin dispatch table and user-function calls.
pub mod core;

/// Single-argument math builtins.
///
/// `sqrt`, `sin`, `cos`, `tan`, `exp`, `log`, `abs`, `floor`, `ceil` and
/// `round`, plus `len` and `random`.
pub mod builtin;

/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum of the arguments or of a single array.
pub mod min_max;

/// The `print` and `println` implementations.
///
/// Appends formatted arguments to the execution's output.
pub mod print;

/// The `map:<f>` builtin.
///
/// Applies a user function or builtin to every element of an array. User
/// function calls are frames resumed by the dispatch loop.
pub mod map;

/// Quantum gate dispatch.
///
/// Routes gate calls and measurements to the simulator.
pub mod gate;
