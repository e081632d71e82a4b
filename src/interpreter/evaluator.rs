/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparison and logical operators on runtime values.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core execution logic and interpreter state.
///
/// Contains the interpreter, its configuration, the dispatch loop and the
/// execution result.
pub mod core;

/// Call frames.
///
/// A frame holds the locals and instruction pointer of one active call.
pub mod frame;

/// Utility functions for evaluation.
///
/// Provides helpers shared by builtin and gate dispatch.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined, builtin and gate calls, argument checking, and the
/// `map` builtin.
pub mod function;
