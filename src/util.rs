/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Runtime numbers are
/// `f64`, while literals are parsed as `i64` and indices must be `usize`; these
/// helpers guard every crossing between the two worlds.
pub mod num;
