/// Runtime value representation.
///
/// Defines the `Value` enum shared by the operand stack, locals and builtins,
/// together with its conversions, truthiness rules and printing.
pub mod core;
