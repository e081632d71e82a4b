#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while lowering a program to bytecode.
pub enum CompileError {
    /// Two functions share the same name.
    DuplicateFunction {
        /// The name of the function.
        name: String,
    },
    /// An integer literal cannot be represented exactly as a runtime number.
    LiteralTooLarge {
        /// The literal value.
        value:    i64,
        /// The function containing the literal.
        function: String,
    },
    /// A jump refers to a label that was never placed.
    UnresolvedLabel {
        /// The label identifier.
        label:    usize,
        /// The function containing the jump.
        function: String,
    },
    /// A declaration, variable or callee has an empty name.
    EmptyName {
        /// The function containing the empty name.
        function: String,
    },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFunction { name } => {
                write!(f, "Compile error: Function '{name}' is defined more than once.")
            },
            Self::LiteralTooLarge { value, function } => write!(f,
                                                                "Compile error in '{function}': Integer literal {value} cannot be represented exactly."),
            Self::UnresolvedLabel { label, function } => {
                write!(f, "Compile error in '{function}': Label L{label} was never placed.")
            },
            Self::EmptyName { function } => {
                write!(f, "Compile error in '{function}': Empty identifier.")
            },
        }
    }
}

impl std::error::Error for CompileError {}
