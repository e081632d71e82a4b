#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    UnexpectedToken {
        /// A description of what the grammar expected at this point.
        expected: String,
        /// The token that was actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The token stream ended without an end-of-input marker.
    UnexpectedEndOfInput {
        /// A description of what the grammar expected at this point.
        expected: String,
    },
    /// An array size in a type annotation was not a valid size.
    InvalidArraySize {
        /// The size as written.
        size:   i64,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    line,
                                    column, } => write!(f,
                                                        "Error on line {line}, column {column}: Expected {expected}, found {found}."),
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Unexpected end of input: expected {expected}.")
            },
            Self::InvalidArraySize { size, line, column } => write!(f,
                                                                    "Error on line {line}, column {column}: Invalid array size {size}."),
        }
    }
}

impl std::error::Error for ParseError {}
