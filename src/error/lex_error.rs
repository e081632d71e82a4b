#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexError {
    /// A character that does not begin any token.
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// An integer literal that does not fit in 64 bits.
    IntegerTooLarge {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl LexError {
    /// Returns the `(line, column)` position of the error.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::UnrecognizedCharacter { line, column, .. }
            | Self::IntegerTooLarge { line, column, .. } => (*line, *column),
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter { character,
                                          line,
                                          column, } => write!(f,
                                                              "Error on line {line}, column {column}: Unrecognized character '{character}'."),
            Self::IntegerTooLarge { literal,
                                    line,
                                    column, } => write!(f,
                                                        "Error on line {line}, column {column}: Integer literal {literal} is too large."),
        }
    }
}

impl std::error::Error for LexError {}
