/// Lexical errors.
///
/// Raised by the tokenizer when the source contains a character that starts
/// no token, or a literal that cannot be represented.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors raised while building the syntax tree from tokens.
/// Every parse error names the token that was expected and the token that was
/// actually found, together with its position.
pub mod parse_error;
/// Lowering errors.
///
/// The compiler is total over every tree the parser produces, so these only
/// appear for programs that break an invariant the parser guarantees, such as
/// duplicate function names or hand-built trees with dangling labels.
pub mod compile_error;
/// Runtime errors.
///
/// Contains all errors that can be raised while the bytecode interpreter runs:
/// unknown names, type mismatches, bad indices, quantum register misuse and
/// the iteration ceiling.
pub mod runtime_error;

pub use compile_error::CompileError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::{QuantumError, RuntimeError};

/// Any failure of the compile/execute pipeline.
///
/// Each stage reports its own error type; this enum lets the pipeline use `?`
/// across stage boundaries while keeping the originating stage visible to
/// callers that care.
#[derive(Debug)]
pub enum Error {
    /// The tokenizer rejected the source.
    Lex(LexError),
    /// The parser rejected the token stream.
    Parse(ParseError),
    /// The syntax tree could not be lowered to bytecode.
    Compile(CompileError),
    /// Execution failed.
    Runtime(RuntimeError),
}

impl Error {
    /// Returns the name of the pipeline stage that failed.
    ///
    /// ## Example
    /// ```
    /// use quarkdsl::try_execute;
    ///
    /// let err = try_execute("fn main() -> int { return $; }", "main").unwrap_err();
    /// assert_eq!(err.stage(), "lex");
    /// ```
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lex",
            Self::Parse(_) => "parse",
            Self::Compile(_) => "compile",
            Self::Runtime(_) => "runtime",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Compile(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Compile(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<CompileError> for Error {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
