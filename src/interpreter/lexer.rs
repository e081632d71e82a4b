use logos::Logos;

use crate::error::LexError;

/// Result type used by the tokenizer.
pub type LexResult<T> = Result<T, LexError>;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// `fn`
    #[token("fn")]
    Fn,
    /// `let`
    #[token("let")]
    Let,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `map`
    #[token("map")]
    Map,

    /// `@gpu`
    #[token("@gpu")]
    GpuAnnotation,
    /// `@quantum`
    #[token("@quantum")]
    QuantumAnnotation,
    /// Any other `@identifier`. Unknown annotations are dropped without an
    /// error so that sources written for newer toolchains still load.
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*", logos::skip)]
    UnknownAnnotation,

    /// `int`
    #[token("int")]
    Int,
    /// `float`
    #[token("float")]
    Float,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `qubit`
    #[token("qubit")]
    Qubit,
    /// `void`
    #[token("void")]
    Void,
    /// `tensor`
    #[token("tensor")]
    Tensor,
    /// `qstate`
    #[token("qstate")]
    QState,

    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    BoolLiteral(bool),
    /// Float literal tokens, such as `3.14`. A digit is required on both
    /// sides of the dot, so `0..5` lexes as an integer followed by `..`.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    FloatLiteral(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntLiteral(i64),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Line breaks; tracked for positions and otherwise skipped.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,

    /// `->`
    #[token("->")]
    Arrow,
    /// `..`
    #[token("..")]
    DotDot,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,

    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,

    /// Appended by [`tokenize`] after the last real token.
    EndOfInput,
}

/// A line/column position in the source, both counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column, in characters, within the line.
    pub column: usize,
}

/// A token together with the position of its first character.
pub type Spanned = (Token, Position);

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where that line starts,
/// from which token columns are derived.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// The error payload produced by the derived lexer; turned into a positioned
/// [`LexError`] by [`tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No token pattern matched.
    #[default]
    UnrecognizedCharacter,
    /// An integer literal overflowed `i64`.
    IntegerTooLarge,
}

/// Converts source text into a flat token sequence with positions.
///
/// Whitespace and `//` comments are skipped. The returned sequence always
/// ends with [`Token::EndOfInput`], positioned just after the last character.
///
/// # Errors
/// Returns a [`LexError`] at the first character that starts no token, or at
/// an integer literal that does not fit in 64 bits.
///
/// # Example
/// ```
/// use quarkdsl::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("@gpu fn").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
///
/// assert_eq!(kinds, vec![Token::GpuAnnotation, Token::Fn, Token::EndOfInput]);
/// ```
pub fn tokenize(source: &str) -> LexResult<Vec<Spanned>> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let position = position_of(source, &lexer.extras, lexer.span().start);
        match result {
            Ok(token) => tokens.push((token, position)),
            Err(LexErrorKind::IntegerTooLarge) => {
                return Err(LexError::IntegerTooLarge { literal: lexer.slice().to_string(),
                                                       line:    position.line,
                                                       column:  position.column, });
            },
            Err(LexErrorKind::UnrecognizedCharacter) => {
                let character = lexer.slice()
                                     .chars()
                                     .next()
                                     .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(LexError::UnrecognizedCharacter { character,
                                                             line: position.line,
                                                             column: position.column });
            },
        }
    }

    let end = position_of(source, &lexer.extras, source.len());
    tokens.push((Token::EndOfInput, end));
    Ok(tokens)
}

/// Computes the position of a byte offset on the lexer's current line.
fn position_of(source: &str, extras: &LexerExtras, offset: usize) -> Position {
    let column = source.get(extras.line_start..offset)
                       .map_or(0, |prefix| prefix.chars().count());
    Position { line:   extras.line,
               column: column + 1, }
}

/// Parses an integer literal from the current token slice.
///
/// # Errors
/// Returns `LexErrorKind::IntegerTooLarge` if the digits overflow `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexErrorKind::IntegerTooLarge)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fn => write!(f, "'fn'"),
            Self::Let => write!(f, "'let'"),
            Self::Return => write!(f, "'return'"),
            Self::If => write!(f, "'if'"),
            Self::Else => write!(f, "'else'"),
            Self::For => write!(f, "'for'"),
            Self::In => write!(f, "'in'"),
            Self::Map => write!(f, "'map'"),
            Self::GpuAnnotation => write!(f, "'@gpu'"),
            Self::QuantumAnnotation => write!(f, "'@quantum'"),
            Self::UnknownAnnotation => write!(f, "annotation"),
            Self::Int => write!(f, "'int'"),
            Self::Float => write!(f, "'float'"),
            Self::Bool => write!(f, "'bool'"),
            Self::Qubit => write!(f, "'qubit'"),
            Self::Void => write!(f, "'void'"),
            Self::Tensor => write!(f, "'tensor'"),
            Self::QState => write!(f, "'qstate'"),
            Self::BoolLiteral(b) => write!(f, "'{b}'"),
            Self::FloatLiteral(n) => write!(f, "float literal {n}"),
            Self::IntLiteral(n) => write!(f, "integer literal {n}"),
            Self::Identifier(s) => write!(f, "identifier '{s}'"),
            Self::Comment => write!(f, "comment"),
            Self::NewLine => write!(f, "newline"),
            Self::Arrow => write!(f, "'->'"),
            Self::DotDot => write!(f, "'..'"),
            Self::EqualEqual => write!(f, "'=='"),
            Self::BangEqual => write!(f, "'!='"),
            Self::LessEqual => write!(f, "'<='"),
            Self::GreaterEqual => write!(f, "'>='"),
            Self::AndAnd => write!(f, "'&&'"),
            Self::OrOr => write!(f, "'||'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Percent => write!(f, "'%'"),
            Self::Less => write!(f, "'<'"),
            Self::Greater => write!(f, "'>'"),
            Self::Bang => write!(f, "'!'"),
            Self::Equals => write!(f, "'='"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Comma => write!(f, "','"),
            Self::Semicolon => write!(f, "';'"),
            Self::Colon => write!(f, "':'"),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}
