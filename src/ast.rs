use serde::Serialize;

/// A whole source file: an ordered list of function declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Functions in declaration order.
    pub functions: Vec<Function>,
}

/// The execution domain a function is annotated with.
///
/// The tag is carried from the syntax tree into bytecode but the interpreter
/// never consults it; it exists for the native code generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Domain {
    /// No annotation.
    #[default]
    Classical,
    /// `@gpu`
    Gpu,
    /// `@quantum`
    Quantum,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// The name of the function.
    pub name:        String,
    /// The declared parameters, in order.
    pub params:      Vec<Param>,
    /// The declared return type.
    pub return_type: Type,
    /// The statements of the body.
    pub body:        Vec<Statement>,
    /// The domain annotation.
    pub domain:      Domain,
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub ty:   Type,
}

/// A type annotation.
///
/// Types are parsed and kept for diagnostics; no stage checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `qubit`
    Qubit,
    /// `void`
    Void,
    /// `qstate`
    QState,
    /// `[T]` or `[T; N]`
    Array(Box<Self>, Option<usize>),
    /// `tensor<T>`
    Tensor(Box<Self>),
}

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `let name: ty = value;`
    Let {
        /// The name being bound.
        name:  String,
        /// The optional declared type.
        ty:    Option<Type>,
        /// The initializer.
        value: Expression,
    },
    /// `target = value;` or `target[index] = value;`
    Assign {
        /// The variable being written.
        target: String,
        /// The element index for array element writes.
        index:  Option<Box<Expression>>,
        /// The value being stored.
        value:  Expression,
    },
    /// `return value;`
    Return(Expression),
    /// An expression evaluated for its effects.
    Expression(Expression),
    /// `for var in start..end { body }`, iterating over `[start, end)`.
    For {
        /// The loop variable.
        var:   String,
        /// The first value of the loop variable.
        start: Expression,
        /// The exclusive upper bound, re-evaluated before every iteration.
        end:   Expression,
        /// The loop body.
        body:  Vec<Self>,
    },
    /// `if condition { then_body } else { else_body }`
    If {
        /// The branch condition.
        condition: Expression,
        /// Statements run when the condition is truthy.
        then_body: Vec<Self>,
        /// Statements run otherwise, if present.
        else_body: Option<Vec<Self>>,
    },
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// An integer literal such as `42`.
    IntLiteral(i64),
    /// A float literal such as `3.14`.
    FloatLiteral(f64),
    /// `true` or `false`.
    BoolLiteral(bool),
    /// A reference to a local variable.
    Variable(String),
    /// `[a, b, c]`
    ArrayLiteral(Vec<Self>),
    /// `array[index]`
    Index {
        /// The indexed expression.
        array: Box<Self>,
        /// The index expression.
        index: Box<Self>,
    },
    /// `left op right`
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand, evaluated first.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// `op operand`
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// `function(args...)`
    Call {
        /// The callee name.
        function: String,
        /// Arguments, evaluated left to right.
        args:     Vec<Self>,
    },
    /// `map(function, array)`
    Map {
        /// The function applied to every element.
        function: String,
        /// The array expression.
        array:    Box<Self>,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classical => write!(f, "classical"),
            Self::Gpu => write!(f, "gpu"),
            Self::Quantum => write!(f, "quantum"),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Qubit => write!(f, "qubit"),
            Self::Void => write!(f, "void"),
            Self::QState => write!(f, "qstate"),
            Self::Array(elem, Some(size)) => write!(f, "[{elem}; {size}]"),
            Self::Array(elem, None) => write!(f, "[{elem}]"),
            Self::Tensor(elem) => write!(f, "tensor<{elem}>"),
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
