use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::Domain;

/// A single stack-machine instruction.
///
/// Operands travel inside the variant. Binary operators pop the right operand
/// first, then the left, and push one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instruction {
    /// Push a number.
    PushNumber(f64),
    /// Push a boolean.
    PushBool(bool),
    /// Push the value of a local.
    Load(String),
    /// Pop a value into a local.
    Store(String),
    /// Pop a value, then an index, and write the element of the named array.
    StoreIndex(String),
    /// Pop `n` values and push an array holding them in push order.
    MakeArray(usize),
    /// Pop an index, then an array, and push the element.
    Index,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Neg,
    Not,

    /// Continue at the given instruction index.
    Jump(usize),
    /// Pop a value and jump if it is falsy.
    JumpIfFalse(usize),

    /// Call a user function with `argc` arguments from the stack.
    Call { name: String, argc: usize },
    /// Call a host builtin, including `map:<f>`.
    CallBuiltin { name: String, argc: usize },
    /// Apply a quantum gate or measurement.
    CallGate { name: String, argc: usize },

    /// Pop the return value and leave the current frame.
    Return,
    /// Discard the top of the stack.
    Pop,
}

/// A lowered function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// The function name.
    pub name:         String,
    /// Parameter names in declaration order.
    pub params:       Vec<String>,
    /// The instruction stream. Jump targets index into it.
    pub instructions: Vec<Instruction>,
    /// The domain tag carried over from the source.
    pub domain:       Domain,
}

/// A compiled program: functions keyed by name in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Module {
    /// The functions of the module.
    pub functions: IndexMap<String, Function>,
}

impl Module {
    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushNumber(n) => write!(f, "push {n}"),
            Self::PushBool(b) => write!(f, "push {b}"),
            Self::Load(name) => write!(f, "load {name}"),
            Self::Store(name) => write!(f, "store {name}"),
            Self::StoreIndex(name) => write!(f, "store_index {name}"),
            Self::MakeArray(n) => write!(f, "make_array {n}"),
            Self::Index => write!(f, "index"),
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Mul => write!(f, "mul"),
            Self::Div => write!(f, "div"),
            Self::Mod => write!(f, "mod"),
            Self::Eq => write!(f, "eq"),
            Self::Ne => write!(f, "ne"),
            Self::Lt => write!(f, "lt"),
            Self::Le => write!(f, "le"),
            Self::Gt => write!(f, "gt"),
            Self::Ge => write!(f, "ge"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::Neg => write!(f, "neg"),
            Self::Not => write!(f, "not"),
            Self::Jump(target) => write!(f, "jump {target}"),
            Self::JumpIfFalse(target) => write!(f, "jump_if_false {target}"),
            Self::Call { name, argc } => write!(f, "call {name}/{argc}"),
            Self::CallBuiltin { name, argc } => write!(f, "call_builtin {name}/{argc}"),
            Self::CallGate { name, argc } => write!(f, "call_gate {name}/{argc}"),
            Self::Return => write!(f, "return"),
            Self::Pop => write!(f, "pop"),
        }
    }
}

/// Prints a function as an annotated listing:
///
/// ```text
/// @quantum
/// fn bell(q) {
///   0: push 0
///   1: call_gate h/1
///   ...
/// }
/// ```
impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.domain != Domain::Classical {
            writeln!(f, "@{}", self.domain)?;
        }
        writeln!(f, "fn {}({}) {{", self.name, self.params.join(", "))?;
        let width = self.instructions.len().saturating_sub(1).to_string().len();
        for (i, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "  {i:>width$}: {instruction}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{function}")?;
        }
        Ok(())
    }
}
