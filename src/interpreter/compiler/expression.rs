use crate::{
    ast::{BinaryOperator, Expression, UnaryOperator},
    error::CompileError,
    interpreter::{
        bytecode::Instruction,
        compiler::core::{FunctionBuilder, LowerResult},
        evaluator::function::{core::BUILTIN_FUNCTIONS, gate::GATE_FUNCTIONS},
    },
    util::num::i64_to_f64_checked,
};

/// Prefix of the builtin name a `map` expression lowers to.
pub const MAP_PREFIX: &str = "map:";

/// How a call site is dispatched at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// A host builtin.
    Builtin,
    /// A quantum gate or measurement.
    Gate,
    /// A function defined in the program.
    User,
}

/// Classifies a callee by name. Builtin and gate names shadow user functions.
///
/// # Example
/// ```
/// use quarkdsl::interpreter::compiler::expression::{CallKind, classify_call};
///
/// assert_eq!(classify_call("println"), CallKind::Builtin);
/// assert_eq!(classify_call("cnot"), CallKind::Gate);
/// assert_eq!(classify_call("square"), CallKind::User);
/// ```
#[must_use]
pub fn classify_call(name: &str) -> CallKind {
    if BUILTIN_FUNCTIONS.contains(&name) {
        CallKind::Builtin
    } else if GATE_FUNCTIONS.contains(&name) {
        CallKind::Gate
    } else {
        CallKind::User
    }
}

impl FunctionBuilder<'_> {
    /// Lowers an expression so that it leaves exactly one value on the stack.
    ///
    /// Operands are lowered left before right and call arguments left to
    /// right.
    ///
    /// # Errors
    /// Returns `LiteralTooLarge` for integer literals beyond `2^53` in
    /// magnitude and `EmptyName` for empty identifiers.
    pub fn lower_expression(&mut self, expr: &Expression) -> LowerResult<()> {
        match expr {
            Expression::IntLiteral(n) => {
                let value = i64_to_f64_checked(*n,
                                               CompileError::LiteralTooLarge { value:    *n,
                                                                               function: self.function.to_string(), })?;
                self.emit(Instruction::PushNumber(value));
            },
            Expression::FloatLiteral(n) => {
                self.emit(Instruction::PushNumber(*n));
            },
            Expression::BoolLiteral(b) => {
                self.emit(Instruction::PushBool(*b));
            },
            Expression::Variable(name) => {
                self.emit(Instruction::Load(self.checked_name(name)?));
            },
            Expression::ArrayLiteral(elements) => {
                for element in elements {
                    self.lower_expression(element)?;
                }
                self.emit(Instruction::MakeArray(elements.len()));
            },
            Expression::Index { array, index } => {
                self.lower_expression(array)?;
                self.lower_expression(index)?;
                self.emit(Instruction::Index);
            },
            Expression::Binary { op, left, right } => {
                self.lower_expression(left)?;
                self.lower_expression(right)?;
                self.emit(binary_instruction(*op));
            },
            Expression::Unary { op, operand } => {
                self.lower_expression(operand)?;
                self.emit(match op {
                              UnaryOperator::Negate => Instruction::Neg,
                              UnaryOperator::Not => Instruction::Not,
                          });
            },
            Expression::Call { function, args } => {
                let name = self.checked_name(function)?;
                for arg in args {
                    self.lower_expression(arg)?;
                }
                let argc = args.len();
                self.emit(match classify_call(&name) {
                              CallKind::Builtin => Instruction::CallBuiltin { name, argc },
                              CallKind::Gate => Instruction::CallGate { name, argc },
                              CallKind::User => Instruction::Call { name, argc },
                          });
            },
            Expression::Map { function, array } => {
                let function = self.checked_name(function)?;
                self.lower_expression(array)?;
                self.emit(Instruction::CallBuiltin { name: format!("{MAP_PREFIX}{function}"),
                                                     argc: 1, });
            },
        }
        Ok(())
    }

    /// Returns an owned copy of `name`, rejecting empty identifiers.
    pub(super) fn checked_name(&self, name: &str) -> LowerResult<String> {
        if name.is_empty() {
            return Err(self.empty_name());
        }
        Ok(name.to_string())
    }
}

const fn binary_instruction(op: BinaryOperator) -> Instruction {
    match op {
        BinaryOperator::Add => Instruction::Add,
        BinaryOperator::Sub => Instruction::Sub,
        BinaryOperator::Mul => Instruction::Mul,
        BinaryOperator::Div => Instruction::Div,
        BinaryOperator::Mod => Instruction::Mod,
        BinaryOperator::Equal => Instruction::Eq,
        BinaryOperator::NotEqual => Instruction::Ne,
        BinaryOperator::Less => Instruction::Lt,
        BinaryOperator::LessEqual => Instruction::Le,
        BinaryOperator::Greater => Instruction::Gt,
        BinaryOperator::GreaterEqual => Instruction::Ge,
        BinaryOperator::And => Instruction::And,
        BinaryOperator::Or => Instruction::Or,
    }
}
