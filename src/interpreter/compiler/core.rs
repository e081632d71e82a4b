use indexmap::{IndexMap, map::Entry};
use tracing::debug;

use crate::{
    ast::{Function, Program},
    error::CompileError,
    interpreter::{
        bytecode::{self, Instruction, Module},
        compiler::labels::{Label, Labels},
    },
};

pub type LowerResult<T> = Result<T, CompileError>;

/// Lowers a parsed program to a bytecode [`Module`].
///
/// Functions keep their declaration order. Each function body is lowered
/// independently; jumps are resolved per function.
///
/// # Errors
/// Returns `DuplicateFunction` if two functions share a name, or any error
/// raised while lowering a body.
///
/// # Example
/// ```
/// use quarkdsl::interpreter::{compiler::core::compile, lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("fn main() -> int { return 1 + 2; }").unwrap();
/// let module = compile(&parse(&tokens).unwrap()).unwrap();
///
/// assert!(module.function("main").is_some());
/// ```
pub fn compile(program: &Program) -> LowerResult<Module> {
    let mut functions = IndexMap::with_capacity(program.functions.len());

    for function in &program.functions {
        let lowered = lower_function(function)?;
        match functions.entry(function.name.clone()) {
            Entry::Occupied(_) => {
                return Err(CompileError::DuplicateFunction { name: function.name.clone() });
            },
            Entry::Vacant(slot) => {
                slot.insert(lowered);
            },
        }
    }

    Ok(Module { functions })
}

fn lower_function(function: &Function) -> LowerResult<bytecode::Function> {
    if function.name.is_empty() {
        return Err(CompileError::EmptyName { function: function.name.clone() });
    }

    let mut builder = FunctionBuilder::new(&function.name);
    for statement in &function.body {
        builder.lower_statement(statement)?;
    }
    let instructions = builder.finish()?;

    debug!(function = %function.name,
           domain = %function.domain,
           instructions = instructions.len(),
           "lowered function");

    Ok(bytecode::Function { name: function.name.clone(),
                            params: function.params.iter().map(|p| p.name.clone()).collect(),
                            instructions,
                            domain: function.domain })
}

/// Accumulates the instructions of one function while it is being lowered.
pub struct FunctionBuilder<'a> {
    pub(super) function: &'a str,
    instructions:        Vec<Instruction>,
    labels:              Labels,
}

impl<'a> FunctionBuilder<'a> {
    /// Creates an empty builder for the function named `function`.
    #[must_use]
    pub fn new(function: &'a str) -> Self {
        Self { function,
               instructions: Vec::new(),
               labels: Labels::default() }
    }

    /// Appends an instruction and returns its index.
    pub fn emit(&mut self, instruction: Instruction) -> usize {
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }

    /// Emits a jump whose target is patched once `label` is placed.
    pub fn emit_jump(&mut self, jump: fn(usize) -> Instruction, label: Label) {
        let at = self.emit(jump(0));
        self.labels.record(at, label);
    }

    /// Allocates a new label.
    pub fn fresh_label(&mut self) -> Label {
        self.labels.fresh()
    }

    /// Places `label` at the next instruction to be emitted.
    pub fn place(&mut self, label: Label) {
        self.labels.place(label, self.instructions.len());
    }

    /// Builds the error for an empty variable or callee name.
    pub(super) fn empty_name(&self) -> CompileError {
        CompileError::EmptyName { function: self.function.to_string() }
    }

    /// Terminates the function and resolves every jump.
    ///
    /// A `push 0; return` epilogue is appended unless the body already ends
    /// in `Return` and no jump lands past it.
    ///
    /// # Errors
    /// Returns `UnresolvedLabel` if a jump targets a label that was never
    /// placed.
    pub fn finish(mut self) -> LowerResult<Vec<Instruction>> {
        let end = self.instructions.len();
        if !matches!(self.instructions.last(), Some(Instruction::Return)) || self.labels.targets(end) {
            self.instructions.push(Instruction::PushNumber(0.0));
            self.instructions.push(Instruction::Return);
        }
        self.labels.resolve(&mut self.instructions, self.function)?;
        Ok(self.instructions)
    }
}
