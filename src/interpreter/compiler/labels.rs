use crate::{
    error::CompileError,
    interpreter::{bytecode::Instruction, compiler::core::LowerResult},
};

/// A jump destination that may be referenced before it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(usize);

/// Label bookkeeping for one function.
///
/// Jumps are emitted with a placeholder target and recorded here; once the
/// whole body is lowered, [`Labels::resolve`] writes the real targets.
#[derive(Debug, Default)]
pub struct Labels {
    positions: Vec<Option<usize>>,
    patches:   Vec<(usize, Label)>,
}

impl Labels {
    /// Allocates a new, unplaced label.
    pub fn fresh(&mut self) -> Label {
        self.positions.push(None);
        Label(self.positions.len() - 1)
    }

    /// Binds `label` to the instruction index `at`.
    pub fn place(&mut self, label: Label, at: usize) {
        if let Some(slot) = self.positions.get_mut(label.0) {
            *slot = Some(at);
        }
    }

    /// Records that the jump at `instruction` must be patched to `label`.
    pub fn record(&mut self, instruction: usize, label: Label) {
        self.patches.push((instruction, label));
    }

    /// Returns `true` if any label is placed at `at`.
    #[must_use]
    pub fn targets(&self, at: usize) -> bool {
        self.positions.contains(&Some(at))
    }

    /// Patches every recorded jump with the position of its label.
    ///
    /// # Errors
    /// Returns `CompileError::UnresolvedLabel` if a jump refers to a label
    /// that was never placed.
    pub fn resolve(self, instructions: &mut [Instruction], function: &str) -> LowerResult<()> {
        for (at, label) in self.patches {
            let target = self.positions
                             .get(label.0)
                             .copied()
                             .flatten()
                             .ok_or_else(|| CompileError::UnresolvedLabel { label:    label.0,
                                                                            function: function.to_string(), })?;
            if let Some(Instruction::Jump(slot) | Instruction::JumpIfFalse(slot)) = instructions.get_mut(at) {
                *slot = target;
            }
        }
        Ok(())
    }
}

