use crate::{
    ast::Statement,
    interpreter::{
        bytecode::Instruction,
        compiler::core::{FunctionBuilder, LowerResult},
    },
};

impl FunctionBuilder<'_> {
    /// Lowers one statement.
    ///
    /// Statements leave the operand stack as they found it: expression
    /// statements are followed by `Pop`, and every other form consumes what
    /// it pushes.
    ///
    /// Control flow lowers as follows, with `Lx` labels resolved after the
    /// body:
    ///
    /// ```text
    /// if c { T } else { E }       for v in a..b { B }
    ///     <c>                         <a>
    ///     jump_if_false Lelse         store v
    ///     <T>                     Lloop:
    ///     jump Lend                   load v
    /// Lelse:                          <b>
    ///     <E>                         lt
    /// Lend:                           jump_if_false Lend
    ///                                 <B>
    ///                                 load v; push 1; add; store v
    ///                                 jump Lloop
    ///                             Lend:
    /// ```
    ///
    /// # Errors
    /// Propagates any error from lowering nested expressions.
    pub fn lower_statement(&mut self, statement: &Statement) -> LowerResult<()> {
        match statement {
            Statement::Let { name, value, .. }
            | Statement::Assign { target: name,
                                  index: None,
                                  value, } => {
                self.lower_expression(value)?;
                self.emit(Instruction::Store(self.checked_name(name)?));
            },
            Statement::Assign { target,
                                index: Some(index),
                                value, } => {
                self.lower_expression(index)?;
                self.lower_expression(value)?;
                self.emit(Instruction::StoreIndex(self.checked_name(target)?));
            },
            Statement::Return(value) => {
                self.lower_expression(value)?;
                self.emit(Instruction::Return);
            },
            Statement::Expression(expr) => {
                self.lower_expression(expr)?;
                self.emit(Instruction::Pop);
            },
            Statement::For { var, start, end, body } => {
                let var = self.checked_name(var)?;
                let head = self.fresh_label();
                let exit = self.fresh_label();

                self.lower_expression(start)?;
                self.emit(Instruction::Store(var.clone()));

                self.place(head);
                self.emit(Instruction::Load(var.clone()));
                self.lower_expression(end)?;
                self.emit(Instruction::Lt);
                self.emit_jump(Instruction::JumpIfFalse, exit);

                self.lower_block(body)?;

                self.emit(Instruction::Load(var.clone()));
                self.emit(Instruction::PushNumber(1.0));
                self.emit(Instruction::Add);
                self.emit(Instruction::Store(var));
                self.emit_jump(Instruction::Jump, head);
                self.place(exit);
            },
            Statement::If { condition,
                            then_body,
                            else_body, } => {
                let otherwise = self.fresh_label();
                self.lower_expression(condition)?;
                self.emit_jump(Instruction::JumpIfFalse, otherwise);
                self.lower_block(then_body)?;

                if let Some(else_body) = else_body {
                    let end = self.fresh_label();
                    self.emit_jump(Instruction::Jump, end);
                    self.place(otherwise);
                    self.lower_block(else_body)?;
                    self.place(end);
                } else {
                    self.place(otherwise);
                }
            },
        }
        Ok(())
    }

    fn lower_block(&mut self, body: &[Statement]) -> LowerResult<()> {
        body.iter().try_for_each(|statement| self.lower_statement(statement))
    }
}
