use std::vec;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            frame::ReturnTarget,
            function::core::is_builtin,
        },
        value::core::Value,
    },
};

/// A `map` whose user-function calls are still in flight.
///
/// Each element gets its own frame marked [`ReturnTarget::Map`]. When that
/// frame returns, the dispatch loop records the result here and starts the
/// next element, so nesting `map` never nests the dispatch loop itself.
#[derive(Debug)]
pub struct PendingMap<'m> {
    target:   &'m str,
    elements: vec::IntoIter<Value>,
    results:  Vec<Value>,
}

impl<'m> Interpreter<'m> {
    /// Starts applying `target` to every element of `array`.
    ///
    /// Builtins are applied on the spot and the new array is pushed at once.
    /// User functions are called one element at a time by the dispatch loop,
    /// and the new array is pushed after the last call returns. The input
    /// array is snapshotted first, so the callee may mutate it without
    /// affecting the iteration.
    ///
    /// # Errors
    /// Returns `NotAnArray` if `array` is not an array, `UndefinedFunction`
    /// if `target` names neither a builtin nor a user function, or any error
    /// raised by a builtin call or by pushing the first frame.
    pub(crate) fn begin_map(&mut self, target: &'m str, array: &Value) -> EvalResult<()> {
        let elements = array.as_array(self.current_function())?.borrow().clone();

        if is_builtin(target) {
            let results = elements.into_iter()
                                  .map(|element| self.call_builtin(target, &[element]))
                                  .collect::<EvalResult<Vec<_>>>()?;
            self.stack.push(Value::from(results));
            return Ok(());
        }

        if self.module.function(target).is_none() {
            return Err(RuntimeError::UndefinedFunction { name:     target.to_string(),
                                                         function: self.current_function().to_string(), });
        }

        let results = Vec::with_capacity(elements.len());
        self.maps.push(PendingMap { target,
                                    elements: elements.into_iter(),
                                    results });
        self.next_map_element()
    }

    /// Records the result of one element's call and moves on.
    pub(crate) fn resume_map(&mut self, value: Value) -> EvalResult<()> {
        self.pending_map()?.results.push(value);
        self.next_map_element()
    }

    /// Pushes a frame for the next element, or the finished array once every
    /// element has been mapped.
    fn next_map_element(&mut self) -> EvalResult<()> {
        let pending = self.pending_map()?;
        let target = pending.target;

        match pending.elements.next() {
            Some(element) => self.push_frame(target, vec![element], ReturnTarget::Map),
            None => {
                let results = std::mem::take(&mut pending.results);
                self.maps.pop();
                self.stack.push(Value::from(results));
                Ok(())
            },
        }
    }

    fn pending_map(&mut self) -> EvalResult<&mut PendingMap<'m>> {
        self.maps
            .last_mut()
            .ok_or_else(|| RuntimeError::StackUnderflow { function: "<host>".to_string() })
    }
}
