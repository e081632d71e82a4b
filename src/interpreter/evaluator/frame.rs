use std::collections::HashMap;

use crate::interpreter::{bytecode::Function, value::core::Value};

/// Where the value of a returning frame goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTarget {
    /// Push it on the operand stack for the calling frame.
    Caller,
    /// Collect it into the innermost pending `map`, which then calls the
    /// next element or pushes the finished array.
    Map,
    /// Hand it back to the Rust code that started the frame, ending the
    /// dispatch loop that is running it.
    Host,
}

/// An active call.
#[derive(Debug)]
pub struct Frame<'m> {
    /// The function being executed.
    pub function:      &'m Function,
    /// Parameters and variables of this call.
    pub locals:        HashMap<String, Value>,
    /// Index of the next instruction to execute.
    pub ip:            usize,
    /// Where the return value goes.
    pub return_target: ReturnTarget,
}

impl<'m> Frame<'m> {
    #[must_use]
    pub const fn new(function: &'m Function,
                     locals: HashMap<String, Value>,
                     return_target: ReturnTarget)
                     -> Self {
        Self { function,
               locals,
               ip: 0,
               return_target }
    }
}
