use std::{
    collections::{BTreeMap, HashMap},
    time::{Duration, Instant},
};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        bytecode::{Instruction, Module},
        compiler::expression::MAP_PREFIX,
        evaluator::{
            binary::core::eval_binary,
            frame::{Frame, ReturnTarget},
            function::map::PendingMap,
            unary::eval_unary,
            utils::check_arity,
        },
        value::core::Value,
    },
    quantum::Simulator,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default ceiling on dispatched instructions per execution.
pub const MAX_ITERATIONS: usize = 100_000;
/// Default ceiling on simultaneously active frames.
///
/// A call that can return needs several instructions per frame, so under the
/// default iteration ceiling a terminating program stays far below this.
pub const MAX_CALL_DEPTH: usize = 100_000;
/// Default number of measurement samples taken after the entry returns.
pub const SHOTS: usize = 1024;
/// Default register width of the simulator.
pub const NUM_QUBITS: usize = 8;

/// Limits and knobs for one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Instructions dispatched before the run fails.
    pub max_iterations: usize,
    /// Active frames allowed before a call fails.
    pub max_call_depth: usize,
    /// Samples drawn from the final quantum state.
    pub shots:          usize,
    /// Qubits in the simulated register.
    pub num_qubits:     usize,
    /// Seed for reproducible measurements and `random()`; entropy if `None`.
    pub seed:           Option<u64>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { max_iterations: MAX_ITERATIONS,
               max_call_depth: MAX_CALL_DEPTH,
               shots:          SHOTS,
               num_qubits:     NUM_QUBITS,
               seed:           None, }
    }
}

/// The outcome of a successful execution.
#[derive(Debug, Clone)]
pub struct Execution {
    /// The value returned by the entry function.
    pub return_value:   Value,
    /// One entry per `print`/`println` call.
    pub output:         Vec<String>,
    /// Sampled outcome counts keyed by bit string.
    pub quantum_counts: BTreeMap<String, usize>,
    /// Every gate and measurement applied, in order.
    pub gate_log:       Vec<String>,
    /// Wall-clock time spent executing.
    pub execution_time: Duration,
}

/// A stack machine executing one [`Module`].
///
/// All frames share one operand stack and one dispatch loop. The
/// per-element calls of `map` are frames marked [`ReturnTarget::Map`] that
/// the loop resumes from, so a program never grows the Rust stack however
/// deeply it nests calls. Only [`Interpreter::invoke`], called from Rust,
/// starts a frame marked [`ReturnTarget::Host`].
pub struct Interpreter<'m> {
    pub(crate) module:    &'m Module,
    pub(crate) config:    ExecutionConfig,
    pub(crate) stack:     Vec<Value>,
    frames:               Vec<Frame<'m>>,
    pub(crate) maps:      Vec<PendingMap<'m>>,
    pub(crate) output:    Vec<String>,
    pub(crate) simulator: Simulator,
    pub(crate) rng:       Box<dyn RngCore>,
    iterations:           usize,
}

impl<'m> Interpreter<'m> {
    /// Creates an interpreter whose randomness comes from `config.seed`, or
    /// from the operating system when no seed is set.
    #[must_use]
    pub fn new(module: &'m Module, config: ExecutionConfig) -> Self {
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        Self::with_rng(module, config, rng)
    }

    /// Creates an interpreter drawing all randomness from `rng`.
    #[must_use]
    pub fn with_rng(module: &'m Module, config: ExecutionConfig, rng: Box<dyn RngCore>) -> Self {
        let simulator = Simulator::new(config.num_qubits);
        Self { module,
               config,
               stack: Vec::new(),
               frames: Vec::new(),
               maps: Vec::new(),
               output: Vec::new(),
               simulator,
               rng,
               iterations: 0 }
    }

    /// Runs `entry` to completion and samples the final quantum state.
    ///
    /// The entry function starts with no locals bound, whatever parameters
    /// it declares.
    ///
    /// # Errors
    /// Returns `MissingEntryPoint` if `entry` is not in the module, or the
    /// first runtime error raised while executing.
    ///
    /// # Example
    /// ```
    /// use quarkdsl::interpreter::{
    ///     compiler::core::compile,
    ///     evaluator::core::{ExecutionConfig, Interpreter},
    ///     lexer::tokenize,
    ///     parser::core::parse,
    ///     value::core::Value,
    /// };
    ///
    /// let tokens = tokenize("fn main() -> int { println(7); return 2 * 21; }").unwrap();
    /// let module = compile(&parse(&tokens).unwrap()).unwrap();
    ///
    /// let config = ExecutionConfig { seed: Some(1), ..ExecutionConfig::default() };
    /// let run = Interpreter::new(&module, config).execute("main").unwrap();
    ///
    /// assert_eq!(run.return_value, Value::Number(42.0));
    /// assert_eq!(run.output, vec!["7"]);
    /// assert_eq!(run.quantum_counts.get("00000000"), Some(&1024));
    /// ```
    pub fn execute(mut self, entry: &str) -> EvalResult<Execution> {
        let start = Instant::now();
        let function =
            self.module
                .function(entry)
                .ok_or_else(|| RuntimeError::MissingEntryPoint { name: entry.to_string() })?;

        debug!(entry, functions = self.module.functions.len(), "execution started");

        self.stack.clear();
        self.maps.clear();
        self.simulator.reset();
        self.frames.push(Frame::new(function, HashMap::new(), ReturnTarget::Host));
        let return_value = self.run()?;

        let quantum_counts = self.simulator.sample(self.config.shots, self.rng.as_mut());
        let execution_time = start.elapsed();

        debug!(entry,
               iterations = self.iterations,
               gates = self.simulator.gate_log().len(),
               ?execution_time,
               "execution finished");

        Ok(Execution { return_value,
                       output: self.output,
                       quantum_counts,
                       gate_log: self.simulator.gate_log().to_vec(),
                       execution_time })
    }

    /// Calls the user function `name` with `args` and returns its result.
    ///
    /// The call runs on the current operand stack and counts against the
    /// same iteration and depth limits as calls made from bytecode.
    ///
    /// # Errors
    /// Returns `UndefinedFunction`, `ArgumentCountMismatch`,
    /// `CallDepthExceeded`, or any error raised by the callee.
    ///
    /// # Example
    /// ```
    /// use quarkdsl::interpreter::{
    ///     compiler::core::compile,
    ///     evaluator::core::{ExecutionConfig, Interpreter},
    ///     lexer::tokenize,
    ///     parser::core::parse,
    ///     value::core::Value,
    /// };
    ///
    /// let source = "fn double(x: int) -> int { return x * 2; }
    ///               fn total(x: int) -> int { let d = map(double, [x, 1]); return d[0] + d[1]; }";
    /// let module = compile(&parse(&tokenize(source).unwrap()).unwrap()).unwrap();
    ///
    /// let mut interpreter = Interpreter::new(&module, ExecutionConfig::default());
    /// assert_eq!(interpreter.invoke("total", vec![Value::Number(-4.0)]).unwrap(),
    ///            Value::Number(-6.0));
    /// ```
    pub fn invoke(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        self.push_frame(name, args, ReturnTarget::Host)?;
        self.run()
    }

    /// Lines printed so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The quantum register.
    #[must_use]
    pub const fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// The name of the function on top of the call stack, for diagnostics.
    #[must_use]
    pub fn current_function(&self) -> &str {
        self.frames.last().map_or("<host>", |f| f.function.name.as_str())
    }

    /// Pushes a frame for the user function `name`.
    pub(crate) fn push_frame(&mut self,
                             name: &str,
                             args: Vec<Value>,
                             return_target: ReturnTarget)
                             -> EvalResult<()> {
        let module = self.module;
        let function =
            module.function(name)
                  .ok_or_else(|| RuntimeError::UndefinedFunction { name:     name.to_string(),
                                                                   function: self.current_function().to_string(), })?;

        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: function.params.len().to_string(),
                                                             found:    args.len(), });
        }
        if self.frames.len() >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded { limit: self.config.max_call_depth });
        }

        trace!(function = name, depth = self.frames.len() + 1, "call");
        let locals = function.params.iter().cloned().zip(args).collect();
        self.frames.push(Frame::new(function, locals, return_target));
        Ok(())
    }

    /// The fetch-decode-execute loop.
    ///
    /// Runs until the innermost `Host` frame returns and yields its value.
    /// A frame that runs off the end of its instructions returns `0`.
    fn run(&mut self) -> EvalResult<Value> {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Err(RuntimeError::StackUnderflow { function: "<host>".to_string() });
            };
            let function = frame.function;

            let Some(instruction) = function.instructions.get(frame.ip) else {
                if let Some(value) = self.do_return(Value::Number(0.0))? {
                    return Ok(value);
                }
                continue;
            };
            frame.ip += 1;

            self.iterations += 1;
            if self.iterations > self.config.max_iterations {
                return Err(RuntimeError::IterationLimitExceeded { limit: self.config.max_iterations });
            }

            if let Some(value) = self.step(instruction)? {
                return Ok(value);
            }
        }
    }

    /// Executes one instruction.
    ///
    /// # Returns
    /// `Some(value)` when the instruction returned from a `Host` frame.
    fn step(&mut self, instruction: &'m Instruction) -> EvalResult<Option<Value>> {
        match instruction {
            Instruction::PushNumber(n) => self.stack.push(Value::Number(*n)),
            Instruction::PushBool(b) => self.stack.push(Value::Bool(*b)),
            Instruction::Load(name) => {
                let value = self.local(name)?.clone();
                self.stack.push(value);
            },
            Instruction::Store(name) => {
                let value = self.pop()?;
                self.frame_mut()?.locals.insert(name.clone(), value);
            },
            Instruction::StoreIndex(name) => {
                let value = self.pop()?;
                let index = self.pop()?;
                self.store_index(name, &index, value)?;
            },
            Instruction::MakeArray(n) => {
                let elements = self.pop_n(*n)?;
                self.stack.push(Value::from(elements));
            },
            Instruction::Index => {
                let index = self.pop()?;
                let array = self.pop()?;
                let element = self.load_index(&array, &index)?;
                self.stack.push(element);
            },
            Instruction::Add => self.binary(BinaryOperator::Add)?,
            Instruction::Sub => self.binary(BinaryOperator::Sub)?,
            Instruction::Mul => self.binary(BinaryOperator::Mul)?,
            Instruction::Div => self.binary(BinaryOperator::Div)?,
            Instruction::Mod => self.binary(BinaryOperator::Mod)?,
            Instruction::Eq => self.binary(BinaryOperator::Equal)?,
            Instruction::Ne => self.binary(BinaryOperator::NotEqual)?,
            Instruction::Lt => self.binary(BinaryOperator::Less)?,
            Instruction::Le => self.binary(BinaryOperator::LessEqual)?,
            Instruction::Gt => self.binary(BinaryOperator::Greater)?,
            Instruction::Ge => self.binary(BinaryOperator::GreaterEqual)?,
            Instruction::And => self.binary(BinaryOperator::And)?,
            Instruction::Or => self.binary(BinaryOperator::Or)?,
            Instruction::Neg => self.unary(UnaryOperator::Negate)?,
            Instruction::Not => self.unary(UnaryOperator::Not)?,
            Instruction::Jump(target) => self.frame_mut()?.ip = *target,
            Instruction::JumpIfFalse(target) => {
                if !self.pop()?.is_truthy() {
                    self.frame_mut()?.ip = *target;
                }
            },
            Instruction::Call { name, argc } => {
                let args = self.pop_n(*argc)?;
                self.push_frame(name, args, ReturnTarget::Caller)?;
            },
            Instruction::CallBuiltin { name, argc } => {
                let args = self.pop_n(*argc)?;
                if let Some(target) = name.strip_prefix(MAP_PREFIX) {
                    check_arity(name, &args, 1)?;
                    self.begin_map(target, &args[0])?;
                } else {
                    let result = self.call_builtin(name, &args)?;
                    self.stack.push(result);
                }
            },
            Instruction::CallGate { name, argc } => {
                let args = self.pop_n(*argc)?;
                let result = self.call_gate(name, &args)?;
                self.stack.push(result);
            },
            Instruction::Return => {
                let value = self.pop()?;
                return self.do_return(value);
            },
            Instruction::Pop => {
                self.pop()?;
            },
        }
        Ok(None)
    }

    /// Pops the current frame and routes `value` to its return target.
    fn do_return(&mut self, value: Value) -> EvalResult<Option<Value>> {
        let frame = self.frames
                        .pop()
                        .ok_or_else(|| RuntimeError::StackUnderflow { function: "<host>".to_string() })?;
        trace!(function = %frame.function.name, "return");

        match frame.return_target {
            ReturnTarget::Host => Ok(Some(value)),
            ReturnTarget::Caller => {
                self.stack.push(value);
                Ok(None)
            },
            ReturnTarget::Map => {
                self.resume_map(value)?;
                Ok(None)
            },
        }
    }

    fn binary(&mut self, op: BinaryOperator) -> EvalResult<()> {
        let right = self.pop()?;
        let left = self.pop()?;
        let result = eval_binary(op, &left, &right, self.current_function())?;
        self.stack.push(result);
        Ok(())
    }

    fn unary(&mut self, op: UnaryOperator) -> EvalResult<()> {
        let operand = self.pop()?;
        let result = eval_unary(op, &operand, self.current_function())?;
        self.stack.push(result);
        Ok(())
    }

    fn load_index(&self, array: &Value, index: &Value) -> EvalResult<Value> {
        let function = self.current_function();
        let elements = array.as_array(function)?.borrow();
        let index = index.as_index(function)?;
        elements.get(index)
                .cloned()
                .ok_or_else(|| RuntimeError::IndexOutOfBounds { index,
                                                                len: elements.len(),
                                                                function: function.to_string() })
    }

    fn store_index(&self, name: &str, index: &Value, value: Value) -> EvalResult<()> {
        let function = self.current_function();
        let array = self.local(name)?.as_array(function)?;
        let index = index.as_index(function)?;
        let mut elements = array.borrow_mut();
        let len = elements.len();
        let slot = elements.get_mut(index)
                           .ok_or_else(|| RuntimeError::IndexOutOfBounds { index,
                                                                           len,
                                                                           function: function.to_string() })?;
        *slot = value;
        Ok(())
    }

    fn local(&self, name: &str) -> EvalResult<&Value> {
        self.frames
            .last()
            .and_then(|frame| frame.locals.get(name))
            .ok_or_else(|| RuntimeError::UndefinedVariable { name:     name.to_string(),
                                                             function: self.current_function().to_string(), })
    }

    fn frame_mut(&mut self) -> EvalResult<&mut Frame<'m>> {
        self.frames
            .last_mut()
            .ok_or_else(|| RuntimeError::StackUnderflow { function: "<host>".to_string() })
    }

    fn pop(&mut self) -> EvalResult<Value> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => Err(RuntimeError::StackUnderflow { function: self.current_function().to_string() }),
        }
    }

    /// Pops `n` values, returned in the order they were pushed.
    fn pop_n(&mut self, n: usize) -> EvalResult<Vec<Value>> {
        if self.stack.len() < n {
            return Err(RuntimeError::StackUnderflow { function: self.current_function().to_string() });
        }
        Ok(self.stack.split_off(self.stack.len() - n))
    }
}

/// Executes `entry` in `module` with a fresh interpreter.
///
/// # Errors
/// See [`Interpreter::execute`].
pub fn execute(module: &Module, entry: &str, config: &ExecutionConfig) -> EvalResult<Execution> {
    Interpreter::new(module, config.clone()).execute(entry)
}
