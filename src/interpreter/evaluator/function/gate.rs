use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{check_arity, to_qubit},
        },
        value::core::Value,
    },
    quantum::{QuantumResult, Simulator},
};

type GateFn = fn(&mut Interpreter<'_>, &[Value]) -> EvalResult<Value>;

/// Defines the gate dispatch table and the public list of gate names.
macro_rules! gate_functions {
    ( $( $name:literal => { arity: $arity:expr, func: $func:expr $(,)? } ),* $(,)? ) => {
        struct GateDef {
            name:  &'static str,
            arity: usize,
            func:  GateFn,
        }
        static GATE_TABLE: &[GateDef] = &[
            $( GateDef { name: $name, arity: $arity, func: $func }, )*
        ];
        /// Names the compiler lowers to `CallGate`.
        pub const GATE_FUNCTIONS: &[&str] = &[ $($name,)* ];
    };
}

gate_functions! {
    "h"        => { arity: 1, func: |i, a| single(i, a, Simulator::h) },
    "hadamard" => { arity: 1, func: |i, a| single(i, a, Simulator::h) },
    "x"        => { arity: 1, func: |i, a| single(i, a, Simulator::x) },
    "pauli_x"  => { arity: 1, func: |i, a| single(i, a, Simulator::x) },
    "y"        => { arity: 1, func: |i, a| single(i, a, Simulator::y) },
    "pauli_y"  => { arity: 1, func: |i, a| single(i, a, Simulator::y) },
    "z"        => { arity: 1, func: |i, a| single(i, a, Simulator::z) },
    "pauli_z"  => { arity: 1, func: |i, a| single(i, a, Simulator::z) },
    "rx"       => { arity: 2, func: |i, a| rotation(i, a, Simulator::rx) },
    "ry"       => { arity: 2, func: |i, a| rotation(i, a, Simulator::ry) },
    "rz"       => { arity: 2, func: |i, a| rotation(i, a, Simulator::rz) },
    "cx"       => { arity: 2, func: |i, a| controlled(i, a, Simulator::cx) },
    "cnot"     => { arity: 2, func: |i, a| controlled(i, a, Simulator::cx) },
    "cz"       => { arity: 2, func: |i, a| controlled(i, a, Simulator::cz) },
    "measure"  => { arity: 1, func: measure },
}

impl Interpreter<'_> {
    /// Evaluates a quantum gate call.
    ///
    /// Arguments are in source order: qubits for plain and controlled gates,
    /// `(angle, qubit)` for rotations. Rotations are handed to the simulator
    /// as `(qubit, angle)`.
    ///
    /// # Returns
    /// The measured bit for `measure`, otherwise `0`.
    ///
    /// # Errors
    /// - Unknown gate name.
    /// - Wrong number of arguments.
    /// - An argument that is not a valid qubit, or a qubit outside the
    ///   register.
    pub fn call_gate(&mut self, name: &str, args: &[Value]) -> EvalResult<Value> {
        let gate =
            GATE_TABLE.iter()
                      .find(|g| g.name == name)
                      .ok_or_else(|| RuntimeError::UnknownGate { name:     name.to_string(),
                                                                 function: self.current_function().to_string(), })?;
        check_arity(name, args, gate.arity)?;
        (gate.func)(self, args)
    }
}

fn single(interpreter: &mut Interpreter<'_>,
          args: &[Value],
          apply: fn(&mut Simulator, usize) -> QuantumResult<()>)
          -> EvalResult<Value> {
    let qubit = to_qubit(&args[0])?;
    apply(&mut interpreter.simulator, qubit)?;
    Ok(Value::Number(0.0))
}

fn rotation(interpreter: &mut Interpreter<'_>,
            args: &[Value],
            apply: fn(&mut Simulator, usize, f64) -> QuantumResult<()>)
            -> EvalResult<Value> {
    let angle = args[0].as_number(interpreter.current_function())?;
    let qubit = to_qubit(&args[1])?;
    apply(&mut interpreter.simulator, qubit, angle)?;
    Ok(Value::Number(0.0))
}

fn controlled(interpreter: &mut Interpreter<'_>,
              args: &[Value],
              apply: fn(&mut Simulator, usize, usize) -> QuantumResult<()>)
              -> EvalResult<Value> {
    let control = to_qubit(&args[0])?;
    let target = to_qubit(&args[1])?;
    apply(&mut interpreter.simulator, control, target)?;
    Ok(Value::Number(0.0))
}

fn measure(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult<Value> {
    let qubit = to_qubit(&args[0])?;
    let bit = interpreter.simulator.measure(qubit, interpreter.rng.as_mut())?;
    Ok(Value::Number(f64::from(bit)))
}
