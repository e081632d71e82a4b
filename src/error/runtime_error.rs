#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while executing bytecode.
///
/// Most variants carry the name of the function that was executing when the
/// error was raised, which is the closest thing to a source location the
/// bytecode keeps.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in the current frame.
    UndefinedVariable {
        /// The name of the variable.
        name:     String,
        /// The function being executed.
        function: String,
    },
    /// Called a user function that does not exist in the module.
    UndefinedFunction {
        /// The name of the callee.
        name:     String,
        /// The function being executed.
        function: String,
    },
    /// The entry point named by the caller does not exist.
    MissingEntryPoint {
        /// The requested entry point.
        name: String,
    },
    /// A builtin call named a builtin the interpreter does not provide.
    UnknownBuiltin {
        /// The name of the builtin.
        name:     String,
        /// The function being executed.
        function: String,
    },
    /// A gate call named a gate the simulator does not provide.
    UnknownGate {
        /// The name of the gate.
        name:     String,
        /// The function being executed.
        function: String,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the callee.
        name:     String,
        /// The number of arguments the callee accepts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// Indexed a value that is not an array.
    NotAnArray {
        /// The function being executed.
        function: String,
    },
    /// An index was negative, fractional or not a number.
    InvalidIndex {
        /// The rejected index.
        index:    String,
        /// The function being executed.
        function: String,
    },
    /// An index was past the end of the array.
    IndexOutOfBounds {
        /// The requested index.
        index:    usize,
        /// The length of the array.
        len:      usize,
        /// The function being executed.
        function: String,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the mismatch.
        details:  String,
        /// The function being executed.
        function: String,
    },
    /// An instruction needed more operands than the stack holds.
    StackUnderflow {
        /// The function being executed.
        function: String,
    },
    /// The program dispatched more instructions than the configured ceiling.
    IterationLimitExceeded {
        /// The ceiling that was exceeded.
        limit: usize,
    },
    /// The call stack grew deeper than the configured ceiling.
    CallDepthExceeded {
        /// The ceiling that was exceeded.
        limit: usize,
    },
    /// The quantum simulator rejected an operation.
    Quantum(QuantumError),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, function } => {
                write!(f, "Runtime error in '{function}': Undefined variable '{name}'.")
            },
            Self::UndefinedFunction { name, function } => {
                write!(f, "Runtime error in '{function}': Undefined function '{name}'.")
            },
            Self::MissingEntryPoint { name } => {
                write!(f, "Runtime error: Entry point '{name}' not found.")
            },
            Self::UnknownBuiltin { name, function } => {
                write!(f, "Runtime error in '{function}': Unknown builtin '{name}'.")
            },
            Self::UnknownGate { name, function } => {
                write!(f, "Runtime error in '{function}': Unknown quantum gate '{name}'.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found, } => write!(f,
                                                             "Runtime error: '{name}' expects {expected} argument(s) but received {found}."),
            Self::NotAnArray { function } => {
                write!(f, "Runtime error in '{function}': Cannot index a non-array value.")
            },
            Self::InvalidIndex { index, function } => {
                write!(f, "Runtime error in '{function}': Invalid array index {index}.")
            },
            Self::IndexOutOfBounds { index,
                                     len,
                                     function, } => write!(f,
                                                           "Runtime error in '{function}': Index {index} out of bounds for array of length {len}."),
            Self::TypeMismatch { details, function } => {
                write!(f, "Runtime error in '{function}': Type error: {details}.")
            },
            Self::StackUnderflow { function } => {
                write!(f, "Runtime error in '{function}': Operand stack underflow.")
            },
            Self::IterationLimitExceeded { limit } => write!(f,
                                                             "Runtime error: Execution exceeded {limit} instructions (possible infinite loop)."),
            Self::CallDepthExceeded { limit } => {
                write!(f, "Runtime error: Call depth exceeded {limit} frames.")
            },
            Self::Quantum(e) => write!(f, "Runtime error: {e}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<QuantumError> for RuntimeError {
    fn from(e: QuantumError) -> Self {
        Self::Quantum(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors raised by the quantum simulator.
pub enum QuantumError {
    /// A qubit index outside the register.
    QubitOutOfRange {
        /// The requested qubit.
        qubit:      usize,
        /// The size of the register.
        num_qubits: usize,
    },
    /// A qubit argument that is not a non-negative integer.
    InvalidQubit {
        /// The rejected argument.
        value: String,
    },
    /// A controlled gate whose control and target are the same qubit.
    SameControlAndTarget {
        /// The qubit used for both roles.
        qubit: usize,
    },
}

impl std::fmt::Display for QuantumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QubitOutOfRange { qubit, num_qubits } => {
                write!(f, "Qubit {qubit} is out of range for a {num_qubits}-qubit register.")
            },
            Self::InvalidQubit { value } => write!(f, "Invalid qubit index {value}."),
            Self::SameControlAndTarget { qubit } => {
                write!(f, "Control and target must differ (both are qubit {qubit}).")
            },
        }
    }
}

impl std::error::Error for QuantumError {}
