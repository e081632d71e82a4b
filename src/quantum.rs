/// Single-qubit gate matrices.
pub mod gates;

/// The state-vector simulator.
///
/// Holds `2^n` complex amplitudes, applies gates in place, measures with
/// collapse and samples outcome counts.
pub mod simulator;

pub use simulator::Simulator;

/// Result type used by the simulator.
pub type QuantumResult<T> = Result<T, crate::error::QuantumError>;
