use std::collections::BTreeMap;

use num::complex::Complex64;
use rand::{Rng, RngCore};
use tracing::trace;

use crate::{
    error::QuantumError,
    quantum::{
        QuantumResult,
        gates::{self, Matrix},
    },
};

/// Probabilities below this are treated as zero when sampling.
pub const SAMPLE_EPSILON: f64 = 1e-10;

/// An ideal, noiseless state-vector simulator.
///
/// The register starts in `|0…0⟩`. Basis state `i` has qubit `q` set when
/// bit `q` of `i` is set, so qubit 0 is the least significant bit.
///
/// # Example
/// ```
/// use quarkdsl::quantum::Simulator;
///
/// let mut sim = Simulator::new(2);
/// sim.h(0).unwrap();
/// sim.cx(0, 1).unwrap();
///
/// let p = sim.probabilities();
/// assert!((p[0b00] - 0.5).abs() < 1e-12);
/// assert!((p[0b11] - 0.5).abs() < 1e-12);
/// assert_eq!(sim.gate_log(), ["H q0", "CX q0, q1"]);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
    gate_log:   Vec<String>,
}

impl Simulator {
    /// Creates a register of `num_qubits` qubits in the all-zero state.
    #[must_use]
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { num_qubits,
               amplitudes,
               gate_log: Vec::new() }
    }

    /// Restores `|0…0⟩` and clears the gate log.
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
        self.gate_log.clear();
    }

    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The current amplitudes, indexed by basis state.
    #[must_use]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// The probability of each basis state.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// One human-readable entry per applied operation, in order.
    #[must_use]
    pub fn gate_log(&self) -> &[String] {
        &self.gate_log
    }

    pub fn h(&mut self, qubit: usize) -> QuantumResult<()> {
        self.single("H".to_string(), &gates::hadamard(), qubit)
    }

    pub fn x(&mut self, qubit: usize) -> QuantumResult<()> {
        self.single("X".to_string(), &gates::pauli_x(), qubit)
    }

    pub fn y(&mut self, qubit: usize) -> QuantumResult<()> {
        self.single("Y".to_string(), &gates::pauli_y(), qubit)
    }

    pub fn z(&mut self, qubit: usize) -> QuantumResult<()> {
        self.single("Z".to_string(), &gates::pauli_z(), qubit)
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.single(format!("RX({theta:.4})"), &gates::rx(theta), qubit)
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.single(format!("RY({theta:.4})"), &gates::ry(theta), qubit)
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.single(format!("RZ({theta:.4})"), &gates::rz(theta), qubit)
    }

    /// Controlled NOT: flips `target` in every basis state where `control`
    /// is set.
    pub fn cx(&mut self, control: usize, target: usize) -> QuantumResult<()> {
        self.controlled("CX", &gates::pauli_x(), control, target)
    }

    /// Controlled Z: negates the amplitude of every basis state where both
    /// qubits are set.
    pub fn cz(&mut self, control: usize, target: usize) -> QuantumResult<()> {
        self.controlled("CZ", &gates::pauli_z(), control, target)
    }

    /// Measures one qubit in the computational basis.
    ///
    /// The outcome is drawn from `rng` with the Born-rule probability. The
    /// state then collapses onto the outcome and is renormalised. An outcome
    /// whose probability is below [`SAMPLE_EPSILON`] is never chosen.
    ///
    /// # Returns
    /// The measured bit, `0` or `1`.
    pub fn measure(&mut self, qubit: usize, rng: &mut dyn RngCore) -> QuantumResult<u8> {
        self.check_qubit(qubit)?;
        let bit = 1 << qubit;

        let (p0, p1) = self.amplitudes
                           .iter()
                           .enumerate()
                           .fold((0.0, 0.0), |(p0, p1), (i, a)| {
                               if i & bit == 0 {
                                   (p0 + a.norm_sqr(), p1)
                               } else {
                                   (p0, p1 + a.norm_sqr())
                               }
                           });

        let r: f64 = rng.r#gen::<f64>() * (p0 + p1);
        let outcome = if p1 <= SAMPLE_EPSILON {
            0
        } else if p0 <= SAMPLE_EPSILON {
            1
        } else {
            u8::from(r >= p0)
        };
        let p = if outcome == 0 { p0 } else { p1 };
        let norm = p.sqrt();

        for (i, amplitude) in self.amplitudes.iter_mut().enumerate() {
            let set = i & bit != 0;
            if set == (outcome == 1) {
                if norm > 0.0 {
                    *amplitude /= norm;
                }
            } else {
                *amplitude = Complex64::new(0.0, 0.0);
            }
        }

        trace!(qubit, outcome, p0, "measure");
        self.gate_log.push(format!("MEASURE q{qubit} -> {outcome}"));
        Ok(outcome)
    }

    /// Draws `shots` basis-state outcomes from the current distribution
    /// without collapsing the state.
    ///
    /// Keys are bit strings of width `num_qubits` with qubit 0 as the
    /// rightmost character.
    pub fn sample(&self, shots: usize, rng: &mut dyn RngCore) -> BTreeMap<String, usize> {
        let mut cumulative = Vec::new();
        let mut total = 0.0;
        for (index, p) in self.probabilities().into_iter().enumerate() {
            if p >= SAMPLE_EPSILON {
                total += p;
                cumulative.push((index, total));
            }
        }

        let mut counts = BTreeMap::new();
        let Some(&(last, _)) = cumulative.last() else {
            return counts;
        };

        for _ in 0..shots {
            let r: f64 = rng.r#gen();
            let index = cumulative.iter()
                                  .find(|(_, c)| r < *c)
                                  .map_or(last, |(i, _)| *i);
            *counts.entry(self.basis_label(index)).or_insert(0) += 1;
        }
        counts
    }

    /// Formats a basis-state index as a bit string, qubit 0 rightmost.
    #[must_use]
    pub fn basis_label(&self, index: usize) -> String {
        format!("{index:0width$b}", width = self.num_qubits)
    }

    fn check_qubit(&self, qubit: usize) -> QuantumResult<()> {
        if qubit >= self.num_qubits {
            return Err(QuantumError::QubitOutOfRange { qubit,
                                                       num_qubits: self.num_qubits });
        }
        Ok(())
    }

    fn single(&mut self, name: String, matrix: &Matrix, qubit: usize) -> QuantumResult<()> {
        self.check_qubit(qubit)?;
        let bit = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            let partner = i ^ bit;
            if i < partner {
                self.apply_pair(matrix, i, partner);
            }
        }
        trace!(gate = %name, qubit, "apply");
        self.gate_log.push(format!("{name} q{qubit}"));
        Ok(())
    }

    fn controlled(&mut self,
                  name: &str,
                  matrix: &Matrix,
                  control: usize,
                  target: usize)
                  -> QuantumResult<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(QuantumError::SameControlAndTarget { qubit: control });
        }

        let control_bit = 1 << control;
        let target_bit = 1 << target;
        for i in 0..self.amplitudes.len() {
            let partner = i ^ target_bit;
            if i & control_bit != 0 && i < partner {
                self.apply_pair(matrix, i, partner);
            }
        }
        trace!(gate = name, control, target, "apply");
        self.gate_log.push(format!("{name} q{control}, q{target}"));
        Ok(())
    }

    /// Applies `matrix` to the amplitude pair `(zero, one)`, where `zero` has
    /// the target bit clear and `one` has it set.
    fn apply_pair(&mut self, matrix: &Matrix, zero: usize, one: usize) {
        let a0 = self.amplitudes[zero];
        let a1 = self.amplitudes[one];
        self.amplitudes[zero] = matrix[0][0] * a0 + matrix[0][1] * a1;
        self.amplitudes[one] = matrix[1][0] * a0 + matrix[1][1] * a1;
    }
}
