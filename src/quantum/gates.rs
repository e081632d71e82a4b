use std::f64::consts::FRAC_1_SQRT_2;

use num::complex::Complex64;

/// A 2x2 unitary in row-major order.
pub type Matrix = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Hadamard: `1/√2 [[1, 1], [1, -1]]`.
#[must_use]
pub const fn hadamard() -> Matrix {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let neg_h = Complex64::new(-FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, neg_h]]
}

/// Pauli-X (bit flip).
#[must_use]
pub const fn pauli_x() -> Matrix {
    [[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y: `[[0, -i], [i, 0]]`.
#[must_use]
pub const fn pauli_y() -> Matrix {
    [[ZERO, Complex64::new(0.0, -1.0)], [I, ZERO]]
}

/// Pauli-Z (phase flip).
#[must_use]
pub const fn pauli_z() -> Matrix {
    [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]]
}

/// Rotation about X: `[[cos θ/2, -i sin θ/2], [-i sin θ/2, cos θ/2]]`.
#[must_use]
pub fn rx(theta: f64) -> Matrix {
    let (sin, cos) = (theta / 2.0).sin_cos();
    let c = Complex64::new(cos, 0.0);
    let s = Complex64::new(0.0, -sin);
    [[c, s], [s, c]]
}

/// Rotation about Y: `[[cos θ/2, -sin θ/2], [sin θ/2, cos θ/2]]`.
#[must_use]
pub fn ry(theta: f64) -> Matrix {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [[Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
     [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)]]
}

/// Rotation about Z: `diag(e^{-iθ/2}, e^{iθ/2})`.
#[must_use]
pub fn rz(theta: f64) -> Matrix {
    let half = theta / 2.0;
    [[Complex64::from_polar(1.0, -half), ZERO], [ZERO, Complex64::from_polar(1.0, half)]]
}
