/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use quarkdsl::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts a `usize` count to `f64`.
///
/// Counts in this crate (array lengths, measurement outcomes) stay far below
/// `2^53`, so the conversion saturates at `MAX_SAFE_U64_INT` instead of
/// failing.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    u64::try_from(value).map_or(MAX_SAFE_U64_INT, |v| v.min(MAX_SAFE_U64_INT)) as f64
}

/// Safely converts an `f64` to a `usize` index if the value is finite,
/// non-negative and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, negative, fractional or out-of-range
/// values.
///
/// ## Example
/// ```
/// use quarkdsl::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(3.0, ()), Ok(3));
/// assert!(f64_to_usize_checked(-1.0, ()).is_err());
/// assert!(f64_to_usize_checked(1.5, ()).is_err());
/// assert!(f64_to_usize_checked(f64::NAN, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    if value.fract() != 0.0 {
        return Err(error);
    }
    usize::try_from(value as u64).map_err(|_| error)
}
