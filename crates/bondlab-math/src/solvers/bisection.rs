//! Bisection root-finding algorithm.

use super::{SolverConfig, SolverResult};
use crate::error::{MathError, MathResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the interval, keeping the half whose endpoints have
/// opposite signs. Requires `f(a) * f(b) <= 0`.
///
/// # Example
///
/// ```rust
/// use bondlab_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    if let Some(endpoint) = check_bracket(lo, hi, f_lo, f(hi), config)? {
        return Ok(endpoint);
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = 0.5 * (lo + hi);
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

/// Checks that `[lo, hi]` brackets a root.
///
/// Returns `Some` when an endpoint is already within tolerance.
///
/// # Errors
///
/// [`MathError::InvalidBracket`] when the endpoint values share a sign or
/// either is NaN.
pub(crate) fn check_bracket(
    lo: f64,
    hi: f64,
    f_lo: f64,
    f_hi: f64,
    config: &SolverConfig,
) -> MathResult<Option<SolverResult>> {
    for (root, residual) in [(lo, f_lo), (hi, f_hi)] {
        if residual.abs() < config.tolerance {
            return Ok(Some(SolverResult {
                root,
                iterations: 0,
                residual,
            }));
        }
    }

    let product = f_lo * f_hi;
    if product.is_nan() || product > 0.0 {
        return Err(MathError::invalid_bracket(lo, hi, f_lo, f_hi));
    }
    Ok(None)
}
