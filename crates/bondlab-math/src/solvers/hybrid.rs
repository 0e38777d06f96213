//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson safeguarded by bisection inside a sign-changing bracket.

use log::trace;

use super::bisection::check_bracket;
use super::newton::newton_step;
use super::{SolverConfig, SolverResult};
use crate::error::{MathError, MathResult};

/// Hybrid Newton-Raphson / bisection root finder.
///
/// The bracket `bounds` must contain a sign change. Every evaluation shrinks
/// the bracket. A Newton step is taken when the derivative is usable, the
/// step lands strictly inside the bracket and the previous step at least
/// halved `|f|`; otherwise the bracket is bisected. Convergence is declared
/// when `|f(x)| < tolerance` or the bracket collapses to machine precision.
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] when `f` has the same sign at both bounds
/// - [`MathError::ConvergenceFailed`] when the iteration budget runs out
///
/// # Example
///
/// ```rust
/// use bondlab_math::solvers::{hybrid, SolverConfig};
///
/// // Root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut lo = bounds.0.min(bounds.1);
    let mut hi = bounds.0.max(bounds.1);

    let f_lo = f(lo);
    if let Some(endpoint) = check_bracket(lo, hi, f_lo, f(hi), config)? {
        return Ok(endpoint);
    }

    let lo_is_negative = f_lo < 0.0;

    let mut x = if initial_guess > lo && initial_guess < hi {
        initial_guess
    } else {
        0.5 * (lo + hi)
    };
    let mut prev_residual = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if fx.is_finite() {
            if (fx < 0.0) == lo_is_negative {
                lo = x;
            } else {
                hi = x;
            }
        }

        if hi - lo <= f64::EPSILON * x.abs().max(1.0) {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let newton = newton_step(x, fx, df(x))
            .ok()
            .filter(|n| *n > lo && *n < hi && fx.abs() <= 0.5 * prev_residual);

        prev_residual = fx.abs();
        x = if let Some(newton) = newton {
            newton
        } else {
            trace!("hybrid: bisecting [{lo}, {hi}] at iteration {iteration}");
            0.5 * (lo + hi)
        };
    }

    let fx = f(x);
    if fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: config.max_iterations,
            residual: fx,
        });
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}
