//! Newton-Raphson root-finding algorithm.

use super::{SolverConfig, SolverResult, MIN_DERIVATIVE};
use crate::error::{MathError, MathResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops once
/// `|f(x)|` falls below the tolerance.
///
/// # Example
///
/// ```rust
/// use bondlab_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        x = newton_step(x, fx, df(x))?;
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

/// One Newton update `x - f(x) / f'(x)`.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] when `|f'(x)|` is below [`MIN_DERIVATIVE`]
/// - [`MathError::InvalidInput`] when the update is not finite
pub(crate) fn newton_step(x: f64, fx: f64, dfx: f64) -> MathResult<f64> {
    if dfx.abs() < MIN_DERIVATIVE {
        return Err(MathError::DivisionByZero { value: dfx });
    }
    let next = x - fx / dfx;
    if !next.is_finite() {
        return Err(MathError::invalid_input("Newton produced non-finite value"));
    }
    Ok(next)
}
