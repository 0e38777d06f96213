//! Yield solver and discounting kernels.
//!
//! Cash flows are reduced to `(t, amount)` pairs in `f64`, with `t` the year
//! fraction from settlement, before any discounting. The kernels below give
//! the present value and its first two yield derivatives for each
//! [`Compounding`] convention; the solver feeds the first derivative to the
//! hybrid Newton/bisection root finder.
//!
//! # Example
//!
//! ```rust
//! use bondlab_bonds::pricing::{pv_at_yield, YieldSolver};
//! use bondlab_bonds::types::YieldConvention;
//!
//! // Two-year 5% semi-annual bond, per 100
//! let flows = [(0.5, 2.5), (1.0, 2.5), (1.5, 2.5), (2.0, 102.5)];
//! let conv = YieldConvention::default();
//!
//! let result = YieldSolver::new().solve(&flows, 100.0, &conv).unwrap();
//! assert!((result.yield_value - 0.05).abs() < 1e-9);
//! assert!((pv_at_yield(&flows, 0.05, &conv) - 100.0).abs() < 1e-9);
//! ```

use log::{debug, warn};

use bondlab_core::types::{Compounding, Frequency};
use bondlab_math::solvers::{hybrid, SolverConfig};

use crate::error::{BondError, BondResult};
use crate::types::YieldConvention;

/// Yield bracket searched by the solver.
pub const YIELD_BRACKET: (f64, f64) = (-0.5, 1.0);

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The calculated yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final price residual.
    pub residual: f64,
}

/// Discount factor for time `t` at yield `y`.
#[must_use]
pub fn discount_factor(y: f64, t: f64, compounding: Compounding, frequency: Frequency) -> f64 {
    match compounding {
        Compounding::Simple => 1.0 / (1.0 + y * t),
        Compounding::Compounded => {
            let f = f64::from(frequency.periods_per_year());
            (1.0 + y / f).powf(-f * t)
        }
        Compounding::Continuous => (-y * t).exp(),
    }
}

/// Present value of `(t, amount)` flows at yield `y`.
#[must_use]
pub fn pv_at_yield(flows: &[(f64, f64)], y: f64, conv: &YieldConvention) -> f64 {
    flows
        .iter()
        .map(|&(t, amount)| amount * discount_factor(y, t, conv.compounding, conv.frequency))
        .sum()
}

/// First derivative of present value with respect to yield.
#[must_use]
pub fn pv_derivative(flows: &[(f64, f64)], y: f64, conv: &YieldConvention) -> f64 {
    let f = f64::from(conv.frequency.periods_per_year());
    flows
        .iter()
        .map(|&(t, amount)| match conv.compounding {
            Compounding::Simple => {
                let denom = 1.0 + y * t;
                -t * amount / (denom * denom)
            }
            Compounding::Compounded => -t * amount * (1.0 + y / f).powf(-f * t - 1.0),
            Compounding::Continuous => -t * amount * (-y * t).exp(),
        })
        .sum()
}

/// Second derivative of present value with respect to yield.
#[must_use]
pub fn pv_second_derivative(flows: &[(f64, f64)], y: f64, conv: &YieldConvention) -> f64 {
    let f = f64::from(conv.frequency.periods_per_year());
    flows
        .iter()
        .map(|&(t, amount)| match conv.compounding {
            Compounding::Simple => 2.0 * t * t * amount / (1.0 + y * t).powi(3),
            Compounding::Compounded => {
                t * (t + 1.0 / f) * amount * (1.0 + y / f).powf(-f * t - 2.0)
            }
            Compounding::Continuous => t * t * amount * (-y * t).exp(),
        })
        .sum()
}

/// Present-value weighted average time of the flows.
#[must_use]
pub fn macaulay_time(flows: &[(f64, f64)], y: f64, conv: &YieldConvention) -> f64 {
    let (weighted, pv) = flows.iter().fold((0.0, 0.0), |(weighted, pv), &(t, amount)| {
        let flow_pv = amount * discount_factor(y, t, conv.compounding, conv.frequency);
        (weighted + t * flow_pv, pv + flow_pv)
    });
    if pv == 0.0 {
        0.0
    } else {
        weighted / pv
    }
}

/// Price-to-yield solver.
///
/// Hybrid Newton-Raphson with analytic derivative, falling back to bisection
/// inside [`YIELD_BRACKET`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSolver {
    config: SolverConfig,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    ///
    /// Default tolerance: 1e-10
    /// Default max iterations: 100
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Creates a solver from an explicit configuration.
    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the yield whose present value equals `target`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::YieldNotFound` if there are no flows, the target
    /// is not bracketed or the solver runs out of iterations.
    pub fn solve(
        &self,
        flows: &[(f64, f64)],
        target: f64,
        conv: &YieldConvention,
    ) -> BondResult<YieldResult> {
        let Some(&(last_t, _)) = flows.last() else {
            return Err(BondError::yield_not_found("no cash flows after settlement"));
        };
        if !target.is_finite() {
            return Err(BondError::yield_not_found(format!(
                "target price {target} is not finite"
            )));
        }

        let (mut lo, hi) = YIELD_BRACKET;
        if conv.compounding.is_simple() && last_t > 0.0 {
            // Keep 1 + y t away from zero
            lo = lo.max(-0.99 / last_t);
        }

        // Current-yield style first guess including pull to par
        let total: f64 = flows.iter().map(|&(_, amount)| amount).sum();
        let initial_guess = if target > 0.0 && last_t > 0.0 {
            ((total - target) / last_t / target).clamp(lo, hi)
        } else {
            0.05
        };

        let objective = |y: f64| pv_at_yield(flows, y, conv) - target;
        let derivative = |y: f64| pv_derivative(flows, y, conv);

        match hybrid(objective, derivative, initial_guess, (lo, hi), &self.config) {
            Ok(result) => {
                debug!(
                    "solved yield {:.10} in {} iterations (residual {:.3e})",
                    result.root, result.iterations, result.residual
                );
                Ok(YieldResult {
                    yield_value: result.root,
                    iterations: result.iterations,
                    residual: result.residual,
                })
            }
            Err(err) => {
                warn!("yield solve failed for target {target}: {err}");
                Err(BondError::yield_not_found(err.to_string()))
            }
        }
    }
}
