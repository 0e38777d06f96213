//! # BondLab Math
//!
//! Numerical root finding for the BondLab fixed income engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson, bisection, and a safeguarded hybrid of the two
//!
//! Yields are solved in `f64`; the solvers never allocate and are bounded by
//! [`solvers::SolverConfig::max_iterations`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, hybrid, newton_raphson, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
