//! # hg-optimizer
//!
//! Optimization problem definitions and seeded search over hypergrids.
//!
//! Provides the `OptimizationProblem` container that pairs a parameter space
//! with an objective space, validation of candidate and observed points
//! against those spaces, and a reproducible random search strategy.

mod config;
mod problem;
mod search;

pub use config::{SamplerConfig, BATCH_SIZE_ENV, SEED_ENV};
pub use problem::{Objective, ObjectiveDirection, OptimizationProblem, ProblemRecord};
pub use search::{RandomSearch, SearchStrategy};
