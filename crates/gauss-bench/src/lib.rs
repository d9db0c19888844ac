#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the benchmark.
pub mod error;

/// Trial configuration, the timed trial loop and its report.
pub mod trial;

pub use crate::error::BenchError;
pub use crate::trial::{run, run_trials, BenchmarkReport, TrialConfig, TrialResult};
