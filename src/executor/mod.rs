//! An executor is responsible for running test suites and generating results.

pub mod compare;
pub mod results;
pub mod suite;
mod context;

pub use context::{Context, Summary};
pub use test::{split_args, Execution, Termination, Test};
