//! Scenario registry and bounded-concurrency runner for sitesmoke
//!
//! The registry is pure data: an ordered list of named async scenario
//! bodies. The runner dispatches it over a semaphore-bounded worker pool,
//! wraps every scenario in its own session scope, isolates failures per
//! scenario, and aggregates the results into a [`sitesmoke_core::RunSummary`]
//! the caller turns into a process exit status.

pub mod registry;
pub mod runner;

pub use registry::{Scenario, ScenarioFn, ScenarioRegistry};
pub use runner::Runner;
