//! # sitesmoke-core
//!
//! Core types for the sitesmoke smoke-test harness: the unified error type,
//! the run-time configuration resolved once at startup, and the result types
//! a run produces.
//!
//! Everything else in the workspace depends on this crate and nothing here
//! depends on a browser being present, so these types are usable from unit
//! tests without launching anything.

mod config;
mod error;
mod types;

pub use config::{SmokeConfig, Viewport};
pub use error::{Result, SmokeError};
pub use types::{Outcome, RunResult, RunSummary};
