//! Result types produced by a harness run

use serde::{Deserialize, Serialize};

/// Outcome of a single scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    /// Failure with the triggering error's message
    Failed(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result of one scenario execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub scenario: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

impl RunResult {
    pub fn passed(scenario: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            scenario: scenario.into(),
            outcome: Outcome::Passed,
            duration_ms,
        }
    }

    pub fn failed(scenario: impl Into<String>, reason: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            scenario: scenario.into(),
            outcome: Outcome::Failed(reason.into()),
            duration_ms,
        }
    }
}

/// Aggregate of a full run, in registry order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<RunResult>,
}

impl RunSummary {
    /// Aggregate individual results into a summary
    pub fn from_results(results: Vec<RunResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.outcome.is_passed()).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
            results,
        }
    }

    /// True iff every scenario passed
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// All failed results, in registry order
    pub fn failures(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|r| !r.outcome.is_passed())
    }
}
