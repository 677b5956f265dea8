//! Bounded-concurrency scenario scheduler
//!
//! Scenarios are dispatched as independent tokio tasks gated by a semaphore
//! of `concurrency` permits, so at most that many browser sessions are open
//! system-wide. Each scenario runs inside its own session scope; whatever
//! makes it fail is recorded as that scenario's result and never affects
//! sibling scenarios. Results are joined in registry order so repeated runs
//! against an unchanged target report identically.

use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use sitesmoke_browser::{BrowserEngine, SessionManager};
use sitesmoke_core::{Outcome, RunResult, RunSummary, SmokeConfig};

use crate::registry::{Scenario, ScenarioRegistry};

/// Dispatches a scenario registry over a bounded worker pool
pub struct Runner<E: BrowserEngine> {
    sessions: SessionManager<E>,
    concurrency: usize,
}

impl<E: BrowserEngine + 'static> Runner<E> {
    pub fn new(engine: E, config: SmokeConfig) -> Self {
        let concurrency = config.concurrency.max(1);
        Self {
            sessions: SessionManager::new(engine, config),
            concurrency,
        }
    }

    /// Run every scenario and aggregate the results
    ///
    /// Never fails as a whole: per-scenario errors are captured into the
    /// summary, and the caller decides the process exit status from
    /// [`RunSummary::success`].
    pub async fn run(&self, registry: &ScenarioRegistry) -> RunSummary {
        let start = Instant::now();
        info!(
            "running {} scenario(s) with concurrency {}",
            registry.len(),
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles: Vec<(String, JoinHandle<RunResult>)> =
            Vec::with_capacity(registry.len());

        for scenario in registry.iter() {
            let scenario = scenario.clone();
            let sessions = self.sessions.clone();
            let semaphore = Arc::clone(&semaphore);
            let name = scenario.name().to_string();

            handles.push((
                name,
                tokio::spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            return RunResult::failed(
                                scenario.name(),
                                "scheduler shut down before dispatch",
                                0,
                            )
                        }
                    };
                    execute(&sessions, &scenario).await
                }),
            ));
        }

        // Join in registry order so the report is deterministic
        let mut results = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => RunResult::failed(&name, format!("scenario task failed: {}", e), 0),
            };
            match &result.outcome {
                Outcome::Passed => info!("✓ {} ({} ms)", result.scenario, result.duration_ms),
                Outcome::Failed(reason) => error!("✗ {} - {}", result.scenario, reason),
            }
            results.push(result);
        }

        let summary = RunSummary::from_results(results, start.elapsed().as_millis() as u64);
        info!(
            "{} passed, {} failed ({} ms)",
            summary.passed, summary.failed, summary.duration_ms
        );
        summary
    }
}

/// Run one scenario inside its own session scope
///
/// The session opened here is closed on every exit path: normal completion,
/// assertion failure, and panics contained by catch_unwind.
async fn execute<E: BrowserEngine>(
    sessions: &SessionManager<E>,
    scenario: &Scenario,
) -> RunResult {
    let start = Instant::now();
    info!("running scenario: {}", scenario.name());

    let session = match sessions.open().await {
        Ok(session) => session,
        Err(e) => return RunResult::failed(scenario.name(), e.to_string(), elapsed_ms(start)),
    };

    let page = session.page();
    let body = std::panic::AssertUnwindSafe(scenario.run(page))
        .catch_unwind()
        .await;

    if let Err(e) = sessions.close(session).await {
        warn!("failed to close session for {}: {}", scenario.name(), e);
    }

    let outcome = match body {
        Ok(Ok(())) => Outcome::Passed,
        Ok(Err(e)) => Outcome::Failed(e.to_string()),
        Err(panic) => Outcome::Failed(format!("scenario panicked: {}", panic_message(&panic))),
    };

    RunResult {
        scenario: scenario.name().to_string(),
        outcome,
        duration_ms: elapsed_ms(start),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
