//! Run-time configuration for the harness
//!
//! Configuration is resolved exactly once at startup (environment variables,
//! optionally overridden by CLI flags) and then passed by value into the
//! runner and session manager. No component reads ambient state after
//! construction.

use serde::{Deserialize, Serialize};

use crate::{Result, SmokeError};

/// Environment variable holding the base URL of the site under test
pub const ENV_BASE_URL: &str = "SMOKE_BASE_URL";
/// Environment variable that, when set to a truthy value, shows the browser
pub const ENV_HEADED: &str = "SMOKE_HEADED";
/// Environment variable holding the worker-pool size
pub const ENV_CONCURRENCY: &str = "SMOKE_CONCURRENCY";

/// Browser viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Harness-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokeConfig {
    /// Base URL of the deployed site under test
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Run the browser headless (default) or headed
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser viewport
    #[serde(default)]
    pub viewport: Viewport,

    /// Worker-pool size: at most this many sessions are open at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Session startup budget (launch + initial navigation), milliseconds
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,

    /// Default assertion wait budget, milliseconds
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:4173/".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

fn default_startup_timeout_ms() -> u64 {
    30_000
}

fn default_wait_timeout_ms() -> u64 {
    5_000
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headless: default_headless(),
            viewport: Viewport::default(),
            concurrency: default_concurrency(),
            startup_timeout_ms: default_startup_timeout_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl SmokeConfig {
    /// Build a configuration from the process environment, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Ok(headed) = std::env::var(ENV_HEADED) {
            config.headless = !parse_truthy(&headed);
        }
        if let Ok(n) = std::env::var(ENV_CONCURRENCY) {
            config.concurrency = n.parse().map_err(|_| {
                SmokeError::Config(format!("{} must be a positive integer, got {:?}", ENV_CONCURRENCY, n))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the rest of the harness relies on
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(SmokeError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SmokeError::Config(format!(
                "base URL must be http(s), got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn parse_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
