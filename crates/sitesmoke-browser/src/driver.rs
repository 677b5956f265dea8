//! Driver traits decoupling the harness from the browser engine
//!
//! The harness needs exactly four capabilities from an automation layer:
//! open/close a session, navigate and detect settlement, probe an element's
//! presence/visibility/text, and dispatch a click. Anything implementing
//! [`BrowserEngine`] and [`Page`] is substitutable; the production engine
//! wraps `headless_chrome`, and tests use counting fakes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use sitesmoke_core::{Result, SmokeConfig, Viewport};

/// How an element is located on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Structural CSS selector
    Css(String),
    /// Human-readable query: a clickable element whose visible text matches
    Text(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::Text(label.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "{}", selector),
            Self::Text(label) => write!(f, "text={:?}", label),
        }
    }
}

/// Snapshot of an element's observable state at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementProbe {
    pub visible: bool,
    /// Rendered text as the user sees it
    pub text: String,
}

/// Per-page capabilities required from the automation layer
///
/// `probe` is deliberately instantaneous: all polling and timeout handling
/// lives in the assertion primitives, so every engine (real or fake) only has
/// to answer "what is on the page right now".
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to a URL and block until the load settles
    async fn goto(&self, url: &str) -> Result<()>;

    /// Probe the first element matching the locator; `Ok(None)` when no
    /// element matches
    async fn probe(&self, locator: &Locator) -> Result<Option<ElementProbe>>;

    /// Current page URL, including any fragment
    async fn current_url(&self) -> Result<String>;

    /// Dispatch a click on the first element matching the locator
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Wait until in-flight network activity from a triggered navigation
    /// settles
    async fn wait_until_settled(&self, timeout: Duration) -> Result<()>;
}

/// Shared page handle passed to scenario bodies
///
/// Valid only between session open and close of the owning scenario.
pub type PageHandle = Arc<dyn Page>;

/// Launch parameters for one session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub headless: bool,
    pub viewport: Viewport,
}

impl From<&SmokeConfig> for SessionConfig {
    fn from(config: &SmokeConfig) -> Self {
        Self {
            headless: config.headless,
            viewport: config.viewport,
        }
    }
}

/// Browser-engine seam: anything able to open and close page sessions
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Launch a browser under the given configuration and create one page
    /// context
    async fn open(&self, config: &SessionConfig) -> Result<PageHandle>;

    /// Tear down the session behind the handle
    async fn close(&self, page: PageHandle) -> Result<()>;
}
