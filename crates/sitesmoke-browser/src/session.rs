//! Browser session lifecycle, scoped to one scenario execution
//!
//! A session is one launched browser plus one page context. The runner opens
//! a fresh session per scenario and closes it on every exit path; no session
//! outlives its scenario and no two scenarios ever share one.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use sitesmoke_core::{Result, SmokeConfig, SmokeError};

use crate::driver::{BrowserEngine, Locator, PageHandle, SessionConfig};

const STARTUP_POLL: Duration = Duration::from_millis(100);

/// One open browser session
pub struct Session {
    page: PageHandle,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Handle to the session's page context
    pub fn page(&self) -> PageHandle {
        Arc::clone(&self.page)
    }
}

/// Opens and closes one session per scenario run
pub struct SessionManager<E: BrowserEngine> {
    engine: Arc<E>,
    config: SmokeConfig,
}

impl<E: BrowserEngine> Clone for SessionManager<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            config: self.config.clone(),
        }
    }
}

impl<E: BrowserEngine> SessionManager<E> {
    pub fn new(engine: E, config: SmokeConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Launch a browser under the configured headless/viewport settings,
    /// navigate to the base URL, and wait until the document root exists
    ///
    /// Fails with a session error when launch or the initial navigation does
    /// not complete within the startup budget.
    pub async fn open(&self) -> Result<Session> {
        let budget = Duration::from_millis(self.config.startup_timeout_ms);
        let page = tokio::time::timeout(budget, self.open_inner())
            .await
            .map_err(|_| {
                SmokeError::session(format!(
                    "session did not become ready within {}ms",
                    self.config.startup_timeout_ms
                ))
            })?
            .map_err(into_session_error)?;
        Ok(Session { page })
    }

    async fn open_inner(&self) -> Result<PageHandle> {
        let page = self.engine.open(&SessionConfig::from(&self.config)).await?;
        page.goto(&self.config.base_url).await?;

        // Minimal "page is interactive" condition: the document root exists
        let root = Locator::css("body");
        while page.probe(&root).await?.is_none() {
            sleep(STARTUP_POLL).await;
        }

        debug!("session ready at {}", self.config.base_url);
        Ok(page)
    }

    /// Release all resources tied to the session
    ///
    /// Must be invoked exactly once per opened session, on every exit path.
    /// The runner enforces this around scenario execution.
    pub async fn close(&self, session: Session) -> Result<()> {
        self.engine.close(session.page).await
    }
}

fn into_session_error(err: SmokeError) -> SmokeError {
    match err {
        err @ SmokeError::Session(_) => err,
        other => SmokeError::session(format!("session startup failed: {}", other)),
    }
}
