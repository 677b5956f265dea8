//! Browser session lifecycle and assertion primitives for sitesmoke
//!
//! This crate owns everything that touches a rendered page: opening and
//! closing one browser session per scenario, the polling wait/assert
//! primitives scenarios are written in, and the declarative check tables
//! driving repetitive click/assert sequences.
//!
//! # Architecture
//!
//! - [`driver`]: the four-capability seam ([`Page`], [`BrowserEngine`])
//!   separating the harness from the automation layer
//! - [`chrome`]: the production engine over Chrome DevTools Protocol
//! - [`session`]: session open/close scoped to one scenario execution
//! - [`assert`]: wait-then-assert primitives with default timeouts
//! - [`check`]: the `CheckRecord` data table and its evaluation loop
//!
//! # Example
//!
//! ```no_run
//! use sitesmoke_browser::{ChromeEngine, SessionManager};
//! use sitesmoke_browser::assert::{text_includes, TextOptions};
//! use sitesmoke_core::SmokeConfig;
//!
//! #[tokio::main]
//! async fn main() -> sitesmoke_core::Result<()> {
//!     let sessions = SessionManager::new(ChromeEngine::new(), SmokeConfig::default());
//!     let session = sessions.open().await?;
//!     let page = session.page();
//!
//!     text_includes(
//!         page.as_ref(),
//!         "body",
//!         "Industry Documents Library",
//!         &TextOptions::default(),
//!     )
//!     .await?;
//!
//!     sessions.close(session).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! Chrome or Chromium installed; headless operation needs no further setup.

pub mod assert;
pub mod check;
pub mod chrome;
pub mod driver;
pub mod session;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use assert::{ClickOptions, TextOptions, UrlPattern, Visibility, WaitOptions};
pub use check::{CheckRecord, Expectation};
pub use chrome::ChromeEngine;
pub use driver::{BrowserEngine, ElementProbe, Locator, Page, PageHandle, SessionConfig};
pub use session::{Session, SessionManager};
