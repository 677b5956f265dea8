//! Polling assertion primitives over a page handle
//!
//! Rendered page state is asynchronous relative to the action that triggered
//! it, so every primitive here is a wait-then-assert pair rather than an
//! instantaneous check: it polls the page, yielding between polls, until the
//! condition holds or the timeout elapses. A scenario calling a primitive
//! logically pauses at that point; under the worker pool this is where other
//! in-flight scenarios get to run.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use sitesmoke_core::{Result, SmokeError};

use crate::driver::{Locator, Page};

/// Default budget for a single wait
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between polls
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which element state satisfies a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Element present and rendered
    #[default]
    Visible,
    /// Element absent or not rendered
    Hidden,
    /// Element present, rendered or not
    Either,
}

#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub visibility: Visibility,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            visibility: Visibility::Visible,
        }
    }
}

/// Poll until an element matching the locator satisfies the visibility
/// condition
pub async fn wait_for_selector(
    page: &dyn Page,
    locator: &Locator,
    options: &WaitOptions,
) -> Result<()> {
    debug!("waiting for {} ({:?})", locator, options.visibility);
    let deadline = Instant::now() + options.timeout;
    loop {
        let probe = page.probe(locator).await?;
        let satisfied = match options.visibility {
            Visibility::Visible => probe.map(|p| p.visible).unwrap_or(false),
            Visibility::Hidden => probe.map(|p| !p.visible).unwrap_or(true),
            Visibility::Either => probe.is_some(),
        };
        if satisfied {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SmokeError::ElementNotFound {
                locator: locator.to_string(),
                timeout_ms: options.timeout.as_millis() as u64,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

#[derive(Debug, Clone)]
pub struct TextOptions {
    pub case_sensitive: bool,
    pub timeout: Duration,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Assert that the element's rendered text contains the expected substring
///
/// The text is read only after the element exists: a missing element is an
/// element-not-found failure, never a spurious mismatch against empty text.
pub async fn text_includes(
    page: &dyn Page,
    selector: &str,
    expected: &str,
    options: &TextOptions,
) -> Result<()> {
    let locator = Locator::css(selector);
    debug!("expecting {:?} in text of {}", expected, locator);
    let deadline = Instant::now() + options.timeout;
    let mut last_text: Option<String> = None;

    loop {
        if let Some(probe) = page.probe(&locator).await? {
            if contains(&probe.text, expected, options.case_sensitive) {
                return Ok(());
            }
            last_text = Some(probe.text);
        }
        if Instant::now() >= deadline {
            return match last_text {
                Some(actual) => Err(SmokeError::ContentMismatch {
                    subject: selector.to_string(),
                    expected: expected.to_string(),
                    actual,
                }),
                None => Err(SmokeError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms: options.timeout.as_millis() as u64,
                }),
            };
        }
        sleep(POLL_INTERVAL).await;
    }
}

fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Expected shape of the current page URL
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Exact URL (after fragment stripping)
    Literal(String),
    /// Anchored or partial regular expression
    Regex(regex::Regex),
}

impl UrlPattern {
    pub fn literal(url: impl Into<String>) -> Self {
        Self::Literal(url.into())
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        let compiled = regex::Regex::new(pattern)
            .map_err(|e| SmokeError::Config(format!("invalid URL pattern {:?}: {}", pattern, e)))?;
        Ok(Self::Regex(compiled))
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Literal(expected) => url == expected,
            Self::Regex(re) => re.is_match(url),
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(url) => write!(f, "{}", url),
            Self::Regex(re) => write!(f, "{}", re.as_str()),
        }
    }
}

/// Assert that the current page URL matches the pattern
///
/// The fragment identifier is stripped before matching, and the comparison
/// polls briefly so a just-triggered navigation has a chance to land.
pub async fn url_matches(page: &dyn Page, pattern: &UrlPattern) -> Result<()> {
    debug!("expecting URL to match {}", pattern);
    let deadline = Instant::now() + DEFAULT_WAIT_TIMEOUT;
    loop {
        let url = page.current_url().await?;
        let url = strip_fragment(&url);
        if pattern.matches(url) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SmokeError::ContentMismatch {
                subject: "page URL".to_string(),
                expected: pattern.to_string(),
                actual: url.to_string(),
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

fn strip_fragment(url: &str) -> &str {
    match url.split_once('#') {
        Some((before, _)) => before,
        None => url,
    }
}

#[derive(Debug, Clone)]
pub struct ClickOptions {
    /// Wait for the resulting page load to settle after the click
    pub expect_navigation: bool,
    pub timeout: Duration,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            expect_navigation: false,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Wait for the element, dispatch a click, and optionally wait for the
/// resulting navigation to settle
pub async fn click_and_wait(
    page: &dyn Page,
    locator: &Locator,
    options: &ClickOptions,
) -> Result<()> {
    wait_for_selector(
        page,
        locator,
        &WaitOptions {
            timeout: options.timeout,
            visibility: Visibility::Visible,
        },
    )
    .await?;

    page.click(locator).await?;

    if options.expect_navigation {
        page.wait_until_settled(options.timeout).await?;
    }
    Ok(())
}
