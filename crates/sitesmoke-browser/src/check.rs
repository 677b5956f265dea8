//! Declarative click/assert check tables
//!
//! Several scenarios boil down to the same shape repeated over a list of
//! links: click this, then assert that. Instead of near-identical closures,
//! the repetition lives in data, a slice of [`CheckRecord`]s processed by
//! one loop. Each record runs against a freshly navigated page so no check
//! inherits navigation state from the one before it.

use tracing::debug;

use sitesmoke_core::Result;

use crate::assert::{click_and_wait, text_includes, url_matches, ClickOptions, TextOptions, UrlPattern};
use crate::driver::{Locator, Page};

/// What must hold after a check's trigger fires
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Rendered text of `selector` contains `needle`
    TextIncludes { selector: String, needle: String },
    /// Current page URL matches the pattern (fragment stripped)
    UrlMatches(UrlPattern),
}

/// One declarative "click this, then assert that" step
#[derive(Debug, Clone)]
pub struct CheckRecord {
    /// Short label used in diagnostics
    pub label: String,
    pub trigger: Locator,
    pub expected: Expectation,
    /// Whether the trigger is expected to navigate
    pub expect_navigation: bool,
}

impl CheckRecord {
    /// Click `trigger`, then assert `selector` text contains `needle`
    pub fn text(
        label: impl Into<String>,
        trigger: Locator,
        selector: impl Into<String>,
        needle: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            trigger,
            expected: Expectation::TextIncludes {
                selector: selector.into(),
                needle: needle.into(),
            },
            expect_navigation: false,
        }
    }

    /// Click `trigger`, then assert the page URL matches `pattern`
    ///
    /// URL checks always expect a navigation.
    pub fn url(label: impl Into<String>, trigger: Locator, pattern: UrlPattern) -> Self {
        Self {
            label: label.into(),
            trigger,
            expected: Expectation::UrlMatches(pattern),
            expect_navigation: true,
        }
    }

    pub fn with_navigation(mut self) -> Self {
        self.expect_navigation = true;
        self
    }
}

/// Evaluate each record against freshly reloaded page state
///
/// Fails on the first record whose trigger or expectation fails; the error
/// carries the failing selector/expected/actual detail.
pub async fn run_checks(page: &dyn Page, base_url: &str, records: &[CheckRecord]) -> Result<()> {
    for record in records {
        debug!("check: {}", record.label);
        page.goto(base_url).await?;

        click_and_wait(
            page,
            &record.trigger,
            &ClickOptions {
                expect_navigation: record.expect_navigation,
                ..ClickOptions::default()
            },
        )
        .await?;

        match &record.expected {
            Expectation::TextIncludes { selector, needle } => {
                text_includes(page, selector, needle, &TextOptions::default()).await?
            }
            Expectation::UrlMatches(pattern) => url_matches(page, pattern).await?,
        }
    }
    Ok(())
}
