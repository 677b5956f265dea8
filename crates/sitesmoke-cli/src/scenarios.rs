//! The static scenario set for the Industry Documents Library website
//!
//! Expected strings and URL patterns here are test data: they mirror what
//! the deployed site renders and get updated alongside site content changes.
//! The engine compares and reports; it never normalises an expected value.

use std::sync::Arc;
use std::time::Duration;

use sitesmoke_browser::assert::{
    click_and_wait, text_includes, wait_for_selector, ClickOptions, TextOptions, UrlPattern,
    Visibility, WaitOptions,
};
use sitesmoke_browser::check::{run_checks, CheckRecord};
use sitesmoke_browser::Locator;
use sitesmoke_core::{Result, SmokeConfig};
use sitesmoke_runner::ScenarioRegistry;

/// Build the ordered scenario set for one run
pub fn registry(config: &SmokeConfig) -> Result<ScenarioRegistry> {
    let mut registry = ScenarioRegistry::new();
    let base_url = config.base_url.clone();
    let wait = Duration::from_millis(config.wait_timeout_ms);

    // The session manager has already navigated to the base URL by the time
    // a body runs; scenarios only re-navigate when they need fresh state.

    registry.register("home-page-content", move |page| async move {
        wait_for_selector(
            page.as_ref(),
            &Locator::css("body"),
            &WaitOptions {
                timeout: wait,
                ..WaitOptions::default()
            },
        )
        .await?;
        text_includes(
            page.as_ref(),
            "body",
            "Industry Documents Library",
            &TextOptions {
                timeout: wait,
                ..TextOptions::default()
            },
        )
        .await
    });

    let nav_checks = Arc::new(navigation_checks());
    let base = base_url.clone();
    registry.register("primary-navigation", move |page| {
        let base = base.clone();
        let records = Arc::clone(&nav_checks);
        async move { run_checks(page.as_ref(), &base, &records).await }
    });

    registry.register("learn-more-banner", move |page| async move {
        click_and_wait(
            page.as_ref(),
            &Locator::text("Learn more"),
            &ClickOptions {
                expect_navigation: true,
                timeout: wait,
            },
        )
        .await?;
        text_includes(
            page.as_ref(),
            "h1",
            "Introducing the New IDL Website",
            &TextOptions {
                timeout: wait,
                ..TextOptions::default()
            },
        )
        .await
    });

    registry.register("search-entry", move |page| async move {
        click_and_wait(
            page.as_ref(),
            &Locator::css("button[aria-label=\"Search\"]"),
            &ClickOptions {
                timeout: wait,
                ..ClickOptions::default()
            },
        )
        .await?;
        wait_for_selector(
            page.as_ref(),
            &Locator::css("input[type=\"search\"]"),
            &WaitOptions {
                timeout: wait,
                visibility: Visibility::Visible,
            },
        )
        .await
    });

    let footer_checks = Arc::new(footer_checks()?);
    let base = base_url.clone();
    registry.register("footer-external-links", move |page| {
        let base = base.clone();
        let records = Arc::clone(&footer_checks);
        async move { run_checks(page.as_ref(), &base, &records).await }
    });

    Ok(registry)
}

/// Header menu entries and the breadcrumb each one renders after a click
///
/// The breadcrumb strings differ in depth between entries; both shapes are
/// what the live site currently renders and are kept verbatim.
fn navigation_checks() -> Vec<CheckRecord> {
    vec![
        CheckRecord::text(
            "about menu breadcrumb",
            Locator::text("About IDL"),
            ".breadcrumb",
            "Home\nAbout IDL",
        ),
        CheckRecord::text(
            "collections menu breadcrumb",
            Locator::text("Collections"),
            ".breadcrumb",
            "Home\nCollections",
        ),
        CheckRecord::text(
            "help menu breadcrumb",
            Locator::text("Help"),
            ".breadcrumb",
            "Home\nHelp",
        ),
        CheckRecord::text(
            "privacy policy breadcrumb",
            Locator::text("Privacy Policy"),
            ".breadcrumb",
            "Home\nAbout IDL\nPolicies\nPrivacy Policy",
        )
        .with_navigation(),
    ]
}

/// Footer links leaving the site; a redirect away from the expected URL is a
/// content mismatch
fn footer_checks() -> Result<Vec<CheckRecord>> {
    Ok(vec![
        CheckRecord::url(
            "about ucsf link",
            Locator::text("About UCSF"),
            UrlPattern::regex(r"^https://www\.ucsf\.edu/about$")?,
        ),
        CheckRecord::url(
            "ucsf library link",
            Locator::text("UCSF Library"),
            UrlPattern::regex(r"^https://www\.library\.ucsf\.edu/?$")?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesmoke_browser::check::Expectation;

    #[test]
    fn registry_is_ordered_and_complete() {
        let registry = registry(&SmokeConfig::default()).expect("static set builds");
        let names: Vec<_> = registry.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "home-page-content",
                "primary-navigation",
                "learn-more-banner",
                "search-entry",
                "footer-external-links",
            ]
        );
    }

    #[test]
    fn navigation_table_keeps_divergent_breadcrumbs_verbatim() {
        let checks = navigation_checks();
        let needles: Vec<_> = checks
            .iter()
            .map(|c| match &c.expected {
                Expectation::TextIncludes { needle, .. } => needle.as_str(),
                other => panic!("unexpected expectation: {:?}", other),
            })
            .collect();
        assert!(needles.contains(&"Home\nAbout IDL"));
        assert!(needles.contains(&"Home\nAbout IDL\nPolicies\nPrivacy Policy"));
    }

    #[test]
    fn footer_table_rejects_redirect_targets() {
        let checks = footer_checks().expect("patterns compile");
        let about_ucsf = match &checks[0].expected {
            Expectation::UrlMatches(pattern) => pattern,
            other => panic!("unexpected expectation: {:?}", other),
        };
        assert!(about_ucsf.matches("https://www.ucsf.edu/about"));
        assert!(!about_ucsf.matches("https://www.ucsf.edu/about-us"));
        assert!(checks.iter().all(|c| c.expect_navigation));
    }
}
