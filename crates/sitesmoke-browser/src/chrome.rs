//! Chrome DevTools Protocol engine backed by `headless_chrome`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::Deserialize;
use tracing::{debug, info};

use sitesmoke_core::{Result, SmokeError};

use crate::driver::{BrowserEngine, ElementProbe, Locator, Page, PageHandle, SessionConfig};

/// Production engine: one Chrome process per session
#[derive(Debug, Default)]
pub struct ChromeEngine;

impl ChromeEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrowserEngine for ChromeEngine {
    async fn open(&self, config: &SessionConfig) -> Result<PageHandle> {
        info!(
            "launching browser (headless: {}, viewport: {}x{})",
            config.headless, config.viewport.width, config.viewport.height
        );

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .build()
            .map_err(|e| SmokeError::session(format!("failed to build launch options: {}", e)))?;

        let browser = Browser::new(options)
            .map_err(|e| SmokeError::session(format!("failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SmokeError::session(format!("failed to create page context: {}", e)))?;

        Ok(Arc::new(ChromePage { browser, tab }))
    }

    async fn close(&self, page: PageHandle) -> Result<()> {
        debug!("closing browser session");
        // The Browser handle lives inside the page; dropping the last handle
        // tears the Chrome process down.
        drop(page);
        Ok(())
    }
}

/// One Chrome tab plus the browser that owns it
pub struct ChromePage {
    /// Kept alive for the tab's lifetime
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromePage {
    /// Run JavaScript in the page and return its JSON value
    fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| SmokeError::session(format!("script evaluation failed: {}", e)))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }
}

#[derive(Debug, Deserialize)]
struct RawProbe {
    visible: bool,
    text: String,
}

#[async_trait]
impl Page for ChromePage {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!("navigating to {}", url);
        self.tab
            .navigate_to(url)
            .map_err(|e| SmokeError::navigation(url, e.to_string()))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| SmokeError::navigation(url, e.to_string()))?;
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> Result<Option<ElementProbe>> {
        match self.evaluate(&probe_script(locator))? {
            serde_json::Value::String(payload) => {
                let raw: RawProbe = serde_json::from_str(&payload)?;
                Ok(Some(ElementProbe {
                    visible: raw.visible,
                    text: raw.text,
                }))
            }
            _ => Ok(None),
        }
    }

    async fn current_url(&self) -> Result<String> {
        let value = self.evaluate("window.location.href")?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        debug!("clicking {}", locator);
        let element = match locator {
            Locator::Css(selector) => self.tab.find_element(selector),
            Locator::Text(label) => self.tab.find_element_by_xpath(&text_xpath(label)),
        }
        .map_err(|_| SmokeError::ElementNotFound {
            locator: locator.to_string(),
            timeout_ms: 0,
        })?;

        element
            .click()
            .map_err(|e| SmokeError::session(format!("click failed for {}: {}", locator, e)))?;
        Ok(())
    }

    async fn wait_until_settled(&self, timeout: Duration) -> Result<()> {
        self.tab.set_default_timeout(timeout);
        self.tab
            .wait_until_navigated()
            .map_err(|e| SmokeError::navigation(self.tab.get_url(), e.to_string()))?;
        Ok(())
    }
}

/// Script probing the first element matching the locator; yields a JSON
/// string payload, or null when no element matches
fn probe_script(locator: &Locator) -> String {
    let finder = match locator {
        Locator::Css(selector) => format!("document.querySelector({})", js_string(selector)),
        Locator::Text(label) => format!(
            "Array.from(document.querySelectorAll('a, button, [role=\"button\"], [role=\"link\"]'))\
             .find(el => el.innerText && el.innerText.trim() === {})",
            js_string(label)
        ),
    };
    format!(
        r#"(() => {{
    const el = {finder};
    if (!el) return null;
    const visible = el.getClientRects().length > 0
        && window.getComputedStyle(el).visibility !== 'hidden';
    return JSON.stringify({{ visible: visible, text: el.innerText || '' }});
}})()"#
    )
}

/// XPath query for a clickable element with the given visible text
fn text_xpath(label: &str) -> String {
    format!(
        "//*[self::a or self::button or @role='button' or @role='link'][normalize-space(.)={}]",
        xpath_literal(label)
    )
}

/// Quote an arbitrary string as an XPath literal
///
/// XPath 1.0 has no escape syntax, so strings containing both quote kinds
/// must be built with concat().
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    let parts: Vec<String> = text.split('\'').map(|part| format!("'{}'", part)).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Quote an arbitrary string as a JavaScript string literal
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
