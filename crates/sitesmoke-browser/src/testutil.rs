//! Programmable fakes for the driver traits
//!
//! `FakePage` answers probes from an in-memory element table and records
//! every navigation and click; `FakeEngine` counts open/close calls and
//! keeps a handle to every page it created.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sitesmoke_core::{Result, SmokeError};

use crate::driver::{BrowserEngine, ElementProbe, Locator, Page, PageHandle, SessionConfig};

/// What a click on a given element does to the fake page
#[derive(Clone)]
pub(crate) enum ClickEffect {
    /// Simulate a navigation: the current URL changes
    SetUrl(String),
    /// Simulate revealing an element (dropdowns, search inputs)
    Reveal(Locator, ElementProbe),
}

#[derive(Default)]
struct Inner {
    url: String,
    elements: HashMap<String, ElementProbe>,
    /// Elements that appear only after N probes (simulates slow rendering)
    deferred: HashMap<String, (usize, ElementProbe)>,
    click_effects: HashMap<String, ClickEffect>,
    navigations: Vec<String>,
    clicks: Vec<String>,
    fail_navigation: Option<String>,
    refuse_settle: bool,
}

/// In-memory page double; clones share state so a test can keep a handle
/// while the engine owns another
#[derive(Clone)]
pub(crate) struct FakePage {
    inner: Arc<Mutex<Inner>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                url: "about:blank".to_string(),
                ..Inner::default()
            })),
        }
    }

    pub fn insert(&self, locator: &Locator, probe: ElementProbe) {
        self.inner
            .lock()
            .unwrap()
            .elements
            .insert(locator.to_string(), probe);
    }

    /// Element appears only after `probes` unsuccessful probe calls
    pub fn insert_after(&self, locator: &Locator, probes: usize, probe: ElementProbe) {
        self.inner
            .lock()
            .unwrap()
            .deferred
            .insert(locator.to_string(), (probes, probe));
    }

    pub fn on_click(&self, locator: &Locator, effect: ClickEffect) {
        self.inner
            .lock()
            .unwrap()
            .click_effects
            .insert(locator.to_string(), effect);
    }

    pub fn fail_navigation(&self, reason: &str) {
        self.inner.lock().unwrap().fail_navigation = Some(reason.to_string());
    }

    pub fn refuse_settle(&self) {
        self.inner.lock().unwrap().refuse_settle = true;
    }

    pub fn set_url(&self, url: &str) {
        self.inner.lock().unwrap().url = url.to_string();
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.lock().unwrap().navigations.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.inner.lock().unwrap().clicks.clone()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = &inner.fail_navigation {
            return Err(SmokeError::navigation(url, reason.clone()));
        }
        inner.navigations.push(url.to_string());
        inner.url = url.to_string();
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> Result<Option<ElementProbe>> {
        let key = locator.to_string();
        let mut inner = self.inner.lock().unwrap();
        if let Some((remaining, probe)) = inner.deferred.remove(&key) {
            if remaining > 0 {
                inner.deferred.insert(key, (remaining - 1, probe));
                return Ok(None);
            }
            inner.elements.insert(key.clone(), probe);
        }
        Ok(inner.elements.get(&key).cloned())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.inner.lock().unwrap().url.clone())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let key = locator.to_string();
        let mut inner = self.inner.lock().unwrap();
        if !inner.elements.contains_key(&key) {
            return Err(SmokeError::ElementNotFound {
                locator: key,
                timeout_ms: 0,
            });
        }
        inner.clicks.push(key.clone());
        if let Some(effect) = inner.click_effects.get(&key).cloned() {
            match effect {
                ClickEffect::SetUrl(url) => {
                    inner.url = url;
                }
                ClickEffect::Reveal(target, probe) => {
                    inner.elements.insert(target.to_string(), probe);
                }
            }
        }
        Ok(())
    }

    async fn wait_until_settled(&self, _timeout: Duration) -> Result<()> {
        let inner = self.inner.lock().unwrap();
        if inner.refuse_settle {
            return Err(SmokeError::navigation(inner.url.clone(), "load never settled"));
        }
        Ok(())
    }
}

/// Engine double counting session lifecycle events
#[derive(Clone)]
pub(crate) struct FakeEngine {
    factory: Arc<dyn Fn() -> FakePage + Send + Sync>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    pages: Arc<Mutex<Vec<FakePage>>>,
}

impl FakeEngine {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> FakePage + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
            pages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Pages created so far, in open order
    pub fn pages(&self) -> Vec<FakePage> {
        self.pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    async fn open(&self, _config: &SessionConfig) -> Result<PageHandle> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let page = (self.factory)();
        self.pages.lock().unwrap().push(page.clone());
        Ok(Arc::new(page))
    }

    async fn close(&self, page: PageHandle) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        drop(page);
        Ok(())
    }
}
