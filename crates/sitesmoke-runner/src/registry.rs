//! Scenario registry: an ordered, named collection of scenario bodies
//!
//! Each scenario is an independent async closure over a page handle supplied
//! by the runner. Registration is pure data construction; nothing runs until
//! the runner dispatches the registry.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use sitesmoke_browser::PageHandle;
use sitesmoke_core::Result;

/// Boxed async scenario body
pub type ScenarioFn = Arc<dyn Fn(PageHandle) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A named, independent verification routine
#[derive(Clone)]
pub struct Scenario {
    name: String,
    body: ScenarioFn,
}

impl Scenario {
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(PageHandle) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(move |page| Box::pin(body(page))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the scenario body against the given page handle
    pub async fn run(&self, page: PageHandle) -> Result<()> {
        (self.body)(page).await
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario").field("name", &self.name).finish()
    }
}

/// Flat, ordered scenario collection
#[derive(Debug, Default, Clone)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scenario; registration order is execution/report order
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, body: F)
    where
        F: Fn(PageHandle) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.scenarios.push(Scenario::new(name, body));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_preserves_order() {
        let mut registry = ScenarioRegistry::new();
        registry.register("first", |_page| async { Ok(()) });
        registry.register("second", |_page| async { Ok(()) });
        registry.register("third", |_page| async { Ok(()) });

        let names: Vec<_> = registry.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn empty_registry() {
        let registry = ScenarioRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
