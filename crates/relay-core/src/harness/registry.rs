//! Harness registry -- a named collection of available harness adapters.
//!
//! The registry lets the entry point pick a backend by name at runtime
//! (e.g. from `harness.default = "claude-code"` in the config file).

use std::collections::HashMap;

use super::claude_code::ClaudeCodeAdapter;
use super::trait_def::Harness;

/// Errors from looking up a harness by name.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unknown harness {name:?} (registered: {})", .registered.join(", "))]
    UnknownHarness {
        name: String,
        registered: Vec<String>,
    },
}

/// A collection of registered [`Harness`] implementations, keyed by name.
///
/// # Example
///
/// ```ignore
/// let mut registry = HarnessRegistry::new();
/// registry.register(ClaudeCodeAdapter::new());
/// let harness = registry.get("claude-code").unwrap();
/// ```
#[derive(Default)]
pub struct HarnessRegistry {
    harnesses: HashMap<String, Box<dyn Harness>>,
}

impl HarnessRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in harness with default
    /// settings.
    pub fn builtin() -> Self {
        Self::builtin_with(ClaudeCodeAdapter::new())
    }

    /// Like [`HarnessRegistry::builtin`], but with a preconfigured Claude
    /// Code adapter (e.g. a non-default binary path).
    pub fn builtin_with(claude_code: ClaudeCodeAdapter) -> Self {
        let mut registry = Self::new();
        registry.register(claude_code);
        registry
    }

    /// Register a harness adapter.
    ///
    /// The harness is stored under the name returned by [`Harness::name`].
    /// If a harness with the same name is already registered, it is
    /// replaced and the old one is returned.
    pub fn register(&mut self, harness: impl Harness + 'static) -> Option<Box<dyn Harness>> {
        let name = harness.name().to_string();
        self.harnesses.insert(name, Box::new(harness))
    }

    /// Look up a harness by name.
    pub fn get(&self, name: &str) -> Option<&dyn Harness> {
        self.harnesses.get(name).map(|b| b.as_ref())
    }

    /// Remove a harness by name and hand over ownership.
    pub fn take(&mut self, name: &str) -> Result<Box<dyn Harness>, LoadError> {
        match self.harnesses.remove(name) {
            Some(harness) => Ok(harness),
            None => {
                let mut registered: Vec<String> =
                    self.list().into_iter().map(str::to_string).collect();
                registered.sort();
                Err(LoadError::UnknownHarness {
                    name: name.to_string(),
                    registered,
                })
            }
        }
    }

    /// List the names of all registered harnesses.
    ///
    /// The order is not guaranteed (HashMap iteration order).
    pub fn list(&self) -> Vec<&str> {
        self.harnesses.keys().map(|s| s.as_str()).collect()
    }

    /// Return the number of registered harnesses.
    pub fn len(&self) -> usize {
        self.harnesses.len()
    }

    /// Return `true` if no harnesses are registered.
    pub fn is_empty(&self) -> bool {
        self.harnesses.is_empty()
    }
}

impl std::fmt::Debug for HarnessRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessRegistry")
            .field("harnesses", &self.harnesses.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::types::{AgentResult, AgentTask};
    use anyhow::Result;
    use async_trait::async_trait;

    /// Minimal test harness.
    struct FakeHarness {
        harness_name: String,
    }

    impl FakeHarness {
        fn new(name: &str) -> Self {
            Self {
                harness_name: name.to_string(),
            }
        }
    }

    #[async_trait]
    impl Harness for FakeHarness {
        fn name(&self) -> &str {
            &self.harness_name
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn deploy(&self, task: &AgentTask) -> Result<AgentResult> {
            Ok(AgentResult::succeeded(task))
        }
    }

    #[test]
    fn registry_starts_empty() {
        let registry = HarnessRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn builtin_contains_claude_code() {
        let registry = HarnessRegistry::builtin();
        assert_eq!(registry.list(), vec!["claude-code"]);
    }

    #[test]
    fn register_and_get() {
        let mut registry = HarnessRegistry::new();
        let old = registry.register(FakeHarness::new("alpha"));
        assert!(old.is_none());

        let harness = registry.get("alpha");
        assert!(harness.is_some());
        assert_eq!(harness.unwrap().name(), "alpha");
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = HarnessRegistry::new();
        registry.register(FakeHarness::new("alpha"));
        let old = registry.register(FakeHarness::new("alpha"));
        assert!(old.is_some());
        assert_eq!(old.unwrap().name(), "alpha");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let registry = HarnessRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn take_removes_harness() {
        let mut registry = HarnessRegistry::new();
        registry.register(FakeHarness::new("alpha"));
        let harness = registry.take("alpha").unwrap();
        assert_eq!(harness.name(), "alpha");
        assert!(registry.is_empty());
    }

    #[test]
    fn take_missing_lists_registered_names() {
        let mut registry = HarnessRegistry::new();
        registry.register(FakeHarness::new("beta"));
        registry.register(FakeHarness::new("alpha"));

        let err = registry.take("gamma").err().unwrap();
        let LoadError::UnknownHarness { name, registered } = &err;
        assert_eq!(name, "gamma");
        assert_eq!(registered, &vec!["alpha".to_string(), "beta".to_string()]);
        assert_eq!(
            err.to_string(),
            "unknown harness \"gamma\" (registered: alpha, beta)"
        );
    }

    #[test]
    fn list_returns_all_names() {
        let mut registry = HarnessRegistry::new();
        registry.register(FakeHarness::new("alpha"));
        registry.register(FakeHarness::new("beta"));
        registry.register(FakeHarness::new("gamma"));

        let mut names = registry.list();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn registry_debug_shows_names() {
        let mut registry = HarnessRegistry::new();
        registry.register(FakeHarness::new("test-harness"));
        let debug = format!("{registry:?}");
        assert!(debug.contains("test-harness"));
    }
}
