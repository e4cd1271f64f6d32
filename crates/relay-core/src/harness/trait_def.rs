//! The `Harness` trait -- the adapter interface for agent backends.
//!
//! Each concrete harness (Claude Code today; a remote API or a mock backend
//! later) implements this trait. The trait is object-safe so it can be
//! stored as `Box<dyn Harness>` in the [`super::HarnessRegistry`].

use anyhow::Result;
use async_trait::async_trait;

use super::types::{AgentResult, AgentTask};

/// Capability set every agent backend exposes to the orchestrator.
///
/// # Object Safety
///
/// Every method returns a concrete type, so `Box<dyn Harness>` works and
/// the orchestrator never needs to know which backend it is driving.
#[async_trait]
pub trait Harness: Send + Sync {
    /// Registry key for this harness (e.g. "claude-code").
    fn name(&self) -> &str;

    /// Report whether the backend is ready to accept work.
    ///
    /// Must not fail: any internal error is reported as `false`.
    async fn is_available(&self) -> bool;

    /// Submit `task` and return its result.
    ///
    /// The returned [`AgentResult::id`] must equal `task.id`. Whether and
    /// how this can fail is up to each implementation.
    async fn deploy(&self, task: &AgentTask) -> Result<AgentResult>;
}

// Compile-time assertion: Harness must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Harness) {}
};
