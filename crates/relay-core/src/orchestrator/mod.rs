//! Single-task orchestrator: pick a harness, probe it, deploy one task.
//!
//! Availability is advisory. An unavailable harness produces a warning and
//! the deploy still goes ahead.

use anyhow::{Context, Result};

use crate::harness::{
    AgentResult, AgentTask, ClaudeCodeAdapter, Harness, HarnessRegistry, LoadError,
};

/// Name of the harness used when nothing else is configured.
pub const DEFAULT_HARNESS: &str = ClaudeCodeAdapter::NAME;

/// What happened during one [`run_task`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Result of the availability probe made before deploying.
    pub available: bool,
    pub result: AgentResult,
}

/// Return a fresh instance of the default harness.
pub fn load_harness() -> Box<dyn Harness> {
    Box::new(ClaudeCodeAdapter::new())
}

/// Return a fresh instance of the built-in harness called `name`.
pub fn load_harness_named(name: &str) -> Result<Box<dyn Harness>, LoadError> {
    HarnessRegistry::builtin().take(name)
}

/// The demonstration task deployed when the caller supplies none.
pub fn sample_task() -> AgentTask {
    AgentTask::new("1", "test")
}

/// Probe `harness`, then deploy `task` on it regardless of the outcome.
pub async fn run_task(harness: &dyn Harness, task: &AgentTask) -> Result<RunReport> {
    let available = harness.is_available().await;
    if !available {
        tracing::warn!(harness = harness.name(), "harness is not available");
    }

    let result = harness.deploy(task).await.with_context(|| {
        format!("harness {} failed to deploy task {:?}", harness.name(), task.id)
    })?;

    tracing::info!(
        harness = harness.name(),
        task_id = %result.id,
        success = result.success,
        "task deployed"
    );

    Ok(RunReport { available, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records calls so tests can check ordering and counts.
    #[derive(Default)]
    struct ScriptedHarness {
        available: bool,
        fail_deploy: bool,
        probes: AtomicUsize,
        deploys: AtomicUsize,
    }

    #[async_trait]
    impl Harness for ScriptedHarness {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn is_available(&self) -> bool {
            assert_eq!(self.deploys.load(Ordering::SeqCst), 0, "probe must precede deploy");
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        async fn deploy(&self, task: &AgentTask) -> Result<AgentResult> {
            self.deploys.fetch_add(1, Ordering::SeqCst);
            if self.fail_deploy {
                bail!("backend exploded");
            }
            Ok(AgentResult::succeeded(task))
        }
    }

    #[test]
    fn sample_task_matches_demo_values() {
        let task = sample_task();
        assert_eq!(task.id, "1");
        assert_eq!(task.payload, serde_json::json!("test"));
    }

    #[test]
    fn load_harness_is_claude_code() {
        assert_eq!(load_harness().name(), DEFAULT_HARNESS);
        assert_eq!(load_harness().name(), load_harness().name());
    }

    #[test]
    fn load_harness_named_default() {
        let harness = load_harness_named("claude-code").unwrap();
        assert_eq!(harness.name(), "claude-code");
    }

    #[test]
    fn load_harness_named_unknown() {
        let err = load_harness_named("codex").err().unwrap();
        assert!(err.to_string().contains("codex"));
        assert!(err.to_string().contains("claude-code"));
    }

    #[tokio::test]
    async fn available_harness_probes_once_then_deploys() {
        let harness = ScriptedHarness {
            available: true,
            ..Default::default()
        };
        let report = run_task(&harness, &sample_task()).await.unwrap();

        assert!(report.available);
        assert_eq!(report.result, AgentResult { id: "1".into(), success: true });
        assert_eq!(harness.probes.load(Ordering::SeqCst), 1);
        assert_eq!(harness.deploys.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unavailable_harness_still_deploys() {
        let harness = ScriptedHarness::default();
        let report = run_task(&harness, &sample_task()).await.unwrap();

        assert!(!report.available);
        assert!(report.result.success);
        assert_eq!(harness.deploys.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn deploy_error_propagates_with_context() {
        let harness = ScriptedHarness {
            available: true,
            fail_deploy: true,
            ..Default::default()
        };
        let err = run_task(&harness, &sample_task()).await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to deploy task \"1\""), "got: {msg}");
        assert!(msg.contains("backend exploded"), "got: {msg}");
    }
}
