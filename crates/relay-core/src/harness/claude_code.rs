//! Claude Code harness adapter.
//!
//! Probes `claude --version` to decide availability. Deployment does not
//! talk to the CLI yet: every task is reported as succeeded.

use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::trait_def::Harness;
use super::types::{AgentResult, AgentTask};

/// Flag passed to the binary when probing availability.
const VERSION_FLAG: &str = "--version";

/// Harness adapter for [Claude Code](https://docs.anthropic.com/en/docs/claude-code).
#[derive(Debug, Clone)]
pub struct ClaudeCodeAdapter {
    /// Path to the `claude` binary. Defaults to `"claude"` (found via `$PATH`).
    claude_binary_path: String,
}

impl ClaudeCodeAdapter {
    /// Registry name of this harness.
    pub const NAME: &str = "claude-code";

    /// Binary used when no override is configured.
    pub const DEFAULT_BINARY: &str = "claude";

    /// Create a new adapter that will look for `claude` on `$PATH`.
    pub fn new() -> Self {
        Self::with_binary(Self::DEFAULT_BINARY)
    }

    /// Create a new adapter with a custom binary path.
    ///
    /// Useful for testing or when `claude` is installed in a non-standard
    /// location.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            claude_binary_path: path.into(),
        }
    }

    /// The binary this adapter probes.
    pub fn binary(&self) -> &str {
        &self.claude_binary_path
    }
}

impl Default for ClaudeCodeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Harness for ClaudeCodeAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn is_available(&self) -> bool {
        let status = Command::new(&self.claude_binary_path)
            .arg(VERSION_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                debug!(
                    binary = %self.claude_binary_path,
                    exit_code = ?status.code(),
                    "version probe exited unsuccessfully"
                );
                false
            }
            Err(e) => {
                debug!(
                    binary = %self.claude_binary_path,
                    error = %e,
                    "failed to spawn version probe"
                );
                false
            }
        }
    }

    async fn deploy(&self, task: &AgentTask) -> Result<AgentResult> {
        // The CLI is not invoked yet; the payload is accepted as-is.
        debug!(task_id = %task.id, harness = Self::NAME, "deploying task");
        Ok(AgentResult::succeeded(task))
    }
}
