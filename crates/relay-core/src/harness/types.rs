//! Data passed across the [`super::Harness`] boundary.

use serde::{Deserialize, Serialize};

/// A unit of work submitted to a harness.
///
/// `id` is caller-supplied and is not validated: empty strings and duplicate
/// ids are accepted. `payload` is opaque to the shared contract; only a
/// concrete harness may give it meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTask {
    pub id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl AgentTask {
    pub fn new(id: impl Into<String>, payload: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }
}

/// Outcome of a single [`super::Harness::deploy`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Echo of [`AgentTask::id`].
    pub id: String,
    pub success: bool,
}

impl AgentResult {
    /// A successful result for `task`.
    pub fn succeeded(task: &AgentTask) -> Self {
        Self {
            id: task.id.clone(),
            success: true,
        }
    }
}
