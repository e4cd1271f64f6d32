//! `relay run`, `relay check` and `relay list` commands.

use anyhow::{Context, Result, bail};

use relay_core::harness::{AgentResult, AgentTask, Harness, HarnessRegistry};
use relay_core::orchestrator::run_task;

/// Interpret `--payload` text: valid JSON is used as-is, anything else is
/// carried as a JSON string.
pub fn parse_payload(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

/// Deploy one task and print its result as a single JSON line.
///
/// Fails if the harness reports `success: false`, so the process exits
/// non-zero.
pub async fn run_deploy(harness: &dyn Harness, id: &str, payload: &str) -> Result<AgentResult> {
    let task = AgentTask::new(id, parse_payload(payload));
    let report = run_task(harness, &task).await?;

    let line = serde_json::to_string(&report.result).context("failed to serialize result")?;
    println!("{line}");

    if !report.result.success {
        bail!("task {:?} was not deployed successfully", report.result.id);
    }
    Ok(report.result)
}

/// Probe the harness and print whether it is available.
pub async fn run_check(harness: &dyn Harness) -> Result<()> {
    if harness.is_available().await {
        println!("{}: available", harness.name());
        Ok(())
    } else {
        println!("{}: unavailable", harness.name());
        bail!("harness {} is not available", harness.name());
    }
}

/// Print the registered harness names, one per line, sorted.
pub fn run_list(registry: &HarnessRegistry) {
    let mut names = registry.list();
    names.sort();
    for name in names {
        println!("{name}");
    }
}
