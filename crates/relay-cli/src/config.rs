//! Configuration file management for relay.
//!
//! Provides a TOML-based config file at `~/.config/relay/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use relay_core::harness::{ClaudeCodeAdapter, Harness, HarnessRegistry};
use relay_core::orchestrator::DEFAULT_HARNESS;

/// Env var selecting the harness by name.
pub const HARNESS_ENV: &str = "RELAY_HARNESS";
/// Env var overriding the path to the `claude` binary.
pub const CLAUDE_BINARY_ENV: &str = "RELAY_CLAUDE_BINARY";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub harness: HarnessSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HarnessSection {
    /// Name of the harness to deploy with.
    #[serde(default = "default_harness_name")]
    pub default: String,
    /// Path or bare name of the Claude Code CLI.
    #[serde(default = "default_claude_binary")]
    pub claude_binary: String,
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            default: default_harness_name(),
            claude_binary: default_claude_binary(),
        }
    }
}

fn default_harness_name() -> String {
    DEFAULT_HARNESS.to_string()
}

fn default_claude_binary() -> String {
    ClaudeCodeAdapter::DEFAULT_BINARY.to_string()
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the relay config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/relay` or `~/.config/relay`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("relay");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("relay")
}

/// Return the path to the relay config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
///
/// A missing file yields `Ok(None)`; a file that exists but cannot be read
/// or parsed is an error.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Load the config file from its default location.
pub fn load_config() -> Result<Option<ConfigFile>> {
    load_config_from(&config_path())
}

/// Serialize and write the config file to `path`, creating parent dirs as
/// needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

/// Read an env var, treating an empty value as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub harness: String,
    pub claude_binary: String,
}

impl RelayConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Harness: `cli_harness` > `RELAY_HARNESS` env > `harness.default` > `"claude-code"`
    /// - Claude binary: `RELAY_CLAUDE_BINARY` env > `harness.claude_binary` > `"claude"`
    pub fn resolve(cli_harness: Option<&str>) -> Result<Self> {
        let file_config = load_config()?;
        Ok(Self::resolve_with(cli_harness, file_config))
    }

    /// Like [`RelayConfig::resolve`], with the config file already loaded.
    pub fn resolve_with(cli_harness: Option<&str>, file_config: Option<ConfigFile>) -> Self {
        let file = file_config.map(|c| c.harness).unwrap_or_default();

        let harness = if let Some(name) = cli_harness {
            name.to_string()
        } else if let Some(name) = non_empty_env(HARNESS_ENV) {
            name
        } else {
            file.default
        };

        let claude_binary = non_empty_env(CLAUDE_BINARY_ENV).unwrap_or(file.claude_binary);

        Self {
            harness,
            claude_binary,
        }
    }

    /// Built-in harnesses, configured from this config.
    pub fn registry(&self) -> HarnessRegistry {
        HarnessRegistry::builtin_with(ClaudeCodeAdapter::with_binary(&self.claude_binary))
    }

    /// Instantiate the selected harness.
    pub fn load_harness(&self) -> Result<Box<dyn Harness>> {
        let harness = self.registry().take(&self.harness)?;
        Ok(harness)
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
