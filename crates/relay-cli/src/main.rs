mod config;
mod run_cmd;
#[cfg(test)]
mod test_util;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use config::RelayConfig;

/// Task id deployed when `--id` is not given.
const DEFAULT_TASK_ID: &str = "1";
/// Payload deployed when `--payload` is not given.
const DEFAULT_PAYLOAD: &str = "test";

#[derive(Parser)]
#[command(name = "relay", about = "Dispatch tasks to LLM coding agent harnesses")]
struct Cli {
    /// Harness to use (overrides RELAY_HARNESS env var and config file)
    #[arg(long, global = true)]
    harness: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check availability, then deploy one task (the default command)
    Run {
        /// Task identifier (not validated)
        #[arg(long, default_value = DEFAULT_TASK_ID)]
        id: String,
        /// Task payload; JSON, or plain text carried as a JSON string
        #[arg(long, default_value = DEFAULT_PAYLOAD)]
        payload: String,
    },
    /// Check whether the harness is available (exits 1 if not)
    Check,
    /// List built-in harnesses
    List,
    /// Write a relay config file
    Init {
        /// Path or name of the Claude Code CLI
        #[arg(long, default_value = relay_core::harness::ClaudeCodeAdapter::DEFAULT_BINARY)]
        claude_binary: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute the `relay init` command: write config file.
fn cmd_init(harness: Option<&str>, claude_binary: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let resolved = RelayConfig {
        harness: harness
            .unwrap_or(relay_core::orchestrator::DEFAULT_HARNESS)
            .to_string(),
        claude_binary: claude_binary.to_string(),
    };
    // Refuse to save a name that every later `run` would reject.
    resolved.registry().take(&resolved.harness)?;

    let cfg = config::ConfigFile {
        harness: config::HarnessSection {
            default: resolved.harness,
            claude_binary: resolved.claude_binary,
        },
    };

    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    println!("  harness.default = {}", cfg.harness.default);
    println!("  harness.claude_binary = {}", cfg.harness.claude_binary);

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Run {
        id: DEFAULT_TASK_ID.to_string(),
        payload: DEFAULT_PAYLOAD.to_string(),
    });

    match command {
        Commands::Run { id, payload } => {
            let resolved = RelayConfig::resolve(cli.harness.as_deref())?;
            let harness = resolved.load_harness()?;
            run_cmd::run_deploy(harness.as_ref(), &id, &payload).await?;
        }
        Commands::Check => {
            let resolved = RelayConfig::resolve(cli.harness.as_deref())?;
            let harness = resolved.load_harness()?;
            run_cmd::run_check(harness.as_ref()).await?;
        }
        Commands::List => {
            let resolved = RelayConfig::resolve(cli.harness.as_deref())?;
            run_cmd::run_list(&resolved.registry());
        }
        Commands::Init {
            claude_binary,
            force,
        } => {
            cmd_init(cli.harness.as_deref(), &claude_binary, force)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "relay", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.harness.is_none());
    }

    #[test]
    fn run_defaults_match_sample_task() {
        let cli = Cli::try_parse_from(["relay", "run"]).unwrap();
        match cli.command {
            Some(Commands::Run { id, payload }) => {
                assert_eq!(id, "1");
                assert_eq!(payload, "test");
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn global_harness_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["relay", "check", "--harness", "claude-code"]).unwrap();
        assert_eq!(cli.harness.as_deref(), Some("claude-code"));
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn run_accepts_empty_id() {
        let cli = Cli::try_parse_from(["relay", "run", "--id", ""]).unwrap();
        match cli.command {
            Some(Commands::Run { id, .. }) => assert_eq!(id, ""),
            _ => panic!("expected run command"),
        }
    }
}
