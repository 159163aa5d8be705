use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use showcase_infrastructure::ConfigService;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "CX Showcase - drives the banking demo flow against the in-memory SDK", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through login, home, trigger points and logout, then print the event log
    Run {
        /// User to log in as (defaults to demo.user_id)
        #[arg(short, long)]
        user_id: Option<String>,

        /// Make the first login attempt fail, then retry
        #[arg(long)]
        fail_start: bool,

        /// Turn on SDK debug mode
        #[arg(long)]
        debug: bool,

        /// Print the final view state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = service
        .get_config()
        .context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Run {
            user_id,
            fail_start,
            debug,
            json,
        } => {
            let options = commands::run::RunOptions {
                user_id,
                fail_start,
                debug,
                json,
            };
            commands::run::execute(&config, options).await?
        }
        Commands::Config => commands::config::show(&service, &config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "showcase", "--config", "/tmp/c.toml", "run", "-u", "alice", "--fail-start", "--json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        match cli.command {
            Commands::Run {
                user_id,
                fail_start,
                debug,
                json,
            } => {
                assert_eq!(user_id.as_deref(), Some("alice"));
                assert!(fail_start);
                assert!(!debug);
                assert!(json);
            }
            Commands::Config => panic!("expected run"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["showcase"]).is_err());
    }
}
