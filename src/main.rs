//! chwall - Chinese Wall conflict-of-interest simulator
//!
//! Loads the conflict groups from configuration and drives the wall model
//! from an interactive shell or one-shot subcommands.

use anyhow::bail;
use chwall::policy::{Action, WallPolicy};
use chwall::shell::Shell;
use chwall::{config, error::AppError};
use clap::{Parser, Subcommand};
use std::io;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Chinese Wall (Brewer-Nash) conflict-of-interest access control
#[derive(Parser, Debug)]
#[command(name = "chwall")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "CHWALL_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CHWALL_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive shell (default)
    Shell,
    /// Evaluate a single access request and exit
    ///
    /// Exits 0 when access is granted and 1 when it is denied.
    Check {
        user: String,
        company: String,
        /// "read" or "write"
        action: String,
    },
    /// List the configured conflict groups
    Groups,
    /// List all known companies
    Companies,
}

fn main() -> anyhow::Result<()> {
    // Load .env if present, then parse CLI arguments
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration before logging so the configured level can apply
    let config = config::load_config(args.config.as_deref()).map_err(AppError::from)?;

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level)
        .to_string();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        groups = config.policy.groups.len(),
        "Starting chwall"
    );

    let mut policy = WallPolicy::from_config(&config.policy);

    match args.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Shell::new(policy)
                .run(stdin.lock(), stdout.lock())
                .inspect_err(|e| error!(error = %e, "Shell terminated"))?;
        }
        Command::Check {
            user,
            company,
            action,
        } => {
            let Some(action) = Action::try_parse(&action) else {
                bail!("unknown action '{action}' (expected 'read' or 'write')");
            };
            let outcome = policy.access_company(&user, &company, action);
            println!("{}", outcome.message);
            if !outcome.allowed {
                std::process::exit(1);
            }
        }
        Command::Groups => {
            for group in policy.registry().groups() {
                let members: Vec<&str> = group.companies.iter().map(String::as_str).collect();
                println!("{}: {}", group.name, members.join(", "));
            }
        }
        Command::Companies => {
            for company in policy.valid_companies() {
                println!("{company}");
            }
        }
    }

    Ok(())
}
