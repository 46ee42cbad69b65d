// LCK Cup draft simulator entry point.
//
// Startup sequence:
// 1. Parse command line
// 2. Initialize tracing (log to file, the terminal belongs to the prompts)
// 3. For draft and stats: load config (built-in defaults when absent) and
//    build the statistics client
// 4. Run the requested command

mod commands;
mod render;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use lckdraft_core::catalog::{Captain, Side, TeamCode};
use lckdraft_core::config::{self, Config};
use lckdraft_core::stats::StatsClient;

#[derive(Parser)]
#[command(name = "lckdraft", version, about = "LCK Cup snake-draft simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a draft, print the rosters and a share link
    Draft {
        /// Captain holding first pick (GEN or HLE)
        #[arg(long, default_value = "GEN")]
        first: Captain,
        /// All eight picks in order, comma separated; prompts when omitted
        #[arg(long, value_delimiter = ',')]
        picks: Option<Vec<TeamCode>>,
        /// Do not record the result for statistics
        #[arg(long)]
        no_save: bool,
    },
    /// Reopen a shared result from its link or token
    Show {
        link: String,
    },
    /// Show the most drafted compositions
    Stats {
        /// Only this side (baron or elder)
        #[arg(long)]
        side: Option<Side>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1. Parse command line
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("lckdraft starting up");

    // 3 + 4. Load config where needed and run the command
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Draft {
            first,
            picks,
            no_save,
        } => {
            let (config, stats) = load_settings()?;
            let mut input = io::stdin().lock();
            let result = commands::run_draft(first, picks.as_deref(), &mut input, &mut out)?;
            match result {
                Some(result) => {
                    commands::finish_draft(&result, &config, &stats, !no_save, &mut out).await?
                }
                None => writeln!(out, "Draft abandoned.")?,
            }
        }
        Command::Show { link } => {
            if !commands::show(&link, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Stats { side } => {
            let (config, stats) = load_settings()?;
            commands::stats(side, &config, &stats, &mut out).await?
        }
    }

    info!("lckdraft finished");
    Ok(ExitCode::SUCCESS)
}

/// Load config and build the statistics client from it.
fn load_settings() -> anyhow::Result<(Config, StatsClient)> {
    let config = config::load_config_or_default().context("failed to load configuration")?;
    info!(
        "Config loaded: stats enabled={}, backend={:?}, share base={}",
        config.stats.enabled, config.stats.backend, config.share.base_url
    );
    let stats = StatsClient::from_config(&config);
    Ok((config, stats))
}

/// Initialize tracing to write to a log file.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::options()
        .create(true)
        .append(true)
        .open(log_dir.join("lckdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lckdraft_core=info,lckdraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
