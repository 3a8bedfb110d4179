//! Hextowns CLI - run single matches or tournaments between reference movers.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Hextowns - a deterministic hex territory game
#[derive(Parser, Debug)]
#[command(name = "hextowns")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match between greedy movers
    Run {
        #[command(flatten)]
        settings: cli::MatchArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Color the rendered board with ANSI escapes
        #[arg(long)]
        ansi: bool,

        /// Print only the result, not the final board
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel matches and aggregate statistics
    Tournament {
        #[command(flatten)]
        settings: cli::MatchArgs,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            settings,
            seed,
            format,
            ansi,
            quiet,
        } => cli::run::execute(settings, seed, format, ansi, quiet),

        Commands::Tournament {
            settings,
            games,
            seed,
            threads,
            format,
            progress,
        } => cli::tournament::execute(settings, games, seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
