mod app;
mod calculator;
mod config;
mod logging;
mod report;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ttr_core::{EligibilityFlags, Rating, Tournament};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ttr-tui")]
#[command(about = "Estimate a TTR score after a table tennis tournament")]
struct Cli {
    /// Config file with startup defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Where to write the log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate one event without the interactive UI
    Calc {
        /// Your current TTR score
        #[arg(short, long)]
        rating: Rating,
        /// Opponent TTR score, once per match
        #[arg(short, long = "opponent")]
        opponents: Vec<Rating>,
        /// Match outcome (w/l), once per match in the same order
        #[arg(short = 'R', long = "result", value_parser = parse_outcome)]
        results: Vec<bool>,
        /// No rated single in the last 365 days
        #[arg(long)]
        no_match_365: bool,
        /// Fewer than 30 rated singles in total
        #[arg(long)]
        few_matches: bool,
        #[arg(long)]
        under_21: bool,
        #[arg(long)]
        under_16: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_outcome(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "w" | "win" | "won" | "1" => Ok(true),
        "l" | "loss" | "lost" | "0" => Ok(false),
        other => Err(format!("expected w or l, got '{}'", other)),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        None => app::run(config),
        Some(Commands::Calc {
            rating,
            opponents,
            results,
            no_match_365,
            few_matches,
            under_21,
            under_16,
            json,
        }) => {
            let flags = EligibilityFlags {
                no_match_in_365_days: no_match_365 || config.flags.no_match_in_365_days,
                fewer_than_30_career_matches: few_matches
                    || config.flags.fewer_than_30_career_matches,
                age_under_21: under_21 || config.flags.age_under_21,
                age_under_16: under_16 || config.flags.age_under_16,
            };
            let tournament = Tournament::from_parallel(rating, opponents, results, flags)?;
            report::run(&tournament, json)
        }
    }
}
