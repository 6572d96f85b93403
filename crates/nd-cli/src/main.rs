//! CLI frontend for the narrative dice probability engine.

mod commands;
mod env_config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ndice",
    about = "Exact odds for narrative dice pools",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject pools with more than this many dice of one kind (0 = no limit)
    #[arg(long, global = true)]
    max_dice: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability that a criterion holds for a pool
    Chance {
        /// Dice pool, e.g. `2a1p2d` (b=boost a=ability p=proficiency s=setback d=difficulty c=challenge)
        pool: String,

        /// Extra symbols, e.g. `1s2a` (s=success a=advantage t=triumph f=failure h=threat d=despair)
        #[arg(short, long, default_value = "")]
        symbols: String,

        /// Criterion name (unknown names fall back to SUCCESS)
        #[arg(short, long, default_value = "SUCCESS")]
        criteria: String,
    },

    /// Odds of every criterion plus expected net symbols
    Dist {
        /// Dice pool, e.g. `2a1p2d`
        pool: String,

        /// Extra symbols, e.g. `1s2a`
        #[arg(short, long, default_value = "")]
        symbols: String,

        /// Also list every distinct net outcome
        #[arg(short, long)]
        outcomes: bool,
    },

    /// Show the faces of one or all dice
    Faces {
        /// Die name or denomination (default: all dice)
        die: Option<String>,
    },

    /// Roll a pool and show the net result
    Roll {
        /// Dice pool, e.g. `2a1p2d`
        pool: String,

        /// Extra symbols, e.g. `1s2a`
        #[arg(short, long, default_value = "")]
        symbols: String,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Answer a JSON chance request through the background worker
    Query {
        /// Request JSON, e.g. `{"dicePool":{"Ability":2},"criteriaType":"SUCCESS"}`
        json: Option<String>,

        /// Read the request from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reject unknown dice, symbols and criteria instead of ignoring them
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    env_config::init_logging(cli.verbose);
    let config = env_config::engine_config(cli.max_dice);

    let result = match cli.command {
        Commands::Chance {
            pool,
            symbols,
            criteria,
        } => commands::chance::run(config, &pool, &symbols, &criteria),
        Commands::Dist {
            pool,
            symbols,
            outcomes,
        } => commands::dist::run(config, &pool, &symbols, outcomes),
        Commands::Faces { die } => commands::faces::run(die.as_deref()),
        Commands::Roll {
            pool,
            symbols,
            seed,
        } => commands::roll::run(config, &pool, &symbols, seed),
        Commands::Query { json, file, strict } => {
            commands::query::run(config, json.as_deref(), file.as_deref(), strict)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
