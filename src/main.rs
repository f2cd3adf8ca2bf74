//! # Lorekeeper Command Line
//!
//! Rates saved encounters from the terminal and prints the calibration tables.

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use lorekeeper::tables::CR_TABLE;
use lorekeeper::{EncounterRecord, EngineConfig, LorekeeperError, LorekeeperResult};
use std::path::PathBuf;

/// Command line arguments for Lorekeeper.
#[derive(Parser, Debug)]
#[command(name = "lorekeeper")]
#[command(about = "Encounter difficulty estimation for tabletop RPG campaigns")]
#[command(version)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rate the difficulty of a saved encounter
    Assess {
        /// Encounter record (JSON)
        file: PathBuf,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Apply the action-economy adjustment
        #[arg(long)]
        action_economy: bool,

        /// Print the full result as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print the challenge rating table
    Tables,
}

fn main() -> LorekeeperResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    info!("Starting Lorekeeper v{}", lorekeeper::VERSION);

    match args.command {
        Command::Assess {
            file,
            config,
            action_economy,
            json,
        } => assess(file, config, action_economy, json),
        Command::Tables => {
            print_tables();
            Ok(())
        }
    }
}

/// Initializes env_logger; `RUST_LOG` overrides the command-line level.
fn initialize_logging(log_level: &str) -> LorekeeperResult<()> {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        other => {
            return Err(LorekeeperError::InvalidConfig(format!(
                "unknown log level {:?}",
                other
            )))
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .try_init()
        .map_err(|e| LorekeeperError::InvalidConfig(e.to_string()))
}

fn assess(
    file: PathBuf,
    config_path: Option<PathBuf>,
    action_economy: bool,
    json: bool,
) -> LorekeeperResult<()> {
    let mut config = match config_path {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if action_economy {
        config.enable_action_economy_adjustment = true;
    }

    let record = EncounterRecord::from_json_file(&file)?;
    info!(
        "Assessing {:?}: {} enemy entries, {} party members",
        record.name,
        record.enemies.len(),
        record.party.len()
    );
    let result = record.assess(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !record.name.is_empty() {
        println!("{}", record.name);
    }
    println!(
        "Difficulty: {} ({}), survival ratio {:.2}",
        result.analysis.difficulty, result.analysis.difficulty_color, result.analysis.survival_ratio
    );
    println!("{}", result.analysis.summary);
    if result.enemy_stats.total_xp > 0 {
        println!("Total XP: {}", result.enemy_stats.total_xp);
    }
    Ok(())
}

fn print_tables() {
    println!(
        "{:>4} {:>5} {:>4} {:>5} {:>4} {:>8}",
        "CR", "HP", "AC", "DPR", "ATK", "XP"
    );
    for row in CR_TABLE.iter() {
        println!(
            "{:>4} {:>5} {:>4} {:>5} {:>+4} {:>8}",
            row.cr.to_string(),
            row.hp,
            row.ac,
            row.dpr,
            row.attack_bonus as i32,
            row.xp
        );
    }
}
