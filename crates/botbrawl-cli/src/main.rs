//! Botbrawl command line runner.
//!
//! Plays matches described by a battle file and prints the result as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use botbrawl_core::catalog::{Catalog, FALLBACK_ARENA};
use botbrawl_core::config::{CommentaryConfig, ExecutionMode, MatchConfig};
use botbrawl_core::fighter::BotConfig;
use botbrawl_core::script::parse_script;
use botbrawl_core::series::run_series;
use botbrawl_core::run_battle_with;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Botbrawl - robot combat matches from the command line
#[derive(Parser, Debug)]
#[command(name = "botbrawl", version, about)]
struct Args {
    /// Log level (off, error, warn, info, debug, trace). RUST_LOG overrides it.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match and print its result
    Run {
        /// Battle file with two fighters
        battle: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Include the per-tick state history
        #[arg(long)]
        frames: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Play many seeded matches of the same pairing and print a summary
    Series {
        /// Battle file with two fighters
        battle: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Number of matches
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a strategy script and report malformed lines
    Check {
        /// Script file
        script: PathBuf,
    },
    /// List the ids in a catalog
    Catalog {
        /// Custom catalog JSON; the stock catalog when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Settings shared by the match-playing commands.
#[derive(clap::Args, Debug)]
struct Overrides {
    /// Arena id, overriding the battle file
    #[arg(long)]
    arena: Option<String>,

    /// Commentary seed, overriding the battle file
    #[arg(long)]
    seed: Option<u64>,

    /// Commentary preset
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Sparse narration for playback
    Broadcast,
    /// Chatty narration for live viewing
    Live,
}

/// Battle file contents.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BattleFile {
    fighters: Vec<BotConfig>,
    #[serde(default)]
    arena: Option<String>,
    /// Custom catalog path, relative to the battle file.
    #[serde(default)]
    catalog: Option<PathBuf>,
    #[serde(default)]
    config: MatchConfig,
}

/// A battle file with everything resolved.
struct Prepared {
    a: BotConfig,
    b: BotConfig,
    arena: String,
    catalog: Catalog,
    config: MatchConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    match args.command {
        Command::Run {
            battle,
            overrides,
            frames,
            pretty,
        } => {
            let mut prepared = prepare(&battle, &overrides)?;
            prepared.config.record_frames |= frames;
            info!(arena = %prepared.arena, seed = prepared.config.seed, "running match");

            let result = run_battle_with(
                prepared.a,
                prepared.b,
                &prepared.arena,
                &prepared.catalog,
                &prepared.config,
            );
            info!(
                winner = result.winner.as_ref().map_or("none", |w| w.as_str()),
                frames = result.frame_count,
                timed_out = result.timed_out,
                "match finished"
            );
            print_json(&result, pretty)
        }
        Command::Series {
            battle,
            overrides,
            runs,
            pretty,
        } => {
            let prepared = prepare(&battle, &overrides)?;
            info!(arena = %prepared.arena, runs, "running series");
            let summary = run_series(
                &prepared.a,
                &prepared.b,
                &prepared.arena,
                &prepared.catalog,
                &prepared.config,
                runs,
            );
            print_json(&summary, pretty)
        }
        Command::Check { script } => {
            let source = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let parsed = parse_script(&source);
            for error in &parsed.errors {
                println!("{error}");
            }
            println!(
                "{} rule(s), {} error(s)",
                parsed.program.rules.len(),
                parsed.errors.len()
            );
            if !parsed.is_valid() {
                bail!("{} has malformed lines", script.display());
            }
            Ok(())
        }
        Command::Catalog { catalog } => {
            let catalog = match catalog {
                Some(path) => load_catalog(&path)?,
                None => Catalog::standard(),
            };
            for (table, ids) in [
                ("chassis", catalog.chassis_ids().collect::<Vec<_>>()),
                ("weapons", catalog.weapon_ids().collect()),
                ("armor", catalog.armor_ids().collect()),
                ("arenas", catalog.arena_ids().collect()),
            ] {
                println!("{table}: {}", ids.join(", "));
            }
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare(path: &Path, overrides: &Overrides) -> Result<Prepared> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read battle file {}", path.display()))?;
    let file: BattleFile =
        serde_json::from_str(&text).with_context(|| format!("invalid battle file {}", path.display()))?;

    let catalog = match &file.catalog {
        Some(relative) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            load_catalog(&base.join(relative))?
        }
        None => Catalog::standard(),
    };

    let mut fighters = file.fighters.into_iter();
    let (Some(a), Some(b), None) = (fighters.next(), fighters.next(), fighters.next()) else {
        bail!("battle file {} must list exactly two fighters", path.display());
    };

    let mut config = file.config;
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(mode) = overrides.mode {
        config.commentary = match mode {
            Mode::Broadcast => CommentaryConfig::broadcast(),
            Mode::Live => CommentaryConfig::live(),
        };
    }
    config.mode = ExecutionMode::Headless;

    let arena = overrides
        .arena
        .clone()
        .or(file.arena)
        .unwrap_or_else(|| FALLBACK_ARENA.to_owned());

    Ok(Prepared {
        a,
        b,
        arena,
        catalog,
        config,
    })
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read catalog {}", path.display()))?;
    Catalog::from_json(&text).with_context(|| format!("invalid catalog {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
