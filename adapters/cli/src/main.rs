#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Orb Maze in the terminal.

mod clock;
mod config;
mod input;
mod session;

use std::{
    io::{self, BufRead},
    path::PathBuf,
    time::Duration,
};

use anyhow::{bail, Result};
use clap::Parser;
use log::{info, LevelFilter};
use orb_maze_core::{Intent, LevelNumber};
use orb_maze_level::{DirectorySource, LevelCache, LevelDirectory, LevelSource};
use orb_maze_rendering::{RenderingBackend, Scene, TextBackend};
use orb_maze_world::query;

use crate::{
    clock::{Clock, FixedStep, WallClock},
    config::Config,
    input::{intent_for_key, parse_script},
    session::{Session, SessionStatus},
};

/// Guide the player through walls and crates to the orb.
#[derive(Debug, Parser)]
#[command(name = "orb-maze", version)]
struct Args {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding `level{n}.json` documents; overrides the configuration file.
    #[arg(long, value_name = "DIR")]
    levels_dir: Option<PathBuf>,
    /// Level to start from.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Inputs to play: U D L R to move, B or _ to break crates, . to wait.
    /// Key names are read from stdin, one per line, when absent.
    #[arg(long)]
    script: Option<String>,
    /// Ticks to wait after each accepted move; overrides the configuration file.
    #[arg(long, value_name = "TICKS")]
    move_cooldown: Option<u32>,
    /// Simulated milliseconds per tick of a scripted run; overrides the
    /// configuration file. Keys read from stdin run on the wall clock.
    #[arg(long, value_name = "MILLIS")]
    tick_millis: Option<u64>,
    /// Log verbosity; falls back to RUST_LOG, then `info`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,
}

/// Entry point for the Orb Maze command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let config = Config::load(args.config.as_deref())?;
    let source = DirectorySource::new(
        args.levels_dir
            .clone()
            .unwrap_or_else(|| config.levels.directory.clone()),
    );
    let directory = match config.levels.count {
        Some(count) => LevelDirectory::new(count),
        None => LevelDirectory::probe(&source),
    };
    if directory.is_empty() {
        bail!("no levels found in {}", source.root().display());
    }
    info!(
        "found {} level(s) in {}",
        directory.len(),
        source.root().display()
    );

    let move_cooldown_ticks = args
        .move_cooldown
        .unwrap_or(config.simulation.move_cooldown_ticks);
    let cache = LevelCache::new(source);
    let level = LevelNumber::new(args.level);

    match args.script {
        Some(script) => {
            let tick = Duration::from_millis(
                args.tick_millis.unwrap_or(config.simulation.tick_millis),
            );
            let session = Session::start(
                cache,
                directory,
                level,
                move_cooldown_ticks,
                FixedStep::new(tick),
            )?;
            play(session, parse_script(&script))
        }
        None => {
            let session = Session::start(
                cache,
                directory,
                level,
                move_cooldown_ticks,
                WallClock::start(),
            )?;
            let keys = io::stdin()
                .lock()
                .lines()
                .map_while(|line| line.ok())
                .map(|line| intent_for_key(&line));
            play(session, keys)
        }
    }
}

fn play<S, C, I>(mut session: Session<S, C>, intents: I) -> Result<()>
where
    S: LevelSource,
    C: Clock,
    I: IntoIterator<Item = Intent>,
{
    println!("{}", query::welcome_banner(session.world()));
    let mut backend = TextBackend::new(io::stdout().lock());
    backend.present(&Scene::capture(session.world()))?;
    let status = session.run(intents, &mut backend)?;
    drop(backend);

    match status {
        SessionStatus::Finished if session.all_levels_completed() => {
            println!("All levels complete!");
        }
        SessionStatus::Finished => println!("Reached the last level."),
        SessionStatus::Playing => println!(
            "Stopped on level {}.",
            query::level_number(session.world())
        ),
    }

    let completed: Vec<String> = session
        .progression()
        .completed()
        .map(|level| level.to_string())
        .collect();
    if !completed.is_empty() {
        println!("Completed levels: {}", completed.join(", "));
    }
    Ok(())
}

fn init_logging(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        let _ = builder.filter_level(level);
    }
    builder.init();
}
