#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Orb Maze.
//!
//! The world owns one level attempt: the mutable [`LevelState`], the
//! [`PlayerState`] and the attempt's [`Outcome`]. Hosts drive it exclusively
//! through [`apply`] (or the [`step`] shorthand) and observe it through the
//! [`query`] module.

mod level_state;
mod player;

use std::{sync::Arc, time::Duration};

use log::{debug, info};
use orb_maze_core::{
    Command, Event, Intent, LevelNumber, Outcome, DEFAULT_MOVE_COOLDOWN_TICKS, WELCOME_BANNER,
};
use orb_maze_level::LevelData;

pub use level_state::{LevelState, TimerTick};
pub use player::{AcceptedMove, PlayerState};

/// Represents the authoritative Orb Maze world state for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    banner: &'static str,
    level: LevelNumber,
    data: Arc<LevelData>,
    state: LevelState,
    player: PlayerState,
    outcome: Outcome,
    move_cooldown_ticks: u32,
}

impl World {
    /// Creates a fresh attempt of the provided level.
    #[must_use]
    pub fn new(level: LevelNumber, data: Arc<LevelData>) -> Self {
        let state = LevelState::start(&data);
        let player = PlayerState::spawn(data.start());
        Self {
            banner: WELCOME_BANNER,
            level,
            data,
            state,
            player,
            outcome: Outcome::Playing,
            move_cooldown_ticks: DEFAULT_MOVE_COOLDOWN_TICKS,
        }
    }

    fn reset(&mut self) {
        self.state = LevelState::start(&self.data);
        self.player = PlayerState::spawn(self.data.start());
        self.outcome = Outcome::Playing;
    }

    fn run_step(&mut self, intent: Intent, now: Duration, out_events: &mut Vec<Event>) {
        if self.outcome.is_terminal() {
            return;
        }

        match self.state.tick(now) {
            TimerTick::Idle => {}
            TimerTick::Advanced { remaining_seconds } => {
                out_events.push(Event::TimerAdvanced { remaining_seconds });
            }
            TimerTick::Expired => {
                out_events.push(Event::TimerExpired);
                self.finish(Outcome::Failed, out_events);
                return;
            }
        }

        let cooling = self.player.move_cooldown_ticks() > 0;
        match intent {
            Intent::None => {}
            Intent::Move(direction) => match self.player.attempt_move(
                &mut self.state,
                direction,
                self.move_cooldown_ticks,
                now,
            ) {
                Ok(accepted) => {
                    debug!(
                        "level {}: player moved {:?} from {} to {}",
                        self.level, direction, accepted.from, accepted.to
                    );
                    out_events.push(Event::PlayerMoved {
                        from: accepted.from,
                        to: accepted.to,
                        direction,
                    });
                    if accepted.timer_started {
                        out_events.push(Event::TimerStarted {
                            remaining_seconds: self.state.time_limit_seconds(),
                        });
                    }
                }
                Err(reason) => {
                    debug!(
                        "level {}: move {:?} rejected ({:?})",
                        self.level, direction, reason
                    );
                    out_events.push(Event::MoveRejected { direction, reason });
                }
            },
            Intent::Use => {
                let cells = self.state.break_adjacent_crates(self.player.position());
                if !cells.is_empty() {
                    debug!(
                        "level {}: broke {} crate(s), {} hit(s) left",
                        self.level,
                        cells.len(),
                        self.state.remaining_hits()
                    );
                    out_events.push(Event::CratesBroken {
                        cells,
                        remaining_hits: self.state.remaining_hits(),
                    });
                }
            }
        }

        if cooling {
            self.player.cool_down();
        }

        if self.player.position() == self.data.goal() {
            self.finish(Outcome::Completed, out_events);
        }
    }

    fn finish(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.outcome = outcome;
        let level = self.level;
        match outcome {
            Outcome::Completed => {
                info!("level {level} completed");
                out_events.push(Event::LevelCompleted { level });
            }
            Outcome::Failed => {
                info!("level {level} failed: time ran out");
                out_events.push(Event::LevelFailed { level });
            }
            Outcome::Playing => {}
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Step { intent, now } => world.run_step(intent, now, out_events),
        Command::ResetLevel => {
            world.reset();
            info!("level {} reset", world.level);
            out_events.push(Event::LevelReset { level: world.level });
        }
        Command::ConfigureMoveCooldown { ticks } => {
            world.move_cooldown_ticks = ticks;
        }
    }
}

/// Runs one simulation step and reports the resulting outcome.
///
/// Terminal worlds are returned untouched and emit no events.
pub fn step(
    world: &mut World,
    intent: Intent,
    now: Duration,
    out_events: &mut Vec<Event>,
) -> Outcome {
    apply(world, Command::Step { intent, now }, out_events);
    world.outcome
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use orb_maze_core::{
        CellCoord, CellKind, GridView, LevelNumber, Outcome, PlayerSnapshot, TimerState,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Level currently loaded into the world.
    #[must_use]
    pub fn level_number(world: &World) -> LevelNumber {
        world.level
    }

    /// Flavour text of the loaded level.
    #[must_use]
    pub fn description(world: &World) -> &str {
        world.data.description()
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.data.columns(), world.data.rows())
    }

    /// Current kind of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn cell_at(world: &World, cell: CellCoord) -> Option<CellKind> {
        world.state.cell(cell)
    }

    /// Read-only view of the current grid, including broken crates.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.state.grid_view()
    }

    /// Cell holding the orb.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.data.goal()
    }

    /// Snapshot of the player avatar.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Hits left for breaking crates.
    #[must_use]
    pub fn remaining_hits(world: &World) -> u32 {
        world.state.remaining_hits()
    }

    /// Hit budget the level starts with.
    #[must_use]
    pub fn hit_budget(world: &World) -> u32 {
        world.data.hit_budget()
    }

    /// Seconds left on the countdown, or `None` for untimed levels.
    ///
    /// Before the first move the full time limit is reported.
    #[must_use]
    pub fn remaining_seconds(world: &World) -> Option<u32> {
        if !world.data.is_timed() {
            return None;
        }
        match world.state.timer() {
            TimerState::NotStarted => Some(world.data.time_limit_seconds()),
            timer => timer.remaining_seconds(),
        }
    }

    /// Current countdown state.
    #[must_use]
    pub fn timer(world: &World) -> TimerState {
        world.state.timer()
    }

    /// Outcome of the current attempt.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Reports whether the attempt accepted its first move.
    #[must_use]
    pub fn has_moved(world: &World) -> bool {
        world.state.has_moved()
    }

    /// Cooldown armed after each accepted move.
    #[must_use]
    pub fn move_cooldown_ticks(world: &World) -> u32 {
        world.move_cooldown_ticks
    }
}
