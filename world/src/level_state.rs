//! Mutable per-attempt level state: grid copy, hits and countdown.

use std::time::Duration;

use orb_maze_core::{CellCoord, CellKind, Direction, GridView, TimerState};
use orb_maze_level::LevelData;

/// Result of advancing the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// The countdown is not running or no whole second elapsed.
    Idle,
    /// One or more whole seconds were consumed.
    Advanced {
        /// Whole seconds left.
        remaining_seconds: u32,
    },
    /// The countdown reached zero on this tick.
    Expired,
}

/// State of one level attempt derived from immutable [`LevelData`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelState {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    remaining_hits: u32,
    timer: TimerState,
    time_limit_seconds: u32,
    has_moved: bool,
}

impl LevelState {
    /// Derives a fresh attempt from the level data.
    #[must_use]
    pub fn start(data: &LevelData) -> Self {
        Self {
            columns: data.columns(),
            rows: data.rows(),
            cells: data.cells().to_vec(),
            remaining_hits: data.hit_budget(),
            timer: TimerState::NotStarted,
            time_limit_seconds: data.time_limit_seconds(),
            has_moved: false,
        }
    }

    /// Consumes every whole second elapsed since the last consumed timestamp.
    ///
    /// The fractional remainder is kept, so frame-rate variation never
    /// drifts the countdown. Timestamps earlier than the last consumed one
    /// consume nothing.
    pub fn tick(&mut self, now: Duration) -> TimerTick {
        let TimerState::Running {
            remaining_seconds,
            last_tick,
        } = self.timer
        else {
            return TimerTick::Idle;
        };

        let whole_seconds = now.saturating_sub(last_tick).as_secs();
        if whole_seconds == 0 {
            return TimerTick::Idle;
        }

        let consumed = u32::try_from(whole_seconds)
            .unwrap_or(u32::MAX)
            .min(remaining_seconds);
        let remaining_seconds = remaining_seconds - consumed;
        if remaining_seconds == 0 {
            self.timer = TimerState::Expired;
            return TimerTick::Expired;
        }

        self.timer = TimerState::Running {
            remaining_seconds,
            last_tick: last_tick + Duration::from_secs(whole_seconds),
        };
        TimerTick::Advanced { remaining_seconds }
    }

    /// Records the attempt's first accepted move, starting the countdown.
    ///
    /// Returns `true` only when the countdown started. Later calls and
    /// untimed levels leave the timer untouched.
    pub fn start_timer_on_first_move(&mut self, now: Duration) -> bool {
        if self.has_moved {
            return false;
        }
        self.has_moved = true;

        if self.time_limit_seconds == 0 {
            return false;
        }

        self.timer = TimerState::Running {
            remaining_seconds: self.time_limit_seconds,
            last_tick: now,
        };
        true
    }

    /// Breaks every crate orthogonally adjacent to `position`.
    ///
    /// Consumes one hit when at least one crate broke, regardless of how many
    /// did. Returns the cells that turned into floor; the list is empty when
    /// no hits remain or no neighbour is a crate.
    pub fn break_adjacent_crates(&mut self, position: CellCoord) -> Vec<CellCoord> {
        if self.remaining_hits == 0 {
            return Vec::new();
        }

        let mut broken = Vec::new();
        for direction in Direction::ALL {
            let Some((neighbor, index)) = position
                .neighbor(direction)
                .and_then(|neighbor| self.index(neighbor).map(|index| (neighbor, index)))
            else {
                continue;
            };

            if self.cells[index] == CellKind::Crate {
                self.cells[index] = CellKind::Floor;
                broken.push(neighbor);
            }
        }

        if !broken.is_empty() {
            self.remaining_hits -= 1;
        }
        broken
    }

    /// Kind of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Read-only view of the current grid.
    #[must_use]
    pub fn grid_view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows)
    }

    /// Hits left for breaking crates.
    #[must_use]
    pub const fn remaining_hits(&self) -> u32 {
        self.remaining_hits
    }

    /// Current countdown state.
    #[must_use]
    pub const fn timer(&self) -> TimerState {
        self.timer
    }

    /// Countdown budget copied from the level data.
    #[must_use]
    pub const fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    /// Reports whether the attempt accepted its first move.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
