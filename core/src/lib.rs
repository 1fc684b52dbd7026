#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Orb Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! carrying the tick's [`Intent`] and timestamp, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Presentation layers read
//! snapshots such as [`PlayerSnapshot`] and [`GridView`] and never mutate the
//! simulation directly.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Orb Maze.";

/// Number of ticks a player must wait after an accepted move before moving again.
pub const DEFAULT_MOVE_COOLDOWN_TICKS: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Runs one simulation step with the tick's input.
    Step {
        /// Normalised input collected by the host for this tick.
        intent: Intent,
        /// Host timestamp measured from an arbitrary, fixed epoch.
        now: Duration,
    },
    /// Discards the current attempt and restarts the level from its data.
    ResetLevel,
    /// Updates the cooldown applied after each accepted move.
    ConfigureMoveCooldown {
        /// Number of ticks that must elapse before another move is accepted.
        ticks: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The countdown started because the player made the first move.
    TimerStarted {
        /// Whole seconds left on the countdown.
        remaining_seconds: u32,
    },
    /// One or more whole seconds elapsed on a running countdown.
    TimerAdvanced {
        /// Whole seconds left on the countdown.
        remaining_seconds: u32,
    },
    /// The countdown reached zero.
    TimerExpired,
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a directional intent was refused.
    MoveRejected {
        /// Direction the player attempted to travel.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that a use-action destroyed at least one crate.
    CratesBroken {
        /// Cells that turned from crate into floor.
        cells: Vec<CellCoord>,
        /// Hits left after the action.
        remaining_hits: u32,
    },
    /// The player reached the orb.
    LevelCompleted {
        /// Level that was completed.
        level: LevelNumber,
    },
    /// The countdown expired before the player reached the orb.
    LevelFailed {
        /// Level that was failed.
        level: LevelNumber,
    },
    /// The level was restarted from its immutable data.
    LevelReset {
        /// Level that was restarted.
        level: LevelNumber,
    },
}

/// Identifier of a level within the level directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// Creates a new level number with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the level number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level number that directly follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction, in the order neighbours are examined.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// The column is the `x` axis and the row is the `y` axis; row zero is the top
/// of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the orthogonal neighbour in the provided direction.
    ///
    /// Yields `None` when the neighbour would have a negative index. Upper
    /// bounds depend on the grid and are checked by the caller.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        Some(CellCoord::new(column?, row?))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable ground.
    Floor,
    /// Permanent obstacle.
    Wall,
    /// Obstacle that turns into floor when broken.
    Crate,
}

impl CellKind {
    /// Reports whether the player may stand on the cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// Normalised per-tick input produced by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// No input was collected for the tick.
    #[default]
    None,
    /// The player wants to step one cell in the provided direction.
    Move(Direction),
    /// The player wants to break the crates around them.
    Use,
}

/// Classification of a play attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The attempt is still in progress.
    #[default]
    Playing,
    /// The player reached the orb.
    Completed,
    /// The countdown expired first.
    Failed,
}

impl Outcome {
    /// Reports whether the attempt has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Countdown state of a level attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerState {
    /// The player has not moved yet, or the level is untimed.
    #[default]
    NotStarted,
    /// The countdown is running.
    Running {
        /// Whole seconds left.
        remaining_seconds: u32,
        /// Timestamp up to which elapsed time has been consumed.
        last_tick: Duration,
    },
    /// The countdown reached zero.
    Expired,
}

impl TimerState {
    /// Whole seconds left, if the countdown is running.
    #[must_use]
    pub const fn remaining_seconds(&self) -> Option<u32> {
        match self {
            Self::Running {
                remaining_seconds, ..
            } => Some(*remaining_seconds),
            Self::Expired => Some(0),
            Self::NotStarted => None,
        }
    }
}

/// Reasons a directional move may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The movement cooldown has not elapsed yet.
    Cooldown,
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a wall.
    Wall,
    /// The destination is an unbroken crate.
    Crate,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Cell currently occupied by the player.
    pub position: CellCoord,
    /// Direction of the last accepted move.
    pub facing: Direction,
    /// Ticks left before another move is accepted.
    pub move_cooldown_ticks: u32,
}

/// Read-only view into the dense cell grid of a level attempt.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellKind],
    columns: u32,
    rows: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellKind], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Returns the kind of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Iterates over every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + 'a {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .zip(self.cells.iter().copied())
    }

    /// Provides the dimensions of the underlying grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
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
