//! Player avatar state and movement rules.

use std::time::Duration;

use orb_maze_core::{CellCoord, CellKind, Direction, MoveRejection, PlayerSnapshot};

use crate::level_state::LevelState;

/// Details of a move that the level accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptedMove {
    /// Cell the player left.
    pub from: CellCoord,
    /// Cell the player entered.
    pub to: CellCoord,
    /// Whether this move started the level countdown.
    pub timer_started: bool,
}

/// Mutable state of the player avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    position: CellCoord,
    facing: Direction,
    move_cooldown_ticks: u32,
}

impl PlayerState {
    /// Places a fresh avatar on the start cell, facing down with no cooldown.
    #[must_use]
    pub const fn spawn(position: CellCoord) -> Self {
        Self {
            position,
            facing: Direction::Down,
            move_cooldown_ticks: 0,
        }
    }

    /// Attempts a single-cell move.
    ///
    /// The move is refused while the cooldown is active or when the target
    /// lies outside the grid or holds a wall or crate. Refused moves leave the
    /// player untouched. An accepted move updates the facing, arms the
    /// cooldown with `cooldown_ticks` and starts the countdown on the first
    /// move of the attempt.
    pub fn attempt_move(
        &mut self,
        level: &mut LevelState,
        direction: Direction,
        cooldown_ticks: u32,
        now: Duration,
    ) -> Result<AcceptedMove, MoveRejection> {
        if self.move_cooldown_ticks > 0 {
            return Err(MoveRejection::Cooldown);
        }

        let target = self
            .position
            .neighbor(direction)
            .ok_or(MoveRejection::OutOfBounds)?;
        match level.cell(target) {
            None => return Err(MoveRejection::OutOfBounds),
            Some(CellKind::Wall) => return Err(MoveRejection::Wall),
            Some(CellKind::Crate) => return Err(MoveRejection::Crate),
            Some(CellKind::Floor) => {}
        }

        let from = self.position;
        self.position = target;
        self.facing = direction;
        self.move_cooldown_ticks = cooldown_ticks;
        let timer_started = level.start_timer_on_first_move(now);

        Ok(AcceptedMove {
            from,
            to: target,
            timer_started,
        })
    }

    /// Counts the cooldown down by one tick, stopping at zero.
    pub fn cool_down(&mut self) {
        self.move_cooldown_ticks = self.move_cooldown_ticks.saturating_sub(1);
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Direction of the last accepted move.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Ticks left before another move is accepted.
    #[must_use]
    pub const fn move_cooldown_ticks(&self) -> u32 {
        self.move_cooldown_ticks
    }

    /// Captures a read-only snapshot of the avatar.
    #[must_use]
    pub const fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            facing: self.facing,
            move_cooldown_ticks: self.move_cooldown_ticks,
        }
    }
}
