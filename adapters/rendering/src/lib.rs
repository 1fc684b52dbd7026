#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Orb Maze adapters.

use std::{
    fmt,
    io::{self, Write},
};

use anyhow::{Context, Result as AnyResult};
use orb_maze_core::{CellCoord, CellKind, Direction, LevelNumber, Outcome, PlayerSnapshot};
use orb_maze_world::{query, World};

const WARNING_THRESHOLD_SECONDS: u32 = 5;
const DANGER_THRESHOLD_SECONDS: u32 = 3;

/// How urgently the countdown should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerUrgency {
    /// Plenty of time left.
    Calm,
    /// Five seconds or fewer left.
    Warning,
    /// Three seconds or fewer left.
    Danger,
}

impl TimerUrgency {
    /// Classifies the provided remaining time.
    #[must_use]
    pub const fn from_remaining(remaining_seconds: u32) -> Self {
        if remaining_seconds <= DANGER_THRESHOLD_SECONDS {
            Self::Danger
        } else if remaining_seconds <= WARNING_THRESHOLD_SECONDS {
            Self::Warning
        } else {
            Self::Calm
        }
    }
}

/// Countdown readout shown on timed levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerPresentation {
    /// Whole seconds left.
    pub remaining_seconds: u32,
    /// Styling hint derived from the remaining time.
    pub urgency: TimerUrgency,
}

/// Heads-up display contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HudPresentation {
    /// Countdown, absent on untimed levels.
    pub timer: Option<TimerPresentation>,
    /// Hits left, absent on levels without a hit budget.
    pub remaining_hits: Option<u32>,
}

impl HudPresentation {
    /// Builds the HUD from the world's current countdown and hit budget.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let timer = query::remaining_seconds(world).map(|remaining_seconds| TimerPresentation {
            remaining_seconds,
            urgency: TimerUrgency::from_remaining(remaining_seconds),
        });
        let remaining_hits =
            (query::hit_budget(world) > 0).then(|| query::remaining_hits(world));

        Self {
            timer,
            remaining_hits,
        }
    }
}

/// Dense row-major copy of the grid at capture time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPresentation {
    columns: u32,
    cells: Vec<CellKind>,
}

impl GridPresentation {
    /// Iterates over the grid one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        let width = usize::try_from(self.columns).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }
}

/// Scene description combining the grid, the orb, the player and the HUD.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scene {
    /// Level being played.
    pub level: LevelNumber,
    /// Flavour text of the level.
    pub description: String,
    /// Current grid contents.
    pub grid: GridPresentation,
    /// Cell holding the orb.
    pub goal: CellCoord,
    /// Player avatar.
    pub player: PlayerSnapshot,
    /// Heads-up display contents.
    pub hud: HudPresentation,
    /// Outcome of the current attempt.
    pub outcome: Outcome,
}

impl Scene {
    /// Captures a presentation snapshot of the world.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let view = query::grid_view(world);
        let (columns, _) = view.dimensions();
        let grid = GridPresentation {
            columns,
            cells: view.iter().map(|(_, kind)| kind).collect(),
        };

        Self {
            level: query::level_number(world),
            description: query::description(world).to_owned(),
            grid,
            goal: query::goal(world),
            player: query::player(world),
            hud: HudPresentation::capture(world),
            outcome: query::outcome(world),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Level {}: {}", self.level, self.description)?;

        for (row, cells) in (0..).zip(self.grid.rows()) {
            for (column, kind) in (0..).zip(cells) {
                let cell = CellCoord::new(column, row);
                let glyph = if cell == self.player.position {
                    player_glyph(self.player.facing)
                } else if cell == self.goal {
                    'O'
                } else {
                    cell_glyph(*kind)
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }

        let mut hud = Vec::new();
        if let Some(timer) = self.hud.timer {
            let marker = match timer.urgency {
                TimerUrgency::Calm => "",
                TimerUrgency::Warning => " !",
                TimerUrgency::Danger => " !!",
            };
            hud.push(format!("Time: {}s{marker}", timer.remaining_seconds));
        }
        if let Some(hits) = self.hud.remaining_hits {
            hud.push(format!("Hits: {hits}"));
        }
        if !hud.is_empty() {
            writeln!(f, "{}", hud.join("   "))?;
        }

        match self.outcome {
            Outcome::Playing => Ok(()),
            Outcome::Completed => writeln!(f, "Level complete!"),
            Outcome::Failed => writeln!(f, "Time's up!"),
        }
    }
}

/// Glyph used for a cell kind in text frames.
#[must_use]
pub const fn cell_glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Floor => '.',
        CellKind::Wall => '#',
        CellKind::Crate => 'C',
    }
}

/// Glyph used for the player in text frames, pointing where it faces.
#[must_use]
pub const fn player_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Rendering backend capable of presenting Orb Maze scenes.
pub trait RenderingBackend {
    /// Presents one frame built from the provided scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend that writes ASCII frames to any writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    frames: u64,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing frames to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Consumes the backend, yielding the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        write_frame(&mut self.writer, scene)
            .with_context(|| format!("failed to present frame {}", self.frames))?;
        self.frames += 1;
        Ok(())
    }
}

fn write_frame<W: Write>(writer: &mut W, scene: &Scene) -> io::Result<()> {
    write!(writer, "{scene}")?;
    writeln!(writer)?;
    writer.flush()
}
