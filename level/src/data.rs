//! Immutable level representation and the document parser that builds it.

use log::debug;
use orb_maze_core::{CellCoord, CellKind, GridView};
use serde::Deserialize;

use crate::error::{Axis, LevelFormatError, MarkerRole};

const FLOOR_GLYPH: char = '.';
const WALL_GLYPH: char = 'W';
const CRATE_GLYPH: char = 'C';
const START_GLYPH: char = 'P';
const GOAL_GLYPH: char = 'O';

/// Parsed, validated description of a single level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelData {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    start: CellCoord,
    goal: CellCoord,
    time_limit_seconds: u32,
    hit_budget: u32,
    description: String,
}

impl LevelData {
    /// Parses a JSON level document.
    ///
    /// Parsing is pure: identical input always yields an identical value.
    pub fn parse(raw: &str) -> Result<Self, LevelFormatError> {
        let document: LevelDocument =
            serde_json::from_str(raw).map_err(LevelFormatError::InvalidDocument)?;
        Self::from_document(document)
    }

    fn from_document(document: LevelDocument) -> Result<Self, LevelFormatError> {
        let rows = measure(Axis::Height, document.layout.len())?;
        let columns = match document.layout.first() {
            Some(row) => measure(Axis::Width, row.chars().count())?,
            None => 0,
        };
        if rows == 0 || columns == 0 {
            return Err(LevelFormatError::EmptyLayout);
        }

        check_declared(Axis::Width, document.grid_size, columns)?;
        check_declared(Axis::Height, document.grid_size, rows)?;
        check_declared(Axis::Width, document.width, columns)?;
        check_declared(Axis::Height, document.height, rows)?;

        let mut cells = Vec::with_capacity(
            document
                .layout
                .len()
                .saturating_mul(usize::try_from(columns).unwrap_or(0)),
        );
        let mut start = None;
        let mut goal = None;

        for (row_index, row) in (0..).zip(&document.layout) {
            let found = measure(Axis::Width, row.chars().count())?;
            if found != columns {
                return Err(LevelFormatError::RaggedRow {
                    row: row_index,
                    expected: columns,
                    found,
                });
            }

            for (column_index, glyph) in (0..).zip(row.chars()) {
                let cell = CellCoord::new(column_index, row_index);
                let kind = match glyph {
                    FLOOR_GLYPH => CellKind::Floor,
                    WALL_GLYPH => CellKind::Wall,
                    CRATE_GLYPH => CellKind::Crate,
                    START_GLYPH => {
                        record_marker(&mut start, MarkerRole::Start, cell)?;
                        CellKind::Floor
                    }
                    GOAL_GLYPH => {
                        record_marker(&mut goal, MarkerRole::Goal, cell)?;
                        CellKind::Floor
                    }
                    _ => return Err(LevelFormatError::UnknownGlyph { cell, glyph }),
                };
                cells.push(kind);
            }
        }

        let explicit_start = document
            .player_start
            .map(|[column, row]| CellCoord::new(column, row));
        let explicit_goal = document
            .orb
            .map(|orb| CellCoord::new(orb.position[0], orb.position[1]));

        let mut level = Self {
            columns,
            rows,
            cells,
            start: CellCoord::new(0, 0),
            goal: CellCoord::new(0, 0),
            time_limit_seconds: document.time_limit.unwrap_or(0),
            hit_budget: document.hits.unwrap_or(0),
            description: document.description.unwrap_or_default(),
        };

        if let Some(cell) = explicit_start {
            level.check_explicit(MarkerRole::Start, cell)?;
            record_marker(&mut start, MarkerRole::Start, cell)?;
        }
        if let Some(cell) = explicit_goal {
            level.check_explicit(MarkerRole::Goal, cell)?;
            record_marker(&mut goal, MarkerRole::Goal, cell)?;
        }

        level.start = start.ok_or(LevelFormatError::Missing(MarkerRole::Start))?;
        level.goal = goal.ok_or(LevelFormatError::Missing(MarkerRole::Goal))?;
        if level.start == level.goal {
            return Err(LevelFormatError::StartIsGoal(level.start));
        }

        debug!(
            "parsed {}x{} level: start {}, goal {}, {} crates, {}s limit, {} hits",
            level.columns,
            level.rows,
            level.start,
            level.goal,
            level.crates().count(),
            level.time_limit_seconds,
            level.hit_budget
        );

        Ok(level)
    }

    fn check_explicit(&self, role: MarkerRole, cell: CellCoord) -> Result<(), LevelFormatError> {
        match self.cell(cell) {
            None => Err(LevelFormatError::OutOfRange {
                role,
                cell,
                columns: self.columns,
                rows: self.rows,
            }),
            Some(kind) if kind.is_walkable() => Ok(()),
            Some(_) => Err(LevelFormatError::NotFloor { role, cell }),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Row-major cell kinds as laid out in the document.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Read-only view of the initial grid.
    #[must_use]
    pub fn grid_view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows)
    }

    /// Kind of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.grid_view().cell(cell)
    }

    /// Cell the player spawns on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell holding the orb.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Coordinates of every crate in row-major order.
    pub fn crates(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.grid_view()
            .iter()
            .filter(|(_, kind)| *kind == CellKind::Crate)
            .map(|(cell, _)| cell)
    }

    /// Countdown budget in seconds; zero means untimed.
    #[must_use]
    pub const fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    /// Reports whether the level has a countdown.
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        self.time_limit_seconds > 0
    }

    /// Number of crate-breaking actions available.
    #[must_use]
    pub const fn hit_budget(&self) -> u32 {
        self.hit_budget
    }

    /// Display text shown alongside the level.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Parses a JSON level document into [`LevelData`].
pub fn parse(raw: &str) -> Result<LevelData, LevelFormatError> {
    LevelData::parse(raw)
}

fn measure(axis: Axis, count: usize) -> Result<u32, LevelFormatError> {
    u32::try_from(count).map_err(|_| LevelFormatError::Oversized { axis, count })
}

fn check_declared(axis: Axis, declared: Option<u32>, actual: u32) -> Result<(), LevelFormatError> {
    match declared {
        Some(declared) if declared != actual => Err(LevelFormatError::DimensionMismatch {
            axis,
            declared,
            actual,
        }),
        _ => Ok(()),
    }
}

fn record_marker(
    slot: &mut Option<CellCoord>,
    role: MarkerRole,
    cell: CellCoord,
) -> Result<(), LevelFormatError> {
    if let Some(first) = *slot {
        return Err(LevelFormatError::Duplicate {
            role,
            first,
            second: cell,
        });
    }
    *slot = Some(cell);
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelDocument {
    layout: Vec<String>,
    #[serde(default)]
    grid_size: Option<u32>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    time_limit: Option<u32>,
    #[serde(default)]
    hits: Option<u32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    player_start: Option<[u32; 2]>,
    #[serde(default)]
    orb: Option<OrbDocument>,
}

#[derive(Debug, Deserialize)]
struct OrbDocument {
    position: [u32; 2],
}
