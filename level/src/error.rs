//! Failures raised while turning a level document into [`crate::LevelData`].

use std::fmt;

use orb_maze_core::CellCoord;
use thiserror::Error;

/// Grid axis referenced by a dimension mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal extent, measured in columns.
    Width,
    /// Vertical extent, measured in rows.
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

/// Special cell a level must declare exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// Cell the player spawns on.
    Start,
    /// Cell holding the orb.
    Goal,
}

impl fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Goal => write!(f, "goal"),
        }
    }
}

/// Reasons a level document is rejected at load time.
#[derive(Debug, Error)]
pub enum LevelFormatError {
    /// The payload is not a JSON level document.
    #[error("level document is not valid: {0}")]
    InvalidDocument(#[source] serde_json::Error),
    /// The layout has no rows, or its first row has no cells.
    #[error("level layout contains no cells")]
    EmptyLayout,
    /// A layout row does not have as many cells as the first row.
    #[error("layout row {row} has {found} cells but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Cell count of the first row.
        expected: u32,
        /// Cell count of the offending row.
        found: u32,
    },
    /// The layout is too large to address with 32-bit coordinates.
    #[error("layout {axis} of {count} cells exceeds the addressable grid")]
    Oversized {
        /// Axis that overflows.
        axis: Axis,
        /// Measured cell count.
        count: usize,
    },
    /// A declared dimension disagrees with the layout.
    #[error("declared {axis} of {declared} does not match the layout's {actual}")]
    DimensionMismatch {
        /// Axis that disagrees.
        axis: Axis,
        /// Value given by the document.
        declared: u32,
        /// Value measured from the layout.
        actual: u32,
    },
    /// The layout uses a glyph with no meaning.
    #[error("unknown tile '{glyph}' at {cell}")]
    UnknownGlyph {
        /// Position of the glyph.
        cell: CellCoord,
        /// Character found in the layout.
        glyph: char,
    },
    /// The level never declares the marker.
    #[error("level has no {0} marker")]
    Missing(MarkerRole),
    /// The level declares the marker more than once.
    #[error("level declares a second {role} at {second} (first at {first})")]
    Duplicate {
        /// Marker declared twice.
        role: MarkerRole,
        /// Position of the first declaration.
        first: CellCoord,
        /// Position of the repeated declaration.
        second: CellCoord,
    },
    /// An explicit coordinate lies outside the grid.
    #[error("{role} {cell} lies outside the {columns}x{rows} grid")]
    OutOfRange {
        /// Marker the coordinate belongs to.
        role: MarkerRole,
        /// Offending coordinate.
        cell: CellCoord,
        /// Grid width.
        columns: u32,
        /// Grid height.
        rows: u32,
    },
    /// An explicit coordinate references a wall or crate.
    #[error("{role} {cell} is not a floor cell")]
    NotFloor {
        /// Marker the coordinate belongs to.
        role: MarkerRole,
        /// Offending coordinate.
        cell: CellCoord,
    },
    /// Start and goal reference the same cell.
    #[error("start and goal share the cell {0}")]
    StartIsGoal(CellCoord),
}
