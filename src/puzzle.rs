//! Puzzle definitions: fleet, line counts, hints, and validation.
//!
//! A puzzle is a multiset of ship lengths, one ship-cell count per row and
//! per column (each possibly unknown), and a hint grid of pre-revealed
//! water or ship cells. The built-in [`classic`] puzzle is an 8x8 with a
//! ten-ship fleet and two unknown row counts.

use std::fmt;

use thiserror::Error;

use crate::grid::{Cell, Grid};

/// A per-row or per-column ship-cell target.
///
/// `Unknown` lines draw from a shared slop budget instead of a fixed
/// target; see [`crate::state::SearchState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCount {
    /// Exactly this many ship cells in the line.
    Known(usize),
    /// Unconstrained line, backed by the shared slop budget.
    Unknown,
}

impl LineCount {
    #[inline]
    pub fn is_unknown(self) -> bool {
        matches!(self, LineCount::Unknown)
    }
}

/// Which of the two count axes a configuration error refers to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Fatal configuration errors, detected before any search step.
///
/// Placement rejections during search are not errors; they are ordinary
/// control flow and surface as `None` from the placement queries.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ConfigError {
    /// The known counts on one axis demand more ship cells than the fleet
    /// supplies.
    #[error("{axis} counts demand {deficit} more ship cell(s) than the fleet supplies")]
    NegativeSlop { axis: Axis, deficit: usize },
    /// Hint grid has the wrong number of rows for the row counts.
    #[error("hint grid has {found} row(s), expected {expected}")]
    HintRows { expected: usize, found: usize },
    /// One hint row has the wrong width for the column counts.
    #[error("hint row {row} is {found} cell(s) wide, expected {expected}")]
    HintWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Unrecognized character in a hint row.
    #[error("unrecognized hint character {0:?}")]
    HintChar(char),
    /// Ship lengths must be positive.
    #[error("ship lengths must be positive")]
    ZeroLengthShip,
    /// The grid needs at least one row and one column.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
}

/// A complete puzzle definition, validated at construction.
#[derive(Clone, Debug)]
pub struct PuzzleDef {
    /// Ship lengths, consumed from the front during search.
    pub ships: Vec<usize>,
    pub row_counts: Vec<LineCount>,
    pub col_counts: Vec<LineCount>,
    /// Pre-revealed cells; no-hint cells are `Unknown`.
    pub hints: Grid,
}

impl PuzzleDef {
    /// Creates a puzzle with no hints.
    pub fn new(
        ships: Vec<usize>,
        row_counts: Vec<LineCount>,
        col_counts: Vec<LineCount>,
    ) -> Result<Self, ConfigError> {
        let hints = Grid::new(row_counts.len(), col_counts.len());
        Self::with_hints(ships, row_counts, col_counts, hints)
    }

    /// Creates a puzzle with a pre-revealed hint grid.
    pub fn with_hints(
        ships: Vec<usize>,
        row_counts: Vec<LineCount>,
        col_counts: Vec<LineCount>,
        hints: Grid,
    ) -> Result<Self, ConfigError> {
        if row_counts.is_empty() || col_counts.is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        if ships.iter().any(|&len| len == 0) {
            return Err(ConfigError::ZeroLengthShip);
        }
        if hints.rows() != row_counts.len() {
            return Err(ConfigError::HintRows {
                expected: row_counts.len(),
                found: hints.rows(),
            });
        }
        if hints.cols() != col_counts.len() {
            return Err(ConfigError::HintWidth {
                row: 0,
                expected: col_counts.len(),
                found: hints.cols(),
            });
        }
        Ok(PuzzleDef {
            ships,
            row_counts,
            col_counts,
            hints,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.row_counts.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.col_counts.len()
    }

    /// Total ship cells the fleet will occupy.
    pub fn ship_cell_total(&self) -> usize {
        self.ships.iter().sum()
    }

    /// Formats a grid with this puzzle's counts: a row-count gutter on the
    /// left and a column-count footer. Unknown counts show as `?`.
    pub fn render_with_counts(&self, grid: &Grid) -> String {
        let mut out = String::new();
        for row in 0..grid.rows() {
            match self.row_counts[row] {
                LineCount::Known(n) => out.push_str(&format!("{n} ")),
                LineCount::Unknown => out.push_str("? "),
            }
            for col in 0..grid.cols() {
                out.push(grid.get(row, col).glyph());
            }
            out.push('\n');
        }
        out.push_str("  ");
        for &count in &self.col_counts {
            match count {
                LineCount::Known(n) => out.push_str(&n.to_string()),
                LineCount::Unknown => out.push('?'),
            }
        }
        out.push('\n');
        out
    }
}

/// Parses a hint grid from one string per row.
///
/// Characters follow the input key: `-` unknown, `w` (or `.`) water, `s`
/// a given ship segment. Rows must all have the same width.
pub fn parse_hint_rows(rows: &[&str]) -> Result<Grid, ConfigError> {
    if rows.is_empty() {
        return Err(ConfigError::EmptyGrid);
    }
    let width = rows[0].chars().count();
    if width == 0 {
        return Err(ConfigError::EmptyGrid);
    }
    let mut cells = Vec::with_capacity(rows.len() * width);
    for (row, text) in rows.iter().enumerate() {
        let found = text.chars().count();
        if found != width {
            return Err(ConfigError::HintWidth {
                row,
                expected: width,
                found,
            });
        }
        for ch in text.chars() {
            cells.push(Cell::from_glyph(ch).ok_or(ConfigError::HintChar(ch))?);
        }
    }
    Ok(Grid::from_cells(rows.len(), width, cells))
}

/// Fleet of the built-in classic puzzle.
pub const CLASSIC_SHIPS: &[usize] = &[4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

const CLASSIC_ROW_COUNTS: &[LineCount] = &[
    LineCount::Known(4),
    LineCount::Known(2),
    LineCount::Known(3),
    LineCount::Known(3),
    LineCount::Unknown,
    LineCount::Unknown,
    LineCount::Known(3),
    LineCount::Known(3),
];

const CLASSIC_COL_COUNTS: &[LineCount] = &[
    LineCount::Known(4),
    LineCount::Known(3),
    LineCount::Known(1),
    LineCount::Known(2),
    LineCount::Known(2),
    LineCount::Known(1),
    LineCount::Known(3),
    LineCount::Known(4),
];

const CLASSIC_HINT_ROWS: &[&str] = &[
    "--w--w--",
    "--------",
    "--------",
    "--------",
    "--------",
    "--------",
    "--------",
    "--w--w--",
];

/// The built-in 8x8 puzzle: ten ships, two unknown row counts, six water
/// hints.
pub fn classic() -> PuzzleDef {
    let hints = parse_hint_rows(CLASSIC_HINT_ROWS).expect("built-in hint grid is well formed");
    PuzzleDef::with_hints(
        CLASSIC_SHIPS.to_vec(),
        CLASSIC_ROW_COUNTS.to_vec(),
        CLASSIC_COL_COUNTS.to_vec(),
        hints,
    )
    .expect("built-in puzzle is well formed")
}
