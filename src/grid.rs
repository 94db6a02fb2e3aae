//! Grid representation and fingerprints for battleship puzzles.
//!
//! The grid is a flat row-major array of cells. Each cell is either
//! undetermined, water, a ship segment stamped by the solver, or a ship
//! segment given in the puzzle input.

use std::fmt;

/// One cell of the puzzle grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    /// Not yet decided.
    Unknown,
    /// Water, either given in the input or deduced during search.
    Water,
    /// Ship segment stamped by the solver.
    Ship,
    /// Ship segment supplied in the puzzle input.
    ///
    /// Kept distinct from `Ship`: a given segment is still open space a
    /// placement may cover, a stamped segment is not.
    GivenShip,
}

impl Cell {
    /// The display character for this cell.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Cell::Unknown => '-',
            Cell::Water => '.',
            Cell::Ship => 'S',
            Cell::GivenShip => 's',
        }
    }

    /// Parses a cell from its display or input character.
    ///
    /// Accepts the input key (`-` unknown, `w` water, `s` given ship) as
    /// well as the render glyphs `.` and `S`.
    pub fn from_glyph(ch: char) -> Option<Cell> {
        match ch {
            '-' => Some(Cell::Unknown),
            'w' | '.' => Some(Cell::Water),
            'S' => Some(Cell::Ship),
            's' => Some(Cell::GivenShip),
            _ => None,
        }
    }

    /// True when the cell holds a ship segment, stamped or given.
    #[inline]
    pub fn is_ship(self) -> bool {
        matches!(self, Cell::Ship | Cell::GivenShip)
    }
}

/// A rows x cols grid of cells, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-Unknown grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::Unknown; rows * cols],
        }
    }

    /// Builds a grid from pre-existing cells.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(cells.len(), rows * cols, "cell count must match dimensions");
        Grid { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.idx(row, col);
        self.cells[i] = cell;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of ship segments (stamped or given) in the grid.
    pub fn ship_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_ship()).count()
    }

    /// Canonical serialization of the cell contents, one glyph byte per
    /// cell in row-major order.
    ///
    /// Two grids have equal fingerprints iff their cells are identical;
    /// this is the key used to deduplicate solutions.
    pub fn fingerprint(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.glyph() as u8).collect()
    }

    /// Formats the grid as one line of glyphs per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(self.get(row, col).glyph());
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{})\n{}", self.rows, self.cols, self.render())
    }
}
