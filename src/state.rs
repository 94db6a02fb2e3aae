//! Search state: the grid, the count/slop ledger, and the ship queue.
//!
//! A `SearchState` is the value a search branch owns. Transitions are
//! copy-on-write: placing a ship clones the state, so a parent is never
//! mutated after a child branch is spawned and there is no undo logic.
//!
//! The ledger tracks the ship cells still required per line. Lines with a
//! known target hold their own remaining count; lines with an unknown
//! target share a per-axis slop budget, computed at initialization as the
//! fleet total minus the sum of known targets on that axis.

use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use crate::puzzle::{Axis, ConfigError, LineCount, PuzzleDef};

/// One branch's puzzle state.
#[derive(Clone, Debug)]
pub struct SearchState {
    grid: Grid,
    row_counts: Vec<LineCount>,
    col_counts: Vec<LineCount>,
    row_slop: usize,
    col_slop: usize,
    ships: VecDeque<usize>,
}

/// Slop for one axis: fleet total minus the known targets.
fn line_slop(ship_total: usize, counts: &[LineCount], axis: Axis) -> Result<usize, ConfigError> {
    let known: usize = counts
        .iter()
        .filter_map(|&c| match c {
            LineCount::Known(n) => Some(n),
            LineCount::Unknown => None,
        })
        .sum();
    ship_total
        .checked_sub(known)
        .ok_or_else(|| ConfigError::NegativeSlop {
            axis,
            deficit: known - ship_total,
        })
}

impl SearchState {
    /// Builds the initial state from a validated puzzle definition.
    ///
    /// Fails with [`ConfigError::NegativeSlop`] when the known counts on
    /// either axis demand more ship cells than the fleet supplies; the
    /// row axis is checked first. Hints are pre-applied to the grid and
    /// every zero-target line is filled with water before search begins.
    pub fn new(puzzle: &PuzzleDef) -> Result<Self, ConfigError> {
        let ship_total = puzzle.ship_cell_total();
        let row_slop = line_slop(ship_total, &puzzle.row_counts, Axis::Row)?;
        let col_slop = line_slop(ship_total, &puzzle.col_counts, Axis::Column)?;

        let mut state = SearchState {
            grid: puzzle.hints.clone(),
            row_counts: puzzle.row_counts.clone(),
            col_counts: puzzle.col_counts.clone(),
            row_slop,
            col_slop,
            ships: puzzle.ships.iter().copied().collect(),
        };
        state.fill_exhausted_lines();
        Ok(state)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Length of the next unplaced ship, if any.
    #[inline]
    pub fn next_ship(&self) -> Option<usize> {
        self.ships.front().copied()
    }

    /// True when the ship queue is empty.
    #[inline]
    pub fn all_placed(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn row_slop(&self) -> usize {
        self.row_slop
    }

    pub fn col_slop(&self) -> usize {
        self.col_slop
    }

    /// The working grid, for inspection.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Lowest legal starting column >= `from_col` for a horizontal ship
    /// of length `ship` in `row`, or `None` when the row is exhausted.
    ///
    /// The row's own capacity is checked once, before scanning columns.
    /// A candidate span must lie in bounds, every cell must be open
    /// (unknown or a given segment), the cell just past the span must not
    /// be a ship segment, and the column slop must cover the spanned
    /// columns whose target is unknown.
    pub fn next_horizontal_placement(
        &self,
        row: usize,
        ship: usize,
        from_col: usize,
    ) -> Option<usize> {
        if !self.row_has_space(row, ship) {
            return None;
        }

        let mut col = from_col;
        while col + ship <= self.cols() {
            let mut run = 0;
            while run < ship && self.open_for_ship(row, col + run) {
                run += 1;
            }
            if run == ship {
                let clear_tail = col + ship == self.cols() || !self.grid.get(row, col + ship).is_ship();
                let unknown_cols = (col..col + ship)
                    .filter(|&c| self.col_counts[c].is_unknown())
                    .count();
                if clear_tail && self.col_slop >= unknown_cols {
                    return Some(col);
                }
                col += 1;
            } else {
                // jump past the blocking cell
                col += run + 1;
            }
        }

        None
    }

    /// Lowest legal starting row >= `from_row` for a vertical ship of
    /// length `ship` in `col`. Mirror of [`Self::next_horizontal_placement`].
    pub fn next_vertical_placement(
        &self,
        col: usize,
        ship: usize,
        from_row: usize,
    ) -> Option<usize> {
        if !self.col_has_space(col, ship) {
            return None;
        }

        let mut row = from_row;
        while row + ship <= self.rows() {
            let mut run = 0;
            while run < ship && self.open_for_ship(row + run, col) {
                run += 1;
            }
            if run == ship {
                let clear_tail = row + ship == self.rows() || !self.grid.get(row + ship, col).is_ship();
                let unknown_rows = (row..row + ship)
                    .filter(|&r| self.row_counts[r].is_unknown())
                    .count();
                if clear_tail && self.row_slop >= unknown_rows {
                    return Some(row);
                }
                row += 1;
            } else {
                row += run + 1;
            }
        }

        None
    }

    /// Places the next ship horizontally at (`row`, `col`), returning the
    /// successor state.
    ///
    /// The rectangle one cell around the ship is stamped as water on the
    /// pre-placement grid first, then the ship cells are stamped over it;
    /// the surrounding water is what keeps future ships from touching
    /// this one on any side or diagonal.
    pub fn place_horizontal(&self, row: usize, col: usize) -> SearchState {
        let mut next = self.clone();
        let ship = next
            .ships
            .pop_front()
            .expect("placement requested with an empty ship queue");

        next.water_rect(row.saturating_sub(1), col.saturating_sub(1), row + 1, col + ship);
        next.take_from_row(row, ship);
        for i in 0..ship {
            next.grid.set(row, col + i, Cell::Ship);
            next.take_from_col(col + i, 1);
        }
        next
    }

    /// Places the next ship vertically at (`row`, `col`). Mirror of
    /// [`Self::place_horizontal`].
    pub fn place_vertical(&self, row: usize, col: usize) -> SearchState {
        let mut next = self.clone();
        let ship = next
            .ships
            .pop_front()
            .expect("placement requested with an empty ship queue");

        next.water_rect(row.saturating_sub(1), col.saturating_sub(1), row + ship, col + 1);
        next.take_from_col(col, ship);
        for i in 0..ship {
            next.grid.set(row + i, col, Cell::Ship);
            next.take_from_row(row + i, 1);
        }
        next
    }

    /// Snapshot of a solved grid: unknowns resolve to water, ship
    /// segments to `Ship`, and given segments from the hint grid are
    /// restored even where the water ring overwrote them.
    pub fn solution_grid(&self, hints: &Grid) -> Grid {
        let mut snapshot = self.grid.clone();
        for row in 0..snapshot.rows() {
            for col in 0..snapshot.cols() {
                let resolved = if snapshot.get(row, col).is_ship()
                    || hints.get(row, col) == Cell::GivenShip
                {
                    Cell::Ship
                } else {
                    Cell::Water
                };
                snapshot.set(row, col, resolved);
            }
        }
        snapshot
    }

    /// True when the cell may become part of a ship: undetermined, or a
    /// segment given in the input.
    #[inline]
    fn open_for_ship(&self, row: usize, col: usize) -> bool {
        matches!(self.grid.get(row, col), Cell::Unknown | Cell::GivenShip)
    }

    fn row_has_space(&self, row: usize, ship: usize) -> bool {
        match self.row_counts[row] {
            LineCount::Known(n) => ship <= n,
            LineCount::Unknown => ship <= self.row_slop,
        }
    }

    fn col_has_space(&self, col: usize, ship: usize) -> bool {
        match self.col_counts[col] {
            LineCount::Known(n) => ship <= n,
            LineCount::Unknown => ship <= self.col_slop,
        }
    }

    /// Consumes `n` cells from a row's ledger, filling the row with water
    /// when its target reaches zero. Clamped: covering a given segment
    /// can drive a line past zero.
    fn take_from_row(&mut self, row: usize, n: usize) {
        match &mut self.row_counts[row] {
            LineCount::Unknown => self.row_slop = self.row_slop.saturating_sub(n),
            LineCount::Known(k) => {
                *k = k.saturating_sub(n);
                if *k == 0 {
                    self.fill_row(row);
                }
            }
        }
    }

    fn take_from_col(&mut self, col: usize, n: usize) {
        match &mut self.col_counts[col] {
            LineCount::Unknown => self.col_slop = self.col_slop.saturating_sub(n),
            LineCount::Known(k) => {
                *k = k.saturating_sub(n);
                if *k == 0 {
                    self.fill_col(col);
                }
            }
        }
    }

    /// Turns every undetermined cell in the row to water.
    fn fill_row(&mut self, row: usize) {
        for col in 0..self.cols() {
            if self.grid.get(row, col) == Cell::Unknown {
                self.grid.set(row, col, Cell::Water);
            }
        }
    }

    fn fill_col(&mut self, col: usize) {
        for row in 0..self.rows() {
            if self.grid.get(row, col) == Cell::Unknown {
                self.grid.set(row, col, Cell::Water);
            }
        }
    }

    /// Fills every line whose target is already zero. Run once at
    /// initialization; later zero crossings fill inside the ledger
    /// decrements.
    fn fill_exhausted_lines(&mut self) {
        for row in 0..self.rows() {
            if self.row_counts[row] == LineCount::Known(0) {
                self.fill_row(row);
            }
        }
        for col in 0..self.cols() {
            if self.col_counts[col] == LineCount::Known(0) {
                self.fill_col(col);
            }
        }
    }

    /// Stamps the inclusive rectangle as water, clipped to the grid.
    /// Unconditional: existing cell contents are overwritten.
    fn water_rect(&mut self, top: usize, left: usize, bottom: usize, right: usize) {
        for row in top..=bottom.min(self.rows() - 1) {
            for col in left..=right.min(self.cols() - 1) {
                self.grid.set(row, col, Cell::Water);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::LineCount::{Known, Unknown};

    fn puzzle(
        ships: Vec<usize>,
        rows: Vec<LineCount>,
        cols: Vec<LineCount>,
    ) -> PuzzleDef {
        PuzzleDef::new(ships, rows, cols).unwrap()
    }

    #[test]
    fn test_slop_computation() {
        let p = puzzle(
            vec![3, 2],
            vec![Known(2), Unknown, Known(1)],
            vec![Unknown, Unknown, Known(2)],
        );
        let state = SearchState::new(&p).unwrap();
        assert_eq!(state.row_slop(), 2);
        assert_eq!(state.col_slop(), 3);
    }

    #[test]
    fn test_negative_row_slop_is_fatal() {
        let p = puzzle(
            vec![1],
            vec![Known(2), Known(1)],
            vec![Known(1), Known(1), Known(1)],
        );
        let err = SearchState::new(&p).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeSlop {
                axis: Axis::Row,
                deficit: 2
            }
        );
    }

    #[test]
    fn test_negative_col_slop_is_fatal() {
        let p = puzzle(
            vec![1],
            vec![Known(1), Known(0)],
            vec![Known(2), Known(1)],
        );
        let err = SearchState::new(&p).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeSlop {
                axis: Axis::Column,
                deficit: 2
            }
        );
    }

    #[test]
    fn test_zero_count_lines_fill_at_init() {
        let p = puzzle(
            vec![1],
            vec![Known(1), Known(0)],
            vec![Known(0), Known(1)],
        );
        let state = SearchState::new(&p).unwrap();
        assert_eq!(state.grid().get(1, 0), Cell::Water);
        assert_eq!(state.grid().get(1, 1), Cell::Water);
        assert_eq!(state.grid().get(0, 0), Cell::Water);
        assert_eq!(state.grid().get(0, 1), Cell::Unknown);
    }

    #[test]
    fn test_horizontal_scan_finds_lowest_start() {
        // cols 0 and 1 are watered at init, pushing the 2-ship to cols 2..4
        let p = puzzle(
            vec![2],
            vec![Known(2)],
            vec![Known(0), Known(0), Known(1), Known(1)],
        );
        let state = SearchState::new(&p).unwrap();
        assert_eq!(state.next_horizontal_placement(0, 2, 0), Some(2));
        assert_eq!(state.next_horizontal_placement(0, 2, 3), None);
    }

    #[test]
    fn test_row_capacity_checked_before_scan() {
        let p = puzzle(
            vec![2],
            vec![Known(1), Known(1)],
            vec![Known(2), Known(0)],
        );
        let state = SearchState::new(&p).unwrap();
        // no row can hold the whole ship, but column 0 can
        assert_eq!(state.next_horizontal_placement(0, 2, 0), None);
        assert_eq!(state.next_vertical_placement(0, 2, 0), Some(0));
    }

    #[test]
    fn test_column_slop_gates_horizontal_spans() {
        // spanning the two unknown columns needs two slop cells, but only
        // one is left after the known column's claim; the scan slides to
        // the span that touches a single unknown column
        let p = puzzle(
            vec![2],
            vec![Known(2)],
            vec![Unknown, Unknown, Known(1)],
        );
        let state = SearchState::new(&p).unwrap();
        assert_eq!(state.col_slop(), 1);
        assert_eq!(state.next_horizontal_placement(0, 2, 0), Some(1));
    }

    #[test]
    fn test_trailing_given_segment_rejects_candidate() {
        let hints = crate::puzzle::parse_hint_rows(&["--s-"]).unwrap();
        let p = PuzzleDef::with_hints(
            vec![2],
            vec![Known(2)],
            vec![Known(1), Known(1), Known(0), Known(0)],
            hints,
        )
        .unwrap();
        let state = SearchState::new(&p).unwrap();
        // the span at col 0 ends right against the given segment, so the
        // scan advances one column and covers the segment instead
        assert_eq!(state.next_horizontal_placement(0, 2, 0), Some(1));
    }

    #[test]
    fn test_place_stamps_water_ring_then_ship() {
        let p = puzzle(
            vec![1],
            vec![Known(0), Known(1), Known(0)],
            vec![Known(0), Known(1), Known(0)],
        );
        let state = SearchState::new(&p).unwrap();
        let placed = state.place_horizontal(1, 1);

        assert!(placed.all_placed());
        assert_eq!(placed.grid().get(1, 1), Cell::Ship);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    assert_eq!(placed.grid().get(row, col), Cell::Water);
                }
            }
        }
    }

    #[test]
    fn test_place_decrements_ledger_and_fills() {
        let p = puzzle(
            vec![2, 1],
            vec![Known(2), Known(1), Known(0)],
            vec![Known(2), Known(0), Known(1)],
        );
        let state = SearchState::new(&p).unwrap();
        let placed = state.place_vertical(0, 0);

        assert_eq!(placed.next_ship(), Some(1));
        // column 0 is exhausted, row 0 still expects one more cell
        assert_eq!(placed.next_vertical_placement(0, 1, 0), None);
        assert_eq!(placed.next_horizontal_placement(0, 1, 0), Some(2));
    }

    #[test]
    fn test_placed_ship_is_not_open_space() {
        let p = puzzle(
            vec![2, 2],
            vec![Known(4)],
            vec![Known(1), Known(1), Known(1), Known(1)],
        );
        let state = SearchState::new(&p).unwrap();
        let placed = state.place_horizontal(0, 0);
        // the stamped segments must not be re-coverable by the second ship
        assert_eq!(placed.next_horizontal_placement(0, 2, 0), None);
    }

    #[test]
    fn test_solution_grid_resolves_and_restores_hints() {
        let hints = crate::puzzle::parse_hint_rows(&["s--"]).unwrap();
        let p = PuzzleDef::with_hints(
            vec![1],
            vec![Known(1)],
            vec![Known(0), Known(0), Known(1)],
            hints,
        )
        .unwrap();
        let state = SearchState::new(&p).unwrap();
        let placed = state.place_horizontal(0, 2);
        let snapshot = placed.solution_grid(&p.hints);

        assert_eq!(snapshot.get(0, 0), Cell::Ship);
        assert_eq!(snapshot.get(0, 1), Cell::Water);
        assert_eq!(snapshot.get(0, 2), Cell::Ship);
    }
}
