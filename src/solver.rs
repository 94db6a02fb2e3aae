//! Exhaustive backtracking search over ship placements.
//!
//! The driver always works on the head of the ship queue: it tries every
//! legal horizontal placement (rows ascending, start columns ascending),
//! then every legal vertical one, and recurses on the successor state of
//! each. Only the queue head is ever tried; every arrangement is still
//! reachable because ship identity never affects grid legality, so the
//! branching factor stays bounded by the legal positions of one length.
//!
//! Solutions are deduplicated through a [`SolutionRegistry`] keyed by grid
//! fingerprints; states reached through different placement orders but
//! with identical grids emit once.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::grid::Grid;
use crate::puzzle::{ConfigError, PuzzleDef};
use crate::state::SearchState;

/// Set of solution fingerprints seen so far.
///
/// An explicit collaborator passed through the search rather than ambient
/// global state. `insert` is an atomic check-and-insert, so concurrent
/// workers discovering the same grid emit it once.
#[derive(Debug, Default)]
pub struct SolutionRegistry {
    seen: Mutex<FxHashSet<Vec<u8>>>,
}

impl SolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fingerprint; true when it was not seen before.
    pub fn insert(&self, fingerprint: Vec<u8>) -> bool {
        self.seen.lock().unwrap().insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared context of one search run.
struct Emit<'a, F> {
    registry: &'a SolutionRegistry,
    hints: &'a Grid,
    limit: Option<usize>,
    /// Novel solutions found so far, shared across workers.
    found: &'a AtomicUsize,
    /// Cooperative stop flag, raised once the limit is reached.
    stop: &'a AtomicBool,
    on_solution: F,
}

/// All successor states of `state`: every legal horizontal placement of
/// the queue head, then every legal vertical one.
fn expand(state: &SearchState) -> Vec<SearchState> {
    let Some(ship) = state.next_ship() else {
        return Vec::new();
    };

    let mut children = Vec::new();
    for row in 0..state.rows() {
        let mut from = 0;
        while let Some(col) = state.next_horizontal_placement(row, ship, from) {
            trace!(ship, row, col, "horizontal placement");
            children.push(state.place_horizontal(row, col));
            from = col + 1;
        }
    }
    for col in 0..state.cols() {
        let mut from = 0;
        while let Some(row) = state.next_vertical_placement(col, ship, from) {
            trace!(ship, row, col, "vertical placement");
            children.push(state.place_vertical(row, col));
            from = row + 1;
        }
    }
    children
}

/// Depth-first search from `state`. Returns false once the search should
/// stop (solution limit reached).
fn search<F>(state: &SearchState, emit: &mut Emit<'_, F>) -> bool
where
    F: FnMut(usize, &Grid),
{
    if emit.stop.load(Ordering::Relaxed) {
        return false;
    }

    if state.all_placed() {
        let snapshot = state.solution_grid(emit.hints);
        if emit.registry.insert(snapshot.fingerprint()) {
            let index = emit.found.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(limit) = emit.limit {
                if index > limit {
                    emit.stop.store(true, Ordering::Relaxed);
                    return false;
                }
            }
            debug!(index, "solution found");
            (emit.on_solution)(index, &snapshot);
            if emit.limit.is_some_and(|limit| index >= limit) {
                emit.stop.store(true, Ordering::Relaxed);
                return false;
            }
        }
        return true;
    }

    for child in expand(state) {
        if !search(&child, emit) {
            return false;
        }
    }
    true
}

/// Solves the puzzle, streaming each novel solution to `on_solution` with
/// its 1-based index, in discovery order. Returns the total number of
/// solutions once the search is exhausted (or the limit was hit).
pub fn solve_with<F>(
    puzzle: &PuzzleDef,
    limit: Option<usize>,
    on_solution: F,
) -> Result<usize, ConfigError>
where
    F: FnMut(usize, &Grid),
{
    let root = SearchState::new(puzzle)?;
    let registry = SolutionRegistry::new();
    let found = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let mut emit = Emit {
        registry: &registry,
        hints: &puzzle.hints,
        limit,
        found: &found,
        stop: &stop,
        on_solution,
    };
    search(&root, &mut emit);
    Ok(found.into_inner())
}

/// Solves the puzzle and collects all solutions in discovery order.
pub fn solve(puzzle: &PuzzleDef, limit: Option<usize>) -> Result<Vec<Grid>, ConfigError> {
    let mut solutions = Vec::new();
    solve_with(puzzle, limit, |_, grid| solutions.push(grid.clone()))?;
    Ok(solutions)
}

/// Solves the puzzle with the first ship's placements fanned out across
/// worker threads.
///
/// Each branch is an owned state; the registry insert is the only shared
/// write, and a shared stop flag checked at every call boundary enforces
/// the limit cooperatively. Workers race, so there is no emission-order
/// guarantee; the returned solutions are ordered by registry index.
pub fn solve_parallel(
    puzzle: &PuzzleDef,
    limit: Option<usize>,
) -> Result<Vec<Grid>, ConfigError> {
    let root = SearchState::new(puzzle)?;
    let registry = SolutionRegistry::new();
    let found = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    let branches = expand(&root);
    if branches.is_empty() {
        // no ships at all, or no legal slot for the first one
        let mut solutions = Vec::new();
        let mut emit = Emit {
            registry: &registry,
            hints: &puzzle.hints,
            limit,
            found: &found,
            stop: &stop,
            on_solution: |_, grid: &Grid| solutions.push(grid.clone()),
        };
        search(&root, &mut emit);
        return Ok(solutions);
    }

    let mut indexed: Vec<(usize, Grid)> = branches
        .into_par_iter()
        .map(|branch| {
            let mut local: Vec<(usize, Grid)> = Vec::new();
            {
                let mut emit = Emit {
                    registry: &registry,
                    hints: &puzzle.hints,
                    limit,
                    found: &found,
                    stop: &stop,
                    on_solution: |index, grid: &Grid| local.push((index, grid.clone())),
                };
                search(&branch, &mut emit);
            }
            local
        })
        .flatten()
        .collect();

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, grid)| grid).collect())
}
