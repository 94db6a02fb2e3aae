//! File I/O for saving and loading puzzle solutions.
//!
//! Binary format for `solutions.bin` (little endian):
//! - u32: solution count
//! - u32: rows, u32: cols
//! - repeat per solution: rows x cols glyph bytes, row-major
//!   (`.` water, `S` ship)

use std::fs::File;
use std::io::{Read, Write};

use crate::grid::{Cell, Grid};

const SOLUTIONS_BIN: &str = "solutions.bin";
const SOLUTIONS_TXT: &str = "solutions.txt";

/// Saves solutions to both binary and text files.
pub fn save(solutions: &[Grid]) -> std::io::Result<()> {
    save_text(solutions)?;
    save_binary(solutions)?;
    Ok(())
}

/// Saves solutions in human-readable text format.
fn save_text(solutions: &[Grid]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_TXT)?;
    writeln!(file, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "Solution {}:", i + 1)?;
        write!(file, "{}", solution.render())?;
        writeln!(file)?;
    }
    Ok(())
}

/// Saves solutions in compact binary format for fast loading.
fn save_binary(solutions: &[Grid]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_BIN)?;

    file.write_all(&(solutions.len() as u32).to_le_bytes())?;
    let (rows, cols) = solutions
        .first()
        .map_or((0, 0), |grid| (grid.rows(), grid.cols()));
    file.write_all(&(rows as u32).to_le_bytes())?;
    file.write_all(&(cols as u32).to_le_bytes())?;

    for solution in solutions {
        file.write_all(&solution.fingerprint())?;
    }

    Ok(())
}

/// Loads all solutions from the binary file.
pub fn load_all() -> Option<Vec<Grid>> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let solution_count = u32::from_le_bytes(u32_buffer) as usize;
    file.read_exact(&mut u32_buffer).ok()?;
    let rows = u32::from_le_bytes(u32_buffer) as usize;
    file.read_exact(&mut u32_buffer).ok()?;
    let cols = u32::from_le_bytes(u32_buffer) as usize;

    let mut solutions = Vec::with_capacity(solution_count);
    let mut cell_buffer = vec![0u8; rows * cols];

    for _ in 0..solution_count {
        file.read_exact(&mut cell_buffer).ok()?;
        let mut cells = Vec::with_capacity(rows * cols);
        for &byte in &cell_buffer {
            cells.push(Cell::from_glyph(byte as char)?);
        }
        solutions.push(Grid::from_cells(rows, cols, cells));
    }

    Some(solutions)
}

/// Returns the number of saved solutions without loading them all.
pub fn count() -> Option<usize> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer).ok()?;
    Some(u32::from_le_bytes(u32_buffer) as usize)
}
