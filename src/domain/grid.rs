use super::Cell;
use crate::config::ALIVE_PROBABILITY;
use rand::Rng;
use rayon::prelude::*;

/// Grid holds one generation of the automaton on a torus.
/// Generations are never edited in place: `step` builds a fresh grid
/// from a complete snapshot of the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Seed a grid where each cell starts alive with `ALIVE_PROBABILITY`
    pub fn random(rows: usize, cols: usize) -> Self {
        Self::random_with_density(rows, cols, ALIVE_PROBABILITY)
    }

    /// Seed from the thread-local rng with a caller-chosen live density
    pub fn random_with_density(rows: usize, cols: usize, probability: f64) -> Self {
        Self::random_with(rows, cols, probability, &mut rand::rng())
    }

    /// Seed a grid where each cell is independently alive with `probability`
    pub fn random_with<R: Rng>(rows: usize, cols: usize, probability: f64, rng: &mut R) -> Self {
        let cells = (0..rows * cols)
            .map(|_| Cell::from_alive(rng.random::<f64>() < probability))
            .collect();
        Self { rows, cols, cells }
    }

    /// Grid dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.cells[self.index(row, col)])
    }

    /// Set cell at position; out-of-range positions are ignored
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.cells[idx] = cell;
        }
    }

    /// Builder form of `set` for assembling fixtures
    pub fn with_alive(mut self, cells: &[(usize, usize)]) -> Self {
        for &(row, col) in cells {
            self.set(row, col, Cell::Alive);
        }
        self
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count live cells among the 8 toroidal neighbors of (row, col).
    /// Both offsets wrap modulo the grid dimensions, negative ones included,
    /// so on grids narrower than 3 the same cell may be counted more than once.
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }
        let rows = self.rows as isize;
        let cols = self.cols as isize;

        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(|(dr, dc)| {
                let r = (row as isize + dr).rem_euclid(rows) as usize;
                let c = (col as isize + dc).rem_euclid(cols) as usize;
                self.cells[self.index(r, c)]
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    fn next_cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)].evolve(self.neighbor_count(row, col))
    }

    /// One generation later, computed serially. The input is not touched.
    pub fn step(&self) -> Self {
        let cells = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| self.next_cell(row, col))
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Row-parallel step using rayon; identical output to `step`.
    /// Pays off on grids well beyond 100x100.
    pub fn step_parallel(&self) -> Self {
        let cells: Vec<Cell> = (0..self.rows)
            .into_par_iter()
            .flat_map_iter(|row| (0..self.cols).map(move |col| self.next_cell(row, col)))
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Iterate over all cells as (row, col, cell)
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.cols, idx % self.cols, cell))
    }
}
