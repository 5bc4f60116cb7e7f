//! 4x4 sudoku as a 16-gene integer vector.

use serde_json::json;

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::ProblemError;
use crate::schema::{ParamField, Score};

use super::engine_fields;

/// Fill a 4x4 grid with values 1..=4 so that every row, column and 2x2 box
/// holds distinct values.
///
/// Fitness sums the number of distinct values in each of the 4 rows, 4
/// columns and 4 boxes; a solved grid scores 48.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sudoku4x4;

impl Sudoku4x4 {
    pub const SIZE: usize = 4;
    pub const CELLS: usize = 16;
    pub const MAX_SCORE: usize = 48;

    fn distinct(values: impl Iterator<Item = i64>) -> usize {
        let mut seen = [false; Self::SIZE + 1];
        values
            .filter(|&v| {
                let slot = v.clamp(0, Self::SIZE as i64) as usize;
                !std::mem::replace(&mut seen[slot], true)
            })
            .count()
    }

    /// Distinct-value score of a grid.
    pub fn score(grid: &[i64]) -> usize {
        let n = Self::SIZE;
        let cell = |r: usize, c: usize| grid[r * n + c];

        let rows: usize = (0..n).map(|r| Self::distinct((0..n).map(|c| cell(r, c)))).sum();
        let cols: usize = (0..n).map(|c| Self::distinct((0..n).map(|r| cell(r, c)))).sum();
        let boxes: usize = [(0, 0), (0, 2), (2, 0), (2, 2)]
            .iter()
            .map(|&(br, bc)| {
                Self::distinct(
                    (br..br + 2).flat_map(|r| (bc..bc + 2).map(move |c| cell(r, c))),
                )
            })
            .sum();

        rows + cols + boxes
    }
}

impl Problem for Sudoku4x4 {
    type Individual = Vec<i64>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        engine_fields(100, 150, 0.1)
    }

    /// Rows start as shuffles of 1..=4, so row constraints hold initially.
    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<i64>, ProblemError> {
        let mut grid = Vec::with_capacity(Self::CELLS);
        for _ in 0..Self::SIZE {
            let mut row = [1, 2, 3, 4];
            rng.shuffle(&mut row);
            grid.extend(row);
        }
        Ok(grid)
    }

    fn fitness(&self, individual: &Vec<i64>) -> Result<Score, ProblemError> {
        encoding::check_length(individual.len(), Self::CELLS)?;
        Ok(Score::Scalar(Self::score(individual) as f64))
    }

    fn breed(
        &self,
        a: &Vec<i64>,
        b: &Vec<i64>,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<i64>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        Ok(encoding::reset_genes(individual, rate, 1, Self::SIZE as i64, rng))
    }

    fn validate(&self, individual: &Vec<i64>) -> Result<(), ProblemError> {
        encoding::check_length(individual.len(), Self::CELLS)?;
        encoding::check_bounds(individual, 1, Self::SIZE as i64)
    }

    fn details(&self, individual: &Vec<i64>) -> Option<serde_json::Value> {
        let grid: Vec<&[i64]> = individual.chunks(Self::SIZE).collect();
        Some(json!({ "grid": grid, "solved": Self::score(individual) == Self::MAX_SCORE }))
    }
}
