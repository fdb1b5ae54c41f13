//! Randomized spanning-tree generation.
//!
//! This module contains the `Generator` struct, which carves passages into a fully walled
//! [`Grid`] with one of two interchangeable algorithms. Both leave the grid as a perfect maze:
//! every cell reachable from the start and exactly `area - 1` passages.

use std::collections::HashSet;

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};

use crate::{
    error::MazeError,
    grid::{Cell, Grid},
    types::{Algorithm, Position},
};

/// Walk steps granted per cell before Aldous-Broder gives up.
pub(crate) const STEPS_PER_CELL: usize = 1_000;

/// Lower bound of the Aldous-Broder step limit for small grids.
pub(crate) const MIN_STEP_LIMIT: usize = 10_000;

/// Maze generator driven by an injected random number generator.
///
/// The generator never creates its own randomness: the caller hands over the source, so a seeded
/// generator reproduces the same wall layout on a cleared grid of the same size.
#[derive(Clone, Debug)]
pub struct Generator<R> {
    /// Source of every random choice.
    rng: R,
    /// Upper bound on random-walk steps; derived from the grid area when unset.
    step_limit: Option<usize>,
}

impl Generator<StdRng> {
    /// Creates a generator backed by a [`StdRng`] seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator around the given random number generator.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            step_limit: None,
        }
    }

    /// Bounds the number of random-walk steps Aldous-Broder may take.
    #[must_use]
    pub fn with_step_limit(self, limit: usize) -> Self {
        Self {
            step_limit: Some(limit),
            ..self
        }
    }

    /// Carves a maze into `grid` with the chosen algorithm.
    ///
    /// The grid is expected to be fully walled, either freshly created or reset with
    /// [`Grid::clear`].
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::NonConvergence`] when Aldous-Broder exceeds its step
    /// limit.
    pub fn generate(&mut self, grid: &mut Grid, algorithm: Algorithm) -> Result<(), MazeError> {
        match algorithm {
            Algorithm::Backtrack => self.iterative_backtrack(grid),
            Algorithm::AldousBroder => self.aldous_broder(grid),
        }
    }

    /// Carves a randomized depth-first spanning tree.
    ///
    /// The top of an explicit stack is popped; if it still has unvisited neighbours they are
    /// shuffled, the cell is pushed back, the wall towards one of them is carved and that neighbour
    /// is pushed. The stack empties once every cell has been visited and backtracked through.
    ///
    /// # Errors
    ///
    /// This function only fails if the grid rejects a carve, which cannot happen for neighbours the
    /// grid itself produced.
    pub fn iterative_backtrack(&mut self, grid: &mut Grid) -> Result<(), MazeError> {
        let start = grid.start();
        let mut visited = HashSet::with_capacity(grid.area());
        let _ = visited.insert(start);
        let mut stack = vec![start];
        let mut carved = 0_usize;

        while let Some(current) = stack.pop() {
            let mut available: Vec<Position> = grid
                .neighbors(current.x, current.y, false)
                .map(Cell::position)
                .filter(|position| !visited.contains(position))
                .collect();
            available.shuffle(&mut self.rng);

            if let Some(next) = available.pop() {
                stack.push(current);
                grid.carve_between(current, next)?;
                trace!("carved {current} -> {next}");
                let _ = visited.insert(next);
                stack.push(next);
                carved += 1;
            }
        }

        debug!(
            "backtracking carved {carved} passages in a {}x{} grid",
            grid.length(),
            grid.width()
        );

        Ok(())
    }

    /// Carves a uniform spanning tree with the Aldous-Broder random walk.
    ///
    /// The walk moves to a uniformly chosen neighbour at every step and carves the wall it crossed
    /// whenever it enters a cell for the first time. It ends once every cell has been entered.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::NonConvergence`] when the walk takes more steps than the
    /// configured limit; the grid is then only partially carved.
    pub fn aldous_broder(&mut self, grid: &mut Grid) -> Result<(), MazeError> {
        let total = grid.area();
        let limit = self.step_limit.unwrap_or_else(|| default_step_limit(total));
        let mut current = grid.start();
        let mut visited = HashSet::with_capacity(total);
        let _ = visited.insert(current);
        let mut steps = 0_usize;

        while visited.len() < total {
            if steps >= limit {
                debug!(
                    "random walk stopped after {steps} steps with {} of {total} cells visited",
                    visited.len()
                );
                return Err(MazeError::NonConvergence { steps });
            }
            steps += 1;

            let available: Vec<Position> = grid
                .neighbors(current.x, current.y, false)
                .map(Cell::position)
                .collect();
            let Some(&next) = available.choose(&mut self.rng) else {
                break;
            };

            if visited.insert(next) {
                grid.carve_between(current, next)?;
                trace!("carved {current} -> {next} at step {steps}");
            }
            current = next;
        }

        debug!("random walk covered {total} cells in {steps} steps");

        Ok(())
    }
}

/// Default Aldous-Broder step limit for a grid of `area` cells.
pub(crate) fn default_step_limit(area: usize) -> usize {
    area.saturating_mul(STEPS_PER_CELL).max(MIN_STEP_LIMIT)
}
