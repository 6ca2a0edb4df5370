//! Recursive square/diamond subdivision over a [`HeightGrid`].
//!
//! Each level with step `size` and half-step `h = size / 2` runs a full square
//! pass, then a full diamond pass, then recurses on `size / 2`. Recursion stops
//! once `h < 1`, so depth is `log2(side − 1)`.
//!
//! Cells are visited in raster order (`y` outer, `x` inner) so a seeded
//! randomizer sees the same sequence of calls on every run.
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::crop::RangeTracker;
use crate::grid::HeightGrid;
use crate::randomizer::Randomizer;

/// How a diamond step treats neighbours that fall outside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeMode {
    /// Leave them out and average the neighbours that exist.
    #[default]
    Omit,
    /// Read the grid fallback (mean of the seeded corners) in their place.
    Fallback,
}

const DIAGONALS: [(i64, i64); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];
const ORTHOGONALS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub struct SubdivisionEngine<'a, R: Randomizer + ?Sized> {
    grid: &'a mut HeightGrid,
    randomizer: &'a mut R,
    tracker: &'a mut RangeTracker,
    edge_mode: EdgeMode,
}

impl<'a, R: Randomizer + ?Sized> SubdivisionEngine<'a, R> {
    pub fn new(
        grid: &'a mut HeightGrid,
        randomizer: &'a mut R,
        tracker: &'a mut RangeTracker,
        edge_mode: EdgeMode,
    ) -> Self {
        Self { grid, randomizer, tracker, edge_mode }
    }

    /// Fill every non-corner cell. Corners must already be seeded.
    pub fn run(&mut self) {
        let size = self.grid.side() - 1;
        self.subdivide(size);
    }

    fn subdivide(&mut self, size: usize) {
        let half = size / 2;
        if half < 1 {
            return;
        }
        trace!(size, half, "subdivision level");

        let side = self.grid.side();

        for y in (half..side).step_by(size) {
            for x in (half..side).step_by(size) {
                if !self.grid.is_corner(x, y) {
                    self.step(x, y, half, &DIAGONALS);
                }
            }
        }

        for y in (0..side).step_by(half) {
            for x in ((y + half) % size..side).step_by(size) {
                if !self.grid.is_corner(x, y) {
                    self.step(x, y, half, &ORTHOGONALS);
                }
            }
        }

        self.subdivide(half);
    }

    /// Average the neighbours at `offsets · half`, displace and store.
    fn step(&mut self, x: usize, y: usize, half: usize, offsets: &[(i64, i64); 4]) {
        let base = self.neighbour_mean(x as i64, y as i64, half as i64, offsets);
        let val = self.randomizer.displace(base, (2 * half) as f32);
        self.grid.set(x, y, val);
        self.tracker.record(x, y, val);
    }

    fn neighbour_mean(&self, x: i64, y: i64, half: i64, offsets: &[(i64, i64); 4]) -> f32 {
        let neighbours = offsets.iter().map(|&(dx, dy)| (x + dx * half, y + dy * half));
        match self.edge_mode {
            EdgeMode::Fallback => {
                neighbours.map(|(nx, ny)| self.grid.get(nx, ny)).sum::<f32>() / 4.0
            }
            EdgeMode::Omit => {
                let (sum, count) = neighbours
                    .filter_map(|(nx, ny)| self.grid.try_get(nx, ny))
                    .fold((0.0f32, 0u32), |(s, n), v| (s + v, n + 1));
                // Every non-corner cell has at least two in-bounds neighbours.
                sum / count as f32
            }
        }
    }
}
