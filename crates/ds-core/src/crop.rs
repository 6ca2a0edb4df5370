//! Cropping the square buffer to the requested rectangle, and tracking the
//! value range of the cells that survive the crop.
use crate::grid::HeightGrid;

/// Running min/max over writes that land inside `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTracker {
    width: usize,
    height: usize,
    min: f32,
    max: f32,
}

impl RangeTracker {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, min: f32::INFINITY, max: f32::NEG_INFINITY }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Account for a write at `(x, y)`. Writes outside the rectangle are ignored.
    #[inline]
    pub fn record(&mut self, x: usize, y: usize, val: f32) {
        if self.contains(x, y) {
            if val < self.min {
                self.min = val;
            }
            if val > self.max {
                self.max = val;
            }
        }
    }

    /// Recompute the range from the cropped part of `grid`, discarding the
    /// incremental state.
    pub fn rebuild(&mut self, grid: &HeightGrid) {
        *self = Self::new(self.width, self.height);
        for x in 0..self.width {
            for (y, &v) in grid.row(x)[..self.height].iter().enumerate() {
                self.record(x, y, v);
            }
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

/// Copy the top-left `width × height` block of `grid` into `data[x][y]` form.
pub fn crop(grid: &HeightGrid, width: usize, height: usize) -> Vec<Vec<f32>> {
    (0..width).map(|x| grid.row(x)[..height].to_vec()).collect()
}
