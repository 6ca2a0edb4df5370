/// Square working buffer for one diamond-square run.
///
/// Side is always `2^n + 1`. Cells are indexed `[x][y]` and stored x-major, so
/// `row(x)` is a contiguous slice of `side` values.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    data: Vec<f32>,
    side: usize,
    /// Returned by reads outside the buffer: mean of the seeded corners.
    fallback: f32,
}

/// Smallest `2^n + 1` (n ≥ 1) that is at least `max_side`.
pub fn side_for(max_side: usize) -> usize {
    (max_side.saturating_sub(1).next_power_of_two() + 1).max(3)
}

impl HeightGrid {
    /// Zero-filled grid. Panics if `side` is not `2^n + 1` with n ≥ 1.
    pub fn new(side: usize) -> Self {
        assert!(
            side >= 3 && (side - 1).is_power_of_two(),
            "side must be 2^n+1, got {side}"
        );
        Self { data: vec![0.0; side * side], side, fallback: 0.0 }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn fallback(&self) -> f32 {
        self.fallback
    }

    /// Corner coordinates in seeding order.
    pub fn corner_positions(&self) -> [(usize, usize); 4] {
        let p = self.side - 1;
        [(0, 0), (p, 0), (0, p), (p, p)]
    }

    #[inline]
    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        let p = self.side - 1;
        (x == 0 || x == p) && (y == 0 || y == p)
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let side = self.side as i64;
        (0..side).contains(&x) && (0..side).contains(&y)
    }

    /// Write the four corners and fix the fallback to their mean.
    pub fn seed_corners(&mut self, values: [f32; 4]) {
        for ((x, y), v) in self.corner_positions().into_iter().zip(values) {
            self.set(x, y, v);
        }
        self.fallback = values.iter().sum::<f32>() / 4.0;
    }

    pub fn corner_values(&self) -> [f32; 4] {
        self.corner_positions().map(|(x, y)| self.data[x * self.side + y])
    }

    /// Stored value, or the fallback when `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> f32 {
        if self.contains(x, y) {
            self.data[x as usize * self.side + y as usize]
        } else {
            self.fallback
        }
    }

    /// Stored value, or `None` outside the buffer.
    #[inline]
    pub fn try_get(&self, x: i64, y: i64) -> Option<f32> {
        self.contains(x, y)
            .then(|| self.data[x as usize * self.side + y as usize])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        self.data[x * self.side + y] = val;
    }

    #[inline]
    pub fn row(&self, x: usize) -> &[f32] {
        &self.data[x * self.side..(x + 1) * self.side]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_rounds_up_to_power_of_two_plus_one() {
        assert_eq!(side_for(2), 3);
        assert_eq!(side_for(3), 3);
        assert_eq!(side_for(4), 5);
        assert_eq!(side_for(5), 5);
        assert_eq!(side_for(129), 129);
        assert_eq!(side_for(130), 257);
    }

    #[test]
    fn out_of_range_reads_return_corner_mean() {
        let mut grid = HeightGrid::new(5);
        grid.seed_corners([1.0, 2.0, 3.0, 6.0]);
        assert_eq!(grid.fallback(), 3.0);
        assert_eq!(grid.get(-1, 0), 3.0);
        assert_eq!(grid.get(0, 5), 3.0);
        assert_eq!(grid.try_get(5, 5), None);
        assert_eq!(grid.get(4, 4), 6.0);
    }

    #[test]
    fn corners_land_in_documented_order() {
        let mut grid = HeightGrid::new(3);
        grid.seed_corners([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(2, 0), 2.0);
        assert_eq!(grid.get(0, 2), 3.0);
        assert_eq!(grid.get(2, 2), 4.0);
        assert_eq!(grid.corner_values(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.row(2), &[2.0, 0.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "side must be 2^n+1")]
    fn rejects_non_power_side() {
        HeightGrid::new(6);
    }
}
