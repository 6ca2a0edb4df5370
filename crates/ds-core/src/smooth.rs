//! Majority-neighbour filter that knocks out isolated single-cell spikes.
//!
//! Not a blur: a cell either keeps its value or takes the value of one of its
//! neighbours. Cells are processed in raster order on the buffer being
//! mutated, so a cell sees the already-smoothed values of earlier cells.
use crate::grid::HeightGrid;

/// Strength above which smoothing has no further effect (eight neighbours,
/// but the scan stops at the factor).
pub const MAX_FACTOR: u8 = 3;

/// Smooth `grid` in place and return how many cells changed.
///
/// For each cell the 3×3 window is scanned column by column (`dx` outer,
/// `dy` inner), skipping the cell itself and positions outside the grid.
/// Neighbours equal to the cell are counted and the first differing value is
/// remembered; the scan stops once the count reaches `factor`. A cell with
/// fewer than `factor` equal neighbours takes the remembered value.
pub fn smooth(grid: &mut HeightGrid, factor: u8) -> usize {
    let factor = factor.min(MAX_FACTOR) as usize;
    if factor == 0 {
        return 0;
    }

    let side = grid.side();
    let mut changed = 0;
    for x in 0..side {
        for y in 0..side {
            let val = grid.get(x as i64, y as i64);
            let (same, other) = scan_window(grid, x as i64, y as i64, val, factor);
            if same < factor {
                if let Some(other) = other {
                    grid.set(x, y, other);
                    changed += 1;
                }
            }
        }
    }
    changed
}

fn scan_window(grid: &HeightGrid, x: i64, y: i64, val: f32, factor: usize) -> (usize, Option<f32>) {
    let mut same = 0;
    let mut other = None;
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some(n) = grid.try_get(x + dx, y + dy) else {
                continue;
            };
            if n == val {
                same += 1;
                if same >= factor {
                    return (same, other);
                }
            } else if other.is_none() {
                other = Some(n);
            }
        }
    }
    (same, other)
}
