//! Generation orchestrator: corner seeding → subdivision → smoothing → crop.
//!
//! Every call builds its own grid and tracker from a [`ResolvedConfig`];
//! nothing is shared between calls, so independent generations may run on
//! different threads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GenerationConfig, ResolvedConfig};
use crate::corners::seed_values;
use crate::crop::{crop, RangeTracker};
use crate::engine::SubdivisionEngine;
use crate::grid::HeightGrid;
use crate::randomizer::{ModelRandomizer, Randomizer};
use crate::smooth::smooth;

// ── Public structs ────────────────────────────────────────────────────────────

/// A finished heightmap: `data[x][y]` with `width` rows of `height` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightMap {
    pub data: Vec<Vec<f32>>,
    /// Largest value in `data`.
    pub max: f32,
    /// Smallest value in `data`.
    pub min: f32,
}

impl HeightMap {
    pub fn width(&self) -> usize {
        self.data.len()
    }

    pub fn height(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }
}

/// The full square buffer after subdivision, before smoothing and cropping.
pub struct Subdivision {
    pub grid: HeightGrid,
    tracker: RangeTracker,
    width: usize,
    height: usize,
}

impl Subdivision {
    /// Smooth (when `factor > 0`) and crop to the requested rectangle.
    pub fn finish(mut self, factor: u8) -> HeightMap {
        if factor > 0 {
            let changed = smooth(&mut self.grid, factor);
            debug!(factor, changed, "smoothing pass");
            // Replacements can drop the old extreme or import a value from
            // outside the crop.
            if changed > 0 {
                self.tracker.rebuild(&self.grid);
            }
        }

        HeightMap {
            data: crop(&self.grid, self.width, self.height),
            max: self.tracker.max(),
            min: self.tracker.min(),
        }
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Runs diamond-square generations for one resolved config.
#[derive(Debug, Clone)]
pub struct HeightmapGenerator {
    cfg: ResolvedConfig,
}

impl HeightmapGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self { cfg: config.resolve() }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.cfg
    }

    /// Generate with a `ChaCha8Rng` seeded from the config seed, or from the
    /// thread rng when no seed is set.
    pub fn generate(&self) -> HeightMap {
        match self.cfg.seed {
            Some(seed) => self.generate_with_rng(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => self.generate_with_rng(&mut rand::thread_rng()),
        }
    }

    /// Like [`generate`](Self::generate), with `randomizer` in place of the
    /// displacement model. The seeded or thread rng only draws corners.
    pub fn generate_injected<D: Randomizer + ?Sized>(&self, randomizer: &mut D) -> HeightMap {
        match self.cfg.seed {
            Some(seed) => self.generate_with_randomizer(&mut ChaCha8Rng::seed_from_u64(seed), randomizer),
            None => self.generate_with_randomizer(&mut rand::thread_rng(), randomizer),
        }
    }

    /// Generate with the built-in displacement model driven by `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> HeightMap {
        let corners = seed_values(self.cfg.corners, self.cfg.corner_distribution, self.cfg.depth, rng);
        let mut randomizer = ModelRandomizer::new(&self.cfg, rng);
        self.subdivide_from(corners, &mut randomizer).finish(self.cfg.smooth)
    }

    /// Generate with an injected randomizer. `rng` only draws the corners that
    /// have no fixed value.
    pub fn generate_with_randomizer<R, D>(&self, rng: &mut R, randomizer: &mut D) -> HeightMap
    where
        R: Rng + ?Sized,
        D: Randomizer + ?Sized,
    {
        self.subdivide(rng, randomizer).finish(self.cfg.smooth)
    }

    /// Seed the corners and fill the square buffer, without smoothing or
    /// cropping.
    pub fn subdivide<R, D>(&self, rng: &mut R, randomizer: &mut D) -> Subdivision
    where
        R: Rng + ?Sized,
        D: Randomizer + ?Sized,
    {
        let corners = seed_values(self.cfg.corners, self.cfg.corner_distribution, self.cfg.depth, rng);
        self.subdivide_from(corners, randomizer)
    }

    fn subdivide_from<D: Randomizer + ?Sized>(&self, corners: [f32; 4], randomizer: &mut D) -> Subdivision {
        let ResolvedConfig { width, height, side, .. } = self.cfg;
        debug!(width, height, side, model = ?self.cfg.model, "generating heightmap");

        let mut grid = HeightGrid::new(side);
        grid.seed_corners(corners);

        let mut tracker = RangeTracker::new(width, height);
        for ((x, y), v) in grid.corner_positions().into_iter().zip(corners) {
            tracker.record(x, y, v);
        }

        SubdivisionEngine::new(&mut grid, randomizer, &mut tracker, self.cfg.edge_mode).run();

        Subdivision { grid, tracker, width, height }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
