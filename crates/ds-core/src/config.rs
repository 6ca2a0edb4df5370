//! Generation config: the user-facing knobs and their resolution into a
//! clamped, per-call `ResolvedConfig`.
//!
//! Nothing here rejects a number. Out-of-range values are clamped or replaced
//! by their default, so every config resolves to something the engine can run.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corners::{fill_corners, CornerDistribution};
use crate::engine::EdgeMode;
use crate::error::ConfigError;
use crate::grid::side_for;
use crate::randomizer::DisplacementModel;
use crate::smooth::MAX_FACTOR;

// ── Defaults and limits ───────────────────────────────────────────────────────

pub const DEFAULT_WIDTH: usize = 129;
pub const DEFAULT_HEIGHT: usize = 129;
pub const DEFAULT_DEPTH: f32 = 2000.0;
pub const DEFAULT_OFFSET: f32 = -0.2;
pub const DEFAULT_ROUGH: f32 = 1.0;

/// Largest accepted width or height: 2^12 + 1.
pub const MAX_DIMENSION: usize = (1 << POWER_MAX) + 1;
pub const POWER_MIN: i32 = 2;
pub const POWER_MAX: i32 = 12;
/// Depth ceiling. Neighbour sums and mean-reverting displacement reach about
/// 22 × depth, which must stay finite.
pub const MAX_DEPTH: f32 = f32::MAX / 64.0;
const OFFSET_LIMIT: f32 = 0.9;

// ── Public structs ────────────────────────────────────────────────────────────

/// Parameters for one heightmap generation.
///
/// Deserialises from JSON with camelCase keys; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output rows (`data.len()`). Values below 2 fall back to 129.
    pub width: usize,
    /// Cells per row. Values below 2 fall back to 129.
    pub height: usize,
    /// Value ceiling and vertical scale. Non-positive falls back to 2000;
    /// capped at [`MAX_DEPTH`].
    pub depth: f32,
    /// Bias term of the mean-reverting model, clamped to [-0.9, 0.9]. The
    /// default linear model ignores it.
    pub offset: f32,
    /// Roughness. Clamped per displacement model.
    pub rough: f32,
    /// Up to four fixed corner seeds; `null` entries are drawn at random.
    pub corner: Option<Vec<Option<f32>>>,
    pub corner_distribution: CornerDistribution,
    /// Majority-filter strength, clamped to [0, 3]. 0 disables smoothing.
    #[serde(alias = "smoothFactor")]
    pub smooth: i32,
    pub model: DisplacementModel,
    pub edge_mode: EdgeMode,
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            depth: DEFAULT_DEPTH,
            offset: DEFAULT_OFFSET,
            rough: DEFAULT_ROUGH,
            corner: None,
            corner_distribution: CornerDistribution::default(),
            smooth: 0,
            model: DisplacementModel::default(),
            edge_mode: EdgeMode::default(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Square config of side `2^power + 1`, with `power` clamped to [2, 12].
    pub fn from_power(power: i32) -> Self {
        let side = (1usize << power.clamp(POWER_MIN, POWER_MAX)) + 1;
        Self { width: side, height: side, ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Clamp every field into its valid domain.
    pub fn resolve(&self) -> ResolvedConfig {
        let width = resolve_dimension(self.width, DEFAULT_WIDTH);
        let height = resolve_dimension(self.height, DEFAULT_HEIGHT);

        let floor = self.model.value_floor();
        let depth = if self.depth.is_finite() && self.depth > 0.0 {
            self.depth.clamp(floor, MAX_DEPTH)
        } else {
            DEFAULT_DEPTH
        };

        let offset = if self.offset.is_finite() {
            self.offset.clamp(-OFFSET_LIMIT, OFFSET_LIMIT)
        } else {
            DEFAULT_OFFSET
        };

        let (rough_lo, rough_hi) = self.model.rough_bounds();
        let rough = if self.rough.is_finite() {
            self.rough.clamp(rough_lo, rough_hi)
        } else {
            DEFAULT_ROUGH.clamp(rough_lo, rough_hi)
        };

        let corners = self
            .corner
            .as_deref()
            .and_then(fill_corners)
            .map(|c| {
                c.map(|v| v.filter(|v| v.is_finite()).map(|v| v.clamp(floor, depth)))
            })
            .unwrap_or([None; 4]);

        ResolvedConfig {
            width,
            height,
            side: side_for(width.max(height)),
            depth,
            offset,
            rough,
            corners,
            corner_distribution: self.corner_distribution,
            smooth: self.smooth.clamp(0, MAX_FACTOR as i32) as u8,
            model: self.model,
            edge_mode: self.edge_mode,
            seed: self.seed,
        }
    }
}

fn resolve_dimension(value: usize, default: usize) -> usize {
    if value < 2 {
        default
    } else {
        value.min(MAX_DIMENSION)
    }
}

/// A config after clamping. Owned by a single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub width: usize,
    pub height: usize,
    /// Side of the internal square buffer, `2^n + 1`.
    pub side: usize,
    pub depth: f32,
    pub offset: f32,
    pub rough: f32,
    /// Fixed corner seeds in grid corner order; `None` is drawn at random.
    pub corners: [Option<f32>; 4],
    pub corner_distribution: CornerDistribution,
    pub smooth: u8,
    pub model: DisplacementModel,
    pub edge_mode: EdgeMode,
    pub seed: Option<u64>,
}

// ── Unit tests ────────────────────────────────────────────────────────────────
