//! Corner seeding: fixed values, uniform draws or beta-distributed draws.
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

/// Shape parameters of the corner beta: α = β = 3, centrally biased.
const CORNER_SHAPE: f32 = 3.0;

/// Distribution for corners that have no fixed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerDistribution {
    /// Beta(3, 3) scaled by depth: centrally biased heights.
    #[default]
    Beta,
    /// Uniform in [0, depth).
    Uniform,
}

impl CornerDistribution {
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R, depth: f32) -> f32 {
        match self {
            Self::Beta => corner_beta().sample(rng) * depth,
            Self::Uniform => rng.gen::<f32>() * depth,
        }
    }
}

fn corner_beta() -> Beta<f32> {
    Beta::new(CORNER_SHAPE, CORNER_SHAPE).expect("corner beta shapes are positive and finite")
}

/// Broadcast a caller-supplied corner list to exactly four entries.
///
/// Shorter lists repeat their last entry, longer ones are truncated. An empty
/// list yields `None`.
pub fn fill_corners<T: Copy>(values: &[T]) -> Option<[T; 4]> {
    let last = *values.last()?;
    Some(std::array::from_fn(|i| values.get(i).copied().unwrap_or(last)))
}

/// Produce the four corner values, drawing the unset ones from `dist`.
pub fn seed_values<R: Rng + ?Sized>(
    fixed: [Option<f32>; 4],
    dist: CornerDistribution,
    depth: f32,
    rng: &mut R,
) -> [f32; 4] {
    fixed.map(|v| v.unwrap_or_else(|| dist.sample(rng, depth)))
}
