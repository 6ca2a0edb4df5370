//! Diamond-square heightmap generation.
//!
//! ```
//! use ds_core::{generate, GenerationConfig};
//!
//! let map = generate(&GenerationConfig { width: 65, height: 33, seed: Some(7), ..Default::default() });
//! assert_eq!(map.data.len(), 65);
//! assert!(map.data.iter().flatten().all(|&v| map.min <= v && v <= map.max));
//! ```
pub mod config;
pub mod corners;
pub mod crop;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod randomizer;
pub mod smooth;

use rand::Rng;

pub use config::GenerationConfig;
pub use corners::CornerDistribution;
pub use engine::EdgeMode;
pub use error::ConfigError;
pub use generator::{HeightMap, HeightmapGenerator};
pub use randomizer::{DisplacementModel, Randomizer};

/// Generate a heightmap, seeding a `ChaCha8Rng` from `config.seed` if set.
pub fn generate(config: &GenerationConfig) -> HeightMap {
    HeightmapGenerator::new(config).generate()
}

/// Generate a heightmap with the built-in displacement model driven by `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> HeightMap {
    HeightmapGenerator::new(config).generate_with_rng(rng)
}

/// Generate a heightmap with a caller-supplied randomizer.
///
/// `rng` is only used for corners without a fixed value. The randomizer's
/// output is stored as-is: non-finite values propagate into the map.
pub fn generate_with_randomizer<R, D>(config: &GenerationConfig, rng: &mut R, randomizer: &mut D) -> HeightMap
where
    R: Rng + ?Sized,
    D: Randomizer + ?Sized,
{
    HeightmapGenerator::new(config).generate_with_randomizer(rng, randomizer)
}
