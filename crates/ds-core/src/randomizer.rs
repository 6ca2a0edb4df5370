//! Displacement strategies applied to every interpolated cell.
//!
//! The engine only sees the [`Randomizer`] trait. Closures implement it
//! directly, so tests and callers can inject deterministic or alternative
//! distributions without touching the engine.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ResolvedConfig;

/// Maps an interpolated base value and a local range to the stored value.
///
/// `range` is the span of the current subdivision step (`2h`): large at
/// coarse levels, 2 at the finest.
pub trait Randomizer {
    fn displace(&mut self, base: f32, range: f32) -> f32;
}

impl<F: FnMut(f32, f32) -> f32> Randomizer for F {
    #[inline]
    fn displace(&mut self, base: f32, range: f32) -> f32 {
        self(base, range)
    }
}

/// Built-in displacement models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplacementModel {
    /// `base + (u − base/depth) · range · rough`. Continuous and unclamped.
    Linear,
    /// Offset bias plus a gap term that pulls values back towards the middle
    /// of `[1, depth]`, with a small jitter. Clamped, optionally rounded.
    MeanReverting {
        #[serde(default = "default_round")]
        round: bool,
    },
}

fn default_round() -> bool {
    true
}

impl Default for DisplacementModel {
    fn default() -> Self {
        Self::Linear
    }
}

impl DisplacementModel {
    /// Lowest value the model produces, also the floor for fixed corners.
    pub fn value_floor(self) -> f32 {
        match self {
            Self::Linear => 0.0,
            Self::MeanReverting { .. } => MEAN_REVERTING_FLOOR,
        }
    }

    pub fn rough_bounds(self) -> (f32, f32) {
        match self {
            Self::Linear => (0.0, 1.0),
            Self::MeanReverting { .. } => (0.1, 0.9),
        }
    }
}

const MEAN_REVERTING_FLOOR: f32 = 1.0;

// ── Model randomizer ──────────────────────────────────────────────────────────

/// The default randomizer: one of the [`DisplacementModel`]s driven by `rng`.
pub struct ModelRandomizer<'r, R: Rng + ?Sized> {
    model: DisplacementModel,
    depth: f32,
    rough: f32,
    offset: f32,
    side: f32,
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> ModelRandomizer<'r, R> {
    pub fn new(cfg: &ResolvedConfig, rng: &'r mut R) -> Self {
        Self {
            model: cfg.model,
            depth: cfg.depth,
            rough: cfg.rough,
            offset: cfg.offset,
            side: cfg.side as f32,
            rng,
        }
    }

    fn linear(&mut self, base: f32, range: f32) -> f32 {
        let u: f32 = self.rng.gen();
        base + (u - base / self.depth) * range * self.rough
    }

    fn mean_reverting(&mut self, base: f32, range: f32, round: bool) -> f32 {
        let floor = MEAN_REVERTING_FLOOR;
        let span = (self.depth - floor) / 2.0;
        let gap = if span > 0.0 { (span - (base - floor)) / span } else { 0.0 };
        let half = range / 2.0;
        let distance = half / self.side;

        let sign = self.sign(gap);
        let bias = (self.jitter(self.offset, 0.8) * 0.8 + self.jitter(sign * self.rough, 0.9) * 0.2)
            * self.jitter(distance, 0.5)
            * 4.0;
        let noise = (self.rng.gen::<f32>() - 0.5) * self.rough * half * 0.02;

        let value = base + base * (bias + noise);
        let value = if round { value.round() } else { value };
        value.clamp(floor, self.depth)
    }

    /// `value` scaled by a random factor in `[p, 1)`.
    fn jitter(&mut self, value: f32, p: f32) -> f32 {
        value * (p + (1.0 - p) * self.rng.gen::<f32>())
    }

    /// Sign of `value`; a coin flip at zero.
    fn sign(&mut self, value: f32) -> f32 {
        if value == 0.0 {
            if self.rng.gen::<bool>() { 1.0 } else { -1.0 }
        } else {
            value.signum()
        }
    }
}

impl<R: Rng + ?Sized> Randomizer for ModelRandomizer<'_, R> {
    fn displace(&mut self, base: f32, range: f32) -> f32 {
        match self.model {
            DisplacementModel::Linear => self.linear(base, range),
            DisplacementModel::MeanReverting { round } => self.mean_reverting(base, range, round),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn resolved(model: DisplacementModel, depth: f32, rough: f32) -> ResolvedConfig {
        GenerationConfig { model, depth, rough, ..Default::default() }.resolve()
    }

    #[test]
    fn closures_are_randomizers() {
        let mut calls = 0;
        let mut r = |base: f32, range: f32| {
            calls += 1;
            base + range
        };
        assert_eq!(r.displace(1.0, 2.0), 3.0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn linear_with_zero_rough_is_identity() {
        let cfg = resolved(DisplacementModel::Linear, 2000.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut r = ModelRandomizer::new(&cfg, &mut rng);
        for base in [0.0, 12.5, 1999.0] {
            assert_eq!(r.displace(base, 64.0), base);
        }
    }

    #[test]
    fn linear_displacement_is_bounded_by_range() {
        let cfg = resolved(DisplacementModel::Linear, 100.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut r = ModelRandomizer::new(&cfg, &mut rng);
        for _ in 0..1000 {
            // u − base/depth ∈ [−0.5, 0.5) at base = depth/2.
            let v = r.displace(50.0, 8.0);
            assert!((46.0..54.0).contains(&v), "value {v} outside ±range/2");
        }
    }

    #[test]
    fn mean_reverting_output_is_clamped_integer() {
        let cfg = resolved(DisplacementModel::MeanReverting { round: true }, 7.0, 0.8);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut r = ModelRandomizer::new(&cfg, &mut rng);
        for i in 0..2000 {
            let base = 1.0 + (i % 7) as f32;
            let v = r.displace(base, 128.0);
            assert!((1.0..=7.0).contains(&v), "value {v} outside [1, 7]");
            assert_eq!(v, v.round());
        }
    }

    #[test]
    fn mean_reverting_pulls_high_values_down() {
        let cfg = resolved(DisplacementModel::MeanReverting { round: false }, 1000.0, 0.8);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut r = ModelRandomizer::new(&cfg, &mut rng);
        let base = 900.0;
        let mean = (0..1000).map(|_| r.displace(base, 8.0)).sum::<f32>() / 1000.0;
        assert!(mean < base, "mean {mean:.2} should fall below base {base}");
    }

    #[test]
    fn model_json_uses_kind_tag() {
        let m: DisplacementModel = serde_json::from_str(r#"{ "kind": "meanReverting" }"#).unwrap();
        assert_eq!(m, DisplacementModel::MeanReverting { round: true });
        let m: DisplacementModel = serde_json::from_str(r#"{ "kind": "linear" }"#).unwrap();
        assert_eq!(m, DisplacementModel::Linear);
    }
}
