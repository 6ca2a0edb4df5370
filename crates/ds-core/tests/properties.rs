//! End-to-end properties of `ds_core::generate*` across configs.
use ds_core::{
    generate, generate_with_randomizer, generate_with_rng, DisplacementModel, EdgeMode,
    GenerationConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn configs() -> Vec<GenerationConfig> {
    let mut out = Vec::new();
    for (width, height) in [(2usize, 2usize), (3, 17), (64, 64), (129, 20)] {
        for edge_mode in [EdgeMode::Omit, EdgeMode::Fallback] {
            for (model, depth, smooth) in [
                (DisplacementModel::Linear, 2000.0, 0),
                (DisplacementModel::MeanReverting { round: true }, 7.0, 2),
                (DisplacementModel::MeanReverting { round: false }, 50.0, 0),
            ] {
                out.push(GenerationConfig {
                    width,
                    height,
                    depth,
                    smooth,
                    model,
                    edge_mode,
                    seed: Some(width as u64 * 31 + height as u64),
                    ..Default::default()
                });
            }
        }
    }
    out
}

#[test]
fn every_config_has_requested_shape_and_true_extremes() {
    for cfg in configs() {
        let map = generate(&cfg);
        assert_eq!(map.data.len(), cfg.width, "{cfg:?}");
        assert!(map.data.iter().all(|row| row.len() == cfg.height), "{cfg:?}");

        let cells: Vec<f32> = map.data.iter().flatten().copied().collect();
        assert!(cells.iter().all(|v| v.is_finite()));
        let lo = cells.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = cells.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!((map.min, map.max), (lo, hi), "{cfg:?}");
    }
}

#[test]
fn seeded_rng_reproduces_map() {
    let cfg = GenerationConfig { width: 90, height: 45, ..Default::default() };
    let a = generate_with_rng(&cfg, &mut ChaCha8Rng::seed_from_u64(2024));
    let b = generate_with_rng(&cfg, &mut ChaCha8Rng::seed_from_u64(2024));
    assert_eq!(a, b);
}

#[test]
fn default_config_is_129_square_within_depth() {
    let map = generate(&GenerationConfig { seed: Some(1), ..Default::default() });
    assert_eq!(map.data.len(), 129);
    assert_eq!(map.data[0].len(), 129);
    assert!(map.max > map.min, "default terrain should not be flat");
}

#[test]
fn injected_randomizer_replaces_model() {
    let cfg = GenerationConfig {
        width: 33,
        height: 33,
        corner: Some(vec![Some(1.0)]),
        ..Default::default()
    };
    let map = generate_with_randomizer(&cfg, &mut rand::thread_rng(), &mut |_: f32, range: f32| -range);
    // Finest level writes −2; corner (0,0) keeps its seed.
    assert_eq!(map.min, -32.0);
    assert_eq!(map.max, 1.0);
    assert_eq!(map.data[1][0], -2.0);
}

#[test]
fn non_finite_randomizer_output_propagates() {
    let cfg = GenerationConfig { width: 5, height: 5, corner: Some(vec![Some(0.0)]), ..Default::default() };
    let map = generate_with_randomizer(&cfg, &mut rand::thread_rng(), &mut |_: f32, _: f32| f32::NAN);
    assert!(map.data[2][2].is_nan());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = GenerationConfig {
        width: 40,
        corner: Some(vec![Some(1.0), None]),
        model: DisplacementModel::MeanReverting { round: true },
        seed: Some(3),
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(GenerationConfig::from_json_str(&json).unwrap(), cfg);
}
