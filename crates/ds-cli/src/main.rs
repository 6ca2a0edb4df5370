//! Command-line front end: generate diamond-square heightmaps as JSON.
//!
//! Config comes from an optional JSON file, with individual flags layered on
//! top. `--count N` generates N maps with consecutive seeds in parallel.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ds_core::{generate, GenerationConfig, HeightMap};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dsmap", about = "Diamond-square heightmap generator")]
struct Args {
    /// JSON config file; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output rows.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Cells per row.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Square map of side 2^power + 1 (power clamped to 2..=12). Overrides width/height.
    #[arg(short, long)]
    power: Option<i32>,

    /// Value ceiling.
    #[arg(short, long)]
    depth: Option<f32>,

    /// Roughness.
    #[arg(short, long)]
    rough: Option<f32>,

    /// Majority-filter strength, 0-3.
    #[arg(long)]
    smooth: Option<i32>,

    /// Seed for reproducible output.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of maps; seeds run seed, seed+1, …
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Write JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn build_config(args: &Args) -> Result<GenerationConfig> {
    let mut cfg = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GenerationConfig::default(),
    };

    if let Some(power) = args.power {
        let square = GenerationConfig::from_power(power);
        cfg.width = square.width;
        cfg.height = square.height;
    }
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if let Some(height) = args.height {
        cfg.height = height;
    }
    if let Some(depth) = args.depth {
        cfg.depth = depth;
    }
    if let Some(rough) = args.rough {
        cfg.rough = rough;
    }
    if let Some(smooth) = args.smooth {
        cfg.smooth = smooth;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

/// One config per map. Without a base seed every map draws from the thread rng.
fn batch_configs(cfg: &GenerationConfig, count: usize) -> Vec<GenerationConfig> {
    (0..count as u64)
        .map(|i| GenerationConfig {
            seed: cfg.seed.map(|s| s.wrapping_add(i)),
            ..cfg.clone()
        })
        .collect()
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(out, value)?;
    } else {
        serde_json::to_writer(out, value)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = build_config(&args)?;

    if args.count == 0 {
        warn!("--count 0: nothing to generate");
        return Ok(());
    }

    let resolved = cfg.resolve();
    info!(
        width = resolved.width,
        height = resolved.height,
        side = resolved.side,
        count = args.count,
        "generating"
    );

    let maps: Vec<HeightMap> = batch_configs(&cfg, args.count).par_iter().map(generate).collect();

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating output {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);

    if let [map] = maps.as_slice() {
        write_json(&mut out, map, args.pretty)?;
    } else {
        write_json(&mut out, &maps, args.pretty)?;
    }
    out.flush().context("flushing output")?;

    for (i, map) in maps.iter().enumerate() {
        info!(index = i, min = map.min, max = map.max, "done");
    }
    Ok(())
}
