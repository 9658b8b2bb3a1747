//! Poisson-disc scatter demo
//!
//! Fills a cubic region with blue-noise points by dart throwing: random
//! candidates are proposed uniformly inside the region and kept only when
//! the octree reports no accepted point within the minimum separation.
//! The emptiness probe prunes whole subtrees, so each rejection test stays
//! cheap even as thousands of points accumulate.
//!
//! Accepted positions are written to stdout as `x y z` lines for external
//! plotting; run statistics go to the log.

use log::info;
use point_octree::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Settings for one scatter run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ScatterConfig {
    /// Half-extent of the cubic scatter region
    size: f32,

    /// Minimum separation kept between accepted points
    min_separation: f32,

    /// Number of random candidates to propose
    candidates: usize,

    /// RNG seed, so runs are reproducible
    seed: u64,

    /// Octree split threshold
    capacity: usize,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            min_separation: 0.5,
            candidates: 20_000,
            seed: 7,
            capacity: 4,
        }
    }
}

impl Config for ScatterConfig {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ScatterConfig::load_from_file(&path)?,
        None => ScatterConfig::default(),
    };
    info!("scatter settings: {config:?}");

    let mut tree: Octree = Octree::with_config(OctreeConfig {
        size: Some(config.size),
        capacity: config.capacity,
        ..OctreeConfig::default()
    })?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut accepted = 0_usize;
    for _ in 0..config.candidates {
        let candidate = Vec3::new(
            rng.gen_range(-config.size..=config.size),
            rng.gen_range(-config.size..=config.size),
            rng.gen_range(-config.size..=config.size),
        );
        if tree.is_region_empty(candidate, config.min_separation) && tree.insert(candidate, None) {
            accepted += 1;
        }
    }

    info!(
        "accepted {accepted} of {} candidates, {} points stored",
        config.candidates,
        tree.len()
    );

    for (position, _) in tree.collect_all() {
        println!("{} {} {}", position.x, position.y, position.z);
    }

    Ok(())
}
