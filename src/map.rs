//! Top-level map generation: terrain pipeline plus settlement placement.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::MapConfig;
use crate::error::GenError;
use crate::field::ElevationField;
use crate::pipeline;
use crate::seeds::MapSeeds;
use crate::settlements::{self, SettlementSet};

/// A fully generated map: elevation field, settlements and the seeds that
/// produced them.
#[derive(Clone, Debug, Serialize)]
pub struct IslandMap {
    pub elevation: ElevationField,
    pub settlements: SettlementSet,
    #[serde(skip)]
    pub seeds: MapSeeds,
}

impl IslandMap {
    /// Generate a complete map from a master seed.
    ///
    /// Terrain and settlements run on independently derived sub-seeds, so
    /// the same master seed always reproduces the same map regardless of
    /// how other calls interleave.
    pub fn generate(config: &MapConfig, master_seed: u64) -> Result<Self, GenError> {
        let seeds = MapSeeds::from_master(master_seed);
        let elevation = pipeline::build_elevation_field(config, seeds.terrain)?;
        let settlements = settlements::place_settlements(&elevation, seeds.settlements);
        Ok(Self {
            elevation,
            settlements,
            seeds,
        })
    }

    /// Generate a batch of maps, one per seed, in parallel.
    ///
    /// Results are keyed by seed, not by completion order; the seeds are
    /// embarrassingly parallel tasks with no ordering requirement.
    pub fn generate_batch(
        config: &MapConfig,
        seeds: &[u64],
    ) -> Vec<(u64, Result<Self, GenError>)> {
        seeds
            .par_iter()
            .map(|&seed| (seed, Self::generate(config, seed)))
            .collect()
    }
}
