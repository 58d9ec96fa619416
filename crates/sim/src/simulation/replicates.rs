//! Independent replicate populations.
//!
//! Replicates never interact, so they run in parallel. Every replicate gets
//! its own Xoshiro256++ stream seeded from a value drawn sequentially off a
//! master generator, which keeps results identical for a given master seed
//! whatever the thread count.

use crate::errors::ConfigError;
use crate::evolution::{MatingEngine, RecombinationModel};
use crate::simulation::{ModelConfig, Population, Simulation};
use log::trace;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

/// Draw `count` child seeds from `rng`, in order.
pub fn draw_seeds<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random()).collect()
}

/// Apply `f` to every seed in parallel, handing it the seed's index and a
/// generator seeded from it. Output order follows `seeds`.
pub fn par_map_seeded<T, F>(seeds: &[u64], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &mut Xoshiro256PlusPlus) -> T + Sync + Send,
{
    seeds
        .par_iter()
        .enumerate()
        .map(|(index, &seed)| {
            let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            f(index, &mut local_rng)
        })
        .collect()
}

/// Runs replicates of one validated model.
#[derive(Debug, Clone)]
pub struct ReplicateRunner {
    model: ModelConfig,
    mating: MatingEngine,
}

impl ReplicateRunner {
    pub fn new(model: ModelConfig) -> Result<Self, ConfigError> {
        model.validate()?;
        let mating = MatingEngine::new(RecombinationModel::new(model.genome.loci_per_group)?);
        Ok(Self { model, mating })
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Run one replicate from an existing generator, to the final year.
    pub fn run_with(&self, rng: Xoshiro256PlusPlus) -> Population {
        let mut sim = Simulation::from_parts(self.model.clone(), self.mating, rng);
        sim.run();
        sim.into_population()
    }

    /// Run one replicate seeded with `seed`.
    pub fn run_one(&self, seed: u64) -> Population {
        self.run_with(Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Run `count` independent replicates, seeded from `rng`.
    pub fn run_batch<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Population> {
        let seeds = draw_seeds(rng, count);
        trace!("running {count} replicates");
        seeds.par_iter().map(|&seed| self.run_one(seed)).collect()
    }
}
