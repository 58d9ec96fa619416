//! Simulation engine for crop-wild introgression.
//!
//! This module provides the generation loop: each generation is built from
//! scratch out of gene-flow F1s and within-population offspring, then replaces
//! the parental generation entirely.

use crate::errors::ConfigError;
use crate::evolution::{MatingEngine, RecombinationModel};
use crate::simulation::{ModelConfig, Population};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Main simulation engine: one replicate.
///
/// The engine keeps two population buffers of identical shape. Offspring are
/// written into the spare buffer, which is then swapped with the current one,
/// so no allocation happens after construction and parents never alias
/// offspring.
#[derive(Debug)]
pub struct Simulation {
    /// Validated model parameters
    model: ModelConfig,
    mating: MatingEngine,
    /// Current generation
    population: Population,
    /// Buffer receiving the next generation
    offspring: Population,
    /// Random number generator (Xoshiro256++)
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a new simulation from an all-wild population.
    ///
    /// A `None` seed draws one from the thread-local OS-seeded generator.
    pub fn new(model: ModelConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };
        Self::with_rng(model, rng)
    }

    /// Create a new simulation driven by an existing generator.
    pub fn with_rng(model: ModelConfig, rng: Xoshiro256PlusPlus) -> Result<Self, ConfigError> {
        model.validate()?;
        let mating = MatingEngine::new(RecombinationModel::new(model.genome.loci_per_group)?);
        Ok(Self::from_parts(model, mating, rng))
    }

    /// Assemble an engine from an already validated model.
    pub(crate) fn from_parts(
        model: ModelConfig,
        mating: MatingEngine,
        rng: Xoshiro256PlusPlus,
    ) -> Self {
        let population = Population::wild(model.genome, model.demography.population_size);
        let offspring = population.clone();

        Self {
            model,
            mating,
            population,
            offspring,
            rng,
        }
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Consume the engine, returning the current population.
    pub fn into_population(self) -> Population {
        self.population
    }

    /// Get the current generation number.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// True once the configured number of years has been simulated.
    pub fn is_finished(&self) -> bool {
        self.generation() >= self.model.demography.years
    }

    /// Advance simulation by one generation.
    pub fn step(&mut self) {
        let year = self.population.generation();
        let f1_count = self.model.demography.gene_flow_count(year);
        if f1_count > 0 {
            debug!("year {year}: forming {f1_count} F1 hybrids");
        }

        let parents = self.population.individuals();
        let (f1_slots, wild_slots) = self.offspring.individuals_mut().split_at_mut(f1_count);

        for child in f1_slots {
            self.mating.geneflow_into(parents, &mut self.rng, child);
        }
        for child in wild_slots {
            self.mating.reproduce_into(parents, &mut self.rng, child);
        }

        std::mem::swap(&mut self.population, &mut self.offspring);
        self.population.set_generation(year + 1);
    }

    /// Run the remaining configured generations.
    pub fn run(&mut self) -> &Population {
        while !self.is_finished() {
            self.step();
        }
        &self.population
    }

    /// Run for a specific number of generations, ignoring the configured
    /// total. Years past the schedule have no gene flow.
    pub fn run_for(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }
}

/// Run one replicate to completion and return its final population.
pub fn run_replicate(model: ModelConfig, seed: u64) -> Result<Population, ConfigError> {
    let mut sim = Simulation::new(model, Some(seed))?;
    sim.run();
    Ok(sim.into_population())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Allele;
    use crate::simulation::{DemographyConfig, GenomeStructure};
    use std::collections::BTreeSet;

    fn model(
        pop: usize,
        groups: usize,
        loci: usize,
        years: usize,
        flow: &[usize],
        rate: f64,
    ) -> ModelConfig {
        ModelConfig::new(
            GenomeStructure::new(groups, loci),
            DemographyConfig {
                population_size: pop,
                years,
                gene_flow_years: flow.iter().copied().collect::<BTreeSet<_>>(),
                f1_rate: rate,
            },
        )
    }

    #[test]
    fn test_simulation_new() {
        let sim = Simulation::new(model(10, 2, 5, 3, &[0], 0.2), Some(42)).unwrap();
        assert_eq!(sim.population().size(), 10);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.population().crop_count(), 0);
    }

    #[test]
    fn test_simulation_rejects_invalid_model() {
        let err = Simulation::new(model(10, 2, 5, 3, &[3], 0.2), Some(1)).unwrap_err();
        assert_eq!(err.parameter, "gene_flow_years");

        let err = Simulation::new(model(0, 2, 5, 3, &[0], 0.2), Some(1)).unwrap_err();
        assert_eq!(err.parameter, "population_size");
    }

    #[test]
    fn test_simulation_step() {
        let mut sim = Simulation::new(model(10, 2, 5, 3, &[0], 0.2), Some(42)).unwrap();
        sim.step();
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.population().size(), 10);
    }

    #[test]
    fn test_gene_flow_offspring_come_first() {
        let mut sim = Simulation::new(model(10, 2, 5, 3, &[0], 0.2), Some(42)).unwrap();
        sim.step();

        let individuals = sim.population().individuals();
        for f1 in &individuals[..2] {
            assert!(f1.haplotype_b().groups().iter().all(|g| g.is_uniform(Allele::Crop)));
        }
        for wild in &individuals[2..] {
            assert_eq!(wild.crop_count(), 0);
        }
    }

    #[test]
    fn test_full_f1_generation_has_half_frequency() {
        let mut sim = Simulation::new(model(20, 3, 10, 5, &[0], 1.0), Some(9)).unwrap();
        sim.step();

        for ind in sim.population().individuals() {
            for group in 0..3 {
                for locus in 0..10 {
                    assert_eq!(ind.dosage(group, locus), Some(1));
                }
            }
        }
    }

    #[test]
    fn test_closed_population_stays_wild() {
        let mut sim = Simulation::new(model(15, 3, 8, 10, &[], 0.5), Some(5)).unwrap();
        let pop = sim.run();
        assert_eq!(pop.generation(), 10);
        assert_eq!(pop.crop_count(), 0);
    }

    #[test]
    fn test_zero_rate_means_no_gene_flow() {
        let mut sim = Simulation::new(model(15, 2, 8, 6, &[0, 2], 0.0), Some(5)).unwrap();
        assert_eq!(sim.run().crop_count(), 0);
    }

    #[test]
    fn test_run_is_idempotent_after_finish() {
        let mut sim = Simulation::new(model(5, 1, 4, 3, &[0], 0.2), Some(3)).unwrap();
        sim.run();
        let snapshot = sim.population().clone();
        sim.run();
        assert_eq!(sim.population(), &snapshot);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_run_for() {
        let mut sim = Simulation::new(model(5, 1, 4, 3, &[0], 0.2), Some(3)).unwrap();
        sim.run_for(5);
        assert_eq!(sim.generation(), 5);
    }

    #[test]
    fn test_run_replicate_reproducible() {
        let m = model(10, 2, 5, 3, &[0], 0.2);
        let a = run_replicate(m.clone(), 123).unwrap();
        let b = run_replicate(m, 123).unwrap();
        assert_eq!(a, b);
    }
}
