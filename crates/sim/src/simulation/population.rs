//! Population management.
//!
//! A `Population` is a fixed-size, ordered collection of individuals for one
//! discrete generation. Order matters: frequency estimates sample from the
//! front, and the engine places F1 offspring first.

use crate::genome::Individual;
use crate::simulation::{GenomeStructure, SampleSelection};

/// A population of diploid individuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    /// The individuals in this population
    individuals: Vec<Individual>,
    /// Generation counter
    generation: usize,
}

impl Population {
    /// Create a new population from individuals.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Create a population of `size` all-wild individuals with the given
    /// genome geometry.
    pub fn wild(genome: GenomeStructure, size: usize) -> Self {
        Self::new(
            (0..size)
                .map(|_| Individual::wild(genome.linkage_groups, genome.loci_per_group))
                .collect(),
        )
    }

    /// Get the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Get the number of individuals in the population.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get all individuals as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get mutable access to individuals.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// The individuals selected by `selection`, in population order.
    pub fn sample(&self, selection: SampleSelection) -> &[Individual] {
        &self.individuals[..selection.count(self.size())]
    }

    /// Total crop alleles across the whole population.
    pub fn crop_count(&self) -> usize {
        self.individuals.iter().map(Individual::crop_count).sum()
    }
}
