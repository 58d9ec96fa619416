//! Offspring formation.
//!
//! Both operations draw parents uniformly **with replacement** from the
//! current generation, so the same individual may be drawn twice by
//! `reproduce` (selfing).

use crate::base::Allele;
use crate::evolution::RecombinationModel;
use crate::genome::{Haplotype, Individual};
use rand::Rng;

/// Builds one offspring at a time from a parental generation.
#[derive(Debug, Clone, Copy)]
pub struct MatingEngine {
    recombination: RecombinationModel,
}

impl MatingEngine {
    pub fn new(recombination: RecombinationModel) -> Self {
        Self { recombination }
    }

    pub fn recombination(&self) -> &RecombinationModel {
        &self.recombination
    }

    /// Within-population mating: two independently drawn parents each
    /// contribute one gamete.
    ///
    /// # Panics
    /// Panics if `parents` is empty.
    pub fn reproduce<R: Rng + ?Sized>(&self, parents: &[Individual], rng: &mut R) -> Individual {
        let mut child = parents[0].clone();
        self.reproduce_into(parents, rng, &mut child);
        child
    }

    /// Same as [`MatingEngine::reproduce`], writing into an existing
    /// offspring slot of matching geometry.
    pub fn reproduce_into<R: Rng + ?Sized>(
        &self,
        parents: &[Individual],
        rng: &mut R,
        child: &mut Individual,
    ) {
        let first = rng.random_range(0..parents.len());
        let second = rng.random_range(0..parents.len());

        let (side_a, side_b) = child.haplotypes_mut();
        self.recombination.recombine_into(&parents[first], rng, side_a);
        self.recombination.recombine_into(&parents[second], rng, side_b);
    }

    /// Crop-to-wild gene flow: one wild parent (the ovule side) is fertilised
    /// by pure crop pollen, giving an F1 hybrid.
    ///
    /// # Panics
    /// Panics if `parents` is empty.
    pub fn geneflow<R: Rng + ?Sized>(&self, parents: &[Individual], rng: &mut R) -> Individual {
        let mother = &parents[rng.random_range(0..parents.len())];
        let ovule = self.recombination.recombine(mother, rng);
        let pollen = Haplotype::crop(ovule.len(), self.recombination.loci_per_group());
        Individual::new(ovule, pollen)
    }

    /// Same as [`MatingEngine::geneflow`], writing into an existing offspring
    /// slot of matching geometry.
    pub fn geneflow_into<R: Rng + ?Sized>(
        &self,
        parents: &[Individual],
        rng: &mut R,
        child: &mut Individual,
    ) {
        let mother = rng.random_range(0..parents.len());
        let (side_a, side_b) = child.haplotypes_mut();
        self.recombination.recombine_into(&parents[mother], rng, side_a);
        side_b.fill(Allele::Crop);
    }
}
