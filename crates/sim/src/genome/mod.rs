//! Genome structures for representing homologs, haplotypes, and individuals.

mod haplotype;
mod individual;

pub use haplotype::{Gamete, Haplotype};
pub use individual::Individual;
