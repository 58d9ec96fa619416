//! # Simulation Crate
//!
//! The `sim` crate provides the core logic for the crop-to-wild gene-flow
//! simulation. It includes modules for defining biallelic genomes, managing
//! populations, forming offspring through single-crossover meiosis, and
//! running independent replicates of the yearly generation loop.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod simulation;

pub use base::{Allele, AlleleSequence};
