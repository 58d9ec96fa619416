//! Evolution module providing meiosis and mating.
//!
//! This module implements the two stochastic processes of the model:
//! - **Recombination**: one obligate crossover per linkage group and
//!   Mendelian choice among the four chromatids of the tetrad
//! - **Mating**: within-population reproduction (selfing permitted) and
//!   crop-to-wild gene flow producing F1 hybrids

pub mod mating;
pub mod recombination;

pub use mating::MatingEngine;
pub use recombination::{Chromatid, MeiosisEvent, RecombinationModel};
