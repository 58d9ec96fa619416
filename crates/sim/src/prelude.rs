//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types in the cropwild library.
//!
//! # Example
//!
//! ```
//! use cropwild_sim::prelude::*;
//!
//! let seq: AlleleSequence = "0011".parse().unwrap();
//! assert_eq!(seq.crop_count(), 2);
//! ```

pub use crate::base::{Allele, AlleleSequence};
pub use crate::errors::{self, BuilderError, ConfigError};
pub use crate::evolution::{MatingEngine, RecombinationModel};
pub use crate::genome::{Gamete, Haplotype, Individual};
pub use crate::simulation::{
    Configuration, GenomeStructure, ModelConfig, Population, ReplicateRunner, Simulation,
    SimulationBuilder,
};
