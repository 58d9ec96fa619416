//! Simulation engine and population management.
//!
//! This module provides the core generation loop, replicate management and
//! the configuration that drives them.

//! Re-exports
//!
//! - `Simulation`: the engine that runs one replicate year by year.
//! - `Population`: in-memory container for the individuals of one generation.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation` instances.
//! - `ReplicateRunner`: runs many independent replicates of one model in parallel.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod population;
pub mod replicates;

pub use builder::SimulationBuilder;
pub use configs::{
    Configuration, DemographyConfig, DosageDivisor, ExecutionConfig, GenomeStructure,
    ModelConfig, SampleSelection, SamplingConfig,
};
pub use engine::{Simulation, run_replicate};
pub use population::Population;
pub use replicates::{ReplicateRunner, draw_seeds, par_map_seeded};
