//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and comprehensive validation.

pub use crate::errors::BuilderError;
use crate::simulation::{DemographyConfig, GenomeStructure, ModelConfig, Simulation};
use std::collections::BTreeSet;

/// Builder for constructing Simulation instances with a fluent API.
///
/// # Examples
///
/// ```
/// use cropwild_sim::simulation::SimulationBuilder;
///
/// // Simple closed population
/// let sim = SimulationBuilder::new()
///     .population_size(50)
///     .years(10)
///     .genome(4, 20)
///     .build()
///     .unwrap();
///
/// // With crop gene flow in the first and fifth year
/// let sim = SimulationBuilder::new()
///     .population_size(100)
///     .years(25)
///     .genome(17, 100)
///     .gene_flow([0, 4], 0.05)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    // Required parameters
    population_size: Option<usize>,
    years: Option<usize>,
    genome: Option<GenomeStructure>,

    // Gene flow (default: none)
    gene_flow_years: BTreeSet<usize>,
    f1_rate: f64,
    seed: Option<u64>, // Default: None (random)
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing model; every field is considered set.
    pub fn from_model(model: &ModelConfig) -> Self {
        Self {
            population_size: Some(model.demography.population_size),
            years: Some(model.demography.years),
            genome: Some(model.genome),
            gene_flow_years: model.demography.gene_flow_years.clone(),
            f1_rate: model.demography.f1_rate,
            seed: None,
        }
    }

    /// Set the population size (required).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the number of years to run (required).
    pub fn years(mut self, years: usize) -> Self {
        self.years = Some(years);
        self
    }

    /// Set the genome geometry (required).
    ///
    /// # Arguments
    /// * `linkage_groups` - Linkage groups per haplotype
    /// * `loci_per_group` - SNP loci per linkage group
    pub fn genome(mut self, linkage_groups: usize, loci_per_group: usize) -> Self {
        self.genome = Some(GenomeStructure::new(linkage_groups, loci_per_group));
        self
    }

    /// Form F1 hybrids in the listed years at `f1_rate` of the population.
    pub fn gene_flow(mut self, years: impl IntoIterator<Item = usize>, f1_rate: f64) -> Self {
        self.gene_flow_years = years.into_iter().collect();
        self.f1_rate = f1_rate;
        self
    }

    /// Set random seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The model described so far, without validation.
    pub fn model(&self) -> Result<ModelConfig, BuilderError> {
        let population_size = self
            .population_size
            .ok_or(BuilderError::MissingRequired("population_size"))?;
        let years = self.years.ok_or(BuilderError::MissingRequired("years"))?;
        let genome = self
            .genome
            .ok_or(BuilderError::MissingRequired("genome"))?;

        Ok(ModelConfig::new(
            genome,
            DemographyConfig {
                population_size,
                years,
                gene_flow_years: self.gene_flow_years.clone(),
                f1_rate: self.f1_rate,
            },
        ))
    }

    /// Build the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let model = self.model()?;
        Ok(Simulation::new(model, self.seed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_minimal() {
        let sim = SimulationBuilder::new()
            .population_size(10)
            .years(5)
            .genome(2, 10)
            .build()
            .unwrap();

        assert_eq!(sim.population().size(), 10);
        assert_eq!(sim.model().demography.years, 5);
        assert!(sim.model().demography.gene_flow_years.is_empty());
    }

    #[test]
    fn test_builder_with_gene_flow() {
        let sim = SimulationBuilder::new()
            .population_size(100)
            .years(25)
            .genome(3, 10)
            .gene_flow([0, 4], 0.05)
            .build()
            .unwrap();

        let demography = &sim.model().demography;
        assert_eq!(demography.gene_flow_count(0), 5);
        assert_eq!(demography.gene_flow_count(4), 5);
        assert_eq!(demography.gene_flow_count(1), 0);
    }

    #[test]
    fn test_builder_with_seed() {
        let build = || {
            SimulationBuilder::new()
                .population_size(10)
                .years(4)
                .genome(2, 6)
                .gene_flow([0], 0.5)
                .seed(42)
                .build()
                .unwrap()
        };

        let mut a = build();
        let mut b = build();
        assert_eq!(a.run(), b.run());
    }

    #[test]
    fn test_builder_missing_population_size() {
        let result = SimulationBuilder::new().years(5).genome(2, 10).build();

        match result.unwrap_err() {
            BuilderError::MissingRequired(param) => assert_eq!(param, "population_size"),
            other => panic!("Expected MissingRequired error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_missing_years() {
        let result = SimulationBuilder::new()
            .population_size(10)
            .genome(2, 10)
            .build();

        match result.unwrap_err() {
            BuilderError::MissingRequired(param) => assert_eq!(param, "years"),
            other => panic!("Expected MissingRequired error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_missing_genome() {
        let result = SimulationBuilder::new().population_size(10).years(5).build();
        assert!(matches!(
            result.unwrap_err(),
            BuilderError::MissingRequired("genome")
        ));
    }

    #[test]
    fn test_builder_invalid_f1_rate() {
        let result = SimulationBuilder::new()
            .population_size(10)
            .years(5)
            .genome(2, 10)
            .gene_flow([0], 1.5)
            .build();

        match result.unwrap_err() {
            BuilderError::InvalidParameter(err) => assert_eq!(err.parameter, "f1_rate"),
            other => panic!("Expected InvalidParameter error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_from_model() {
        let model = ModelConfig::default();
        let rebuilt = SimulationBuilder::from_model(&model).model().unwrap();
        assert_eq!(rebuilt, model);
    }
}
