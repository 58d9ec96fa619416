//! Simulation parameters and configuration.
//!
//! Every size, schedule and sampling policy of an experiment lives in one
//! [`Configuration`], which can be written to and read from JSON to fully
//! reproduce a run. Validation happens once, before any simulation work.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Configuration {
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub genome: GenomeStructure,
    #[serde(default)]
    pub demography: DemographyConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Monte Carlo repetition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of outer Monte Carlo trials
    pub trials: usize,
    /// Independent replicates combined within one trial
    pub replicates_per_trial: usize,
    /// Optional master RNG seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            trials: 2000,
            replicates_per_trial: 22,
            seed: None,
        }
    }
}

/// Linkage-group geometry shared by every individual of every generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeStructure {
    /// Number of linkage groups (chromosomes) per individual
    pub linkage_groups: usize,
    /// SNP loci per linkage group
    pub loci_per_group: usize,
}

impl GenomeStructure {
    pub fn new(linkage_groups: usize, loci_per_group: usize) -> Self {
        Self {
            linkage_groups,
            loci_per_group,
        }
    }

    /// Total loci across all linkage groups.
    pub fn total_loci(&self) -> usize {
        self.linkage_groups * self.loci_per_group
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.linkage_groups == 0 {
            return Err(ConfigError::new("linkage_groups", "must be positive"));
        }
        if self.loci_per_group < 2 {
            return Err(ConfigError::new(
                "loci_per_group",
                format!(
                    "{} loci leaves no crossover point (need at least 2)",
                    self.loci_per_group
                ),
            ));
        }
        Ok(())
    }
}

impl Default for GenomeStructure {
    fn default() -> Self {
        Self::new(17, 100)
    }
}

/// Population size and the gene-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographyConfig {
    /// Number of diploid individuals, constant across generations
    pub population_size: usize,
    /// Number of discrete generations (years) simulated
    pub years: usize,
    /// Generation indices in which F1 hybrids are formed
    pub gene_flow_years: BTreeSet<usize>,
    /// Fraction of the next generation formed by gene flow in those years
    pub f1_rate: f64,
}

impl DemographyConfig {
    /// Number of F1 offspring formed when building generation `year + 1`.
    ///
    /// Truncates `f1_rate * population_size` toward zero.
    pub fn gene_flow_count(&self, year: usize) -> usize {
        if self.gene_flow_years.contains(&year) {
            (self.f1_rate * self.population_size as f64).floor() as usize
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::new("population_size", "must be positive"));
        }
        if self.years == 0 {
            return Err(ConfigError::new("years", "must be positive"));
        }
        if let Some(&year) = self.gene_flow_years.iter().find(|&&y| y >= self.years) {
            return Err(ConfigError::new(
                "gene_flow_years",
                format!("year {year} outside [0, {})", self.years),
            ));
        }
        if !(0.0..=1.0).contains(&self.f1_rate) {
            return Err(ConfigError::new(
                "f1_rate",
                format!("{} (must be between 0.0 and 1.0)", self.f1_rate),
            ));
        }
        Ok(())
    }
}

impl Default for DemographyConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            years: 25,
            gene_flow_years: BTreeSet::from([0, 4]),
            f1_rate: 0.05,
        }
    }
}

/// Which individuals of a population enter frequency estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSelection {
    /// The first `n` individuals in population order
    Front(usize),
    /// Every individual
    All,
}

impl SampleSelection {
    /// Number of individuals sampled from a population of `population_size`.
    pub fn count(&self, population_size: usize) -> usize {
        match *self {
            Self::Front(n) => n.min(population_size),
            Self::All => population_size,
        }
    }
}

impl Default for SampleSelection {
    fn default() -> Self {
        Self::Front(20)
    }
}

/// Denominator used to turn summed dosages into an allele frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DosageDivisor {
    /// Sampled individuals x populations x 2
    #[default]
    Sampled,
    /// Census population size x populations x 2, regardless of sample size
    Census,
}

/// Sampling and classification policy for the aggregation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub selection: SampleSelection,
    pub divisor: DosageDivisor,
    /// Replicates pooled into one frequency estimate by the max-frequency
    /// experiment
    pub pooled_populations: usize,
    /// Replicate counts of each region, in order
    pub regions: Vec<usize>,
    /// Frequency below which a locus counts as introgression-resistant
    pub resistance_threshold: f64,
    /// Rank from the top reported alongside the maximum pooled frequency
    pub tail_rank: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            selection: SampleSelection::default(),
            divisor: DosageDivisor::default(),
            pooled_populations: 7,
            regions: vec![8, 7, 7],
            resistance_threshold: 0.1,
            tail_rank: 20,
        }
    }
}

/// The part of a [`Configuration`] needed to run one replicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelConfig {
    pub genome: GenomeStructure,
    pub demography: DemographyConfig,
}

impl ModelConfig {
    pub fn new(genome: GenomeStructure, demography: DemographyConfig) -> Self {
        Self { genome, demography }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.genome.validate()?;
        self.demography.validate()
    }
}

impl Configuration {
    /// Replicate-level model parameters.
    pub fn model(&self) -> ModelConfig {
        ModelConfig::new(self.genome, self.demography.clone())
    }

    /// Number of individuals sampled from each population.
    pub fn sample_size(&self) -> usize {
        self.sampling
            .selection
            .count(self.demography.population_size)
    }

    /// Check every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.genome.validate()?;
        self.demography.validate()?;

        let exec = &self.execution;
        if exec.trials == 0 {
            return Err(ConfigError::new("trials", "must be positive"));
        }
        if exec.replicates_per_trial == 0 {
            return Err(ConfigError::new("replicates_per_trial", "must be positive"));
        }

        let sampling = &self.sampling;
        if let SampleSelection::Front(n) = sampling.selection {
            if n == 0 {
                return Err(ConfigError::new("sample_size", "must be positive"));
            }
            if n > self.demography.population_size {
                return Err(ConfigError::new(
                    "sample_size",
                    format!(
                        "{n} exceeds population size {}",
                        self.demography.population_size
                    ),
                ));
            }
        }
        if sampling.pooled_populations == 0 {
            return Err(ConfigError::new("pooled_populations", "must be positive"));
        }
        if sampling.regions.is_empty() || sampling.regions.contains(&0) {
            return Err(ConfigError::new(
                "regions",
                "need at least one region and every region needs a replicate",
            ));
        }
        let region_total: usize = sampling.regions.iter().sum();
        if region_total != exec.replicates_per_trial {
            return Err(ConfigError::new(
                "regions",
                format!(
                    "region sizes sum to {region_total} but replicates_per_trial is {}",
                    exec.replicates_per_trial
                ),
            ));
        }
        if !(sampling.resistance_threshold > 0.0 && sampling.resistance_threshold <= 1.0) {
            return Err(ConfigError::new(
                "resistance_threshold",
                format!("{} (must be in (0.0, 1.0])", sampling.resistance_threshold),
            ));
        }
        if sampling.tail_rank == 0 || sampling.tail_rank > self.genome.total_loci() {
            return Err(ConfigError::new(
                "tail_rank",
                format!(
                    "{} (must be in [1, {}])",
                    sampling.tail_rank,
                    self.genome.total_loci()
                ),
            ));
        }
        Ok(())
    }

    /// Read a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(io::Error::from)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
