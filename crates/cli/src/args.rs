use anyhow::{Context, Result};
use clap::Args;
use cropwild_sim::simulation::Configuration;
use std::path::PathBuf;

use crate::defaults;

/// Options shared by every experiment.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// JSON configuration file (defaults are used if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the master random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of Monte Carlo trials
    #[arg(long)]
    pub trials: Option<usize>,
}

impl ConfigArgs {
    /// Load the configuration, apply command-line overrides and validate.
    pub fn load(&self) -> Result<Configuration> {
        let mut config = match &self.config {
            Some(path) => Configuration::from_json_file(path)
                .with_context(|| format!("Failed to read configuration '{}'", path.display()))?,
            None => Configuration::default(),
        };
        if let Some(seed) = self.seed {
            config.execution.seed = Some(seed);
        }
        if let Some(trials) = self.trials {
            config.execution.trials = trials;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Options for experiments that summarize many trials.
#[derive(Args, Debug, Clone)]
pub struct TrialArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write one CSV row of statistics per trial to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenotypesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output path prefix; replicate `i` is written to `<prefix><i>.txt`
    #[arg(short, long, default_value = defaults::GENOTYPE_PREFIX)]
    pub prefix: String,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LgFreqsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output CSV file (`replicate,linkage_group,frequency`)
    #[arg(short, long, default_value = defaults::LG_FREQS_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Configuration file to write
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,

    /// Population size
    #[arg(short = 'n', long)]
    pub population_size: Option<usize>,

    /// Number of years (generations) to simulate
    #[arg(short = 'y', long)]
    pub years: Option<usize>,

    /// Generations with crop gene flow (comma-separated, e.g. "0,4")
    #[arg(long, value_delimiter = ',')]
    pub gene_flow_years: Option<Vec<usize>>,

    /// Fraction of the population formed as F1 hybrids in gene-flow years
    #[arg(long)]
    pub f1_rate: Option<f64>,

    /// Number of Monte Carlo trials
    #[arg(long)]
    pub trials: Option<usize>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,
}
