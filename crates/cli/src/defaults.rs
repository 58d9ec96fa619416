//! Shared default values for the command-line surface.
//! Simulation defaults live in `Configuration::default()`; these only cover
//! file names and reporting.

pub const CONFIG_FILE: &str = "cropwild.json";
pub const GENOTYPE_PREFIX: &str = "genotypes_";
pub const LG_FREQS_OUTPUT: &str = "lg_freqs.csv";

/// Two-sided 95% interval over trial statistics
pub const LOWER_QUANTILE: f64 = 0.025;
pub const UPPER_QUANTILE: f64 = 0.975;
/// One-sided bound over the loci of a single replicate
pub const LOCUS_QUANTILE: f64 = 0.95;

/// Without a progress bar, log every this many completed trials.
pub const LOG_EVERY: usize = 10;

pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}";
