mod args;
mod commands;
pub mod defaults;
mod experiment;
mod printing;
mod sink;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use args::{ConfigArgs, GenotypesArgs, InitArgs, LgFreqsArgs, TrialArgs};
use commands::{anova, genotypes, init, lg_freqs, max_freq, resistant, show_config};

/// Cropwild: null models for crop-to-wild introgression
///
/// Simulates a finite wild population receiving pulses of crop pollen and
/// derives null distributions for genomic introgression patterns.
#[derive(Parser, Debug)]
#[command(name = "cropwild")]
#[command(
    author,
    version,
    about = "Simulates crop-to-wild gene flow to build null distributions",
    long_about = None
)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a configuration file with default parameters.
    Init(InitArgs),

    /// Print the effective configuration as JSON.
    ShowConfig(ConfigArgs),

    /// Write one genotype dosage matrix per replicate.
    ///
    /// Runs `trials` replicates. Each file has one line per locus and one
    /// dosage (0, 1 or 2) per sampled individual.
    Genotypes(GenotypesArgs),

    /// Write per-linkage-group crop frequencies of one trial's replicates.
    LgFreqs(LgFreqsArgs),

    /// F-statistic and max-difference across linkage groups.
    Anova(TrialArgs),

    /// Maximum per-locus crop frequency in pooled populations.
    MaxFreq(TrialArgs),

    /// Loci resistant to introgression in several regions.
    Resistant(TrialArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init(args) => init::init_config(&args)?,
        Commands::ShowConfig(args) => show_config::show_config(&args)?,
        Commands::Genotypes(args) => genotypes::genotypes(&args)?,
        Commands::LgFreqs(args) => lg_freqs::lg_freqs(&args)?,
        Commands::Anova(args) => anova::anova(&args)?,
        Commands::MaxFreq(args) => max_freq::max_freq(&args)?,
        Commands::Resistant(args) => resistant::resistant(&args)?,
    }

    Ok(())
}
