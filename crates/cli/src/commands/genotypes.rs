use anyhow::{Context, Result};
use cropwild_analysis::analysis::statistics::count_below;
use cropwild_analysis::{EmpiricalDistribution, FrequencyEstimator};
use std::path::PathBuf;
use std::slice;

use crate::args::GenotypesArgs;
use crate::defaults::LOCUS_QUANTILE;
use crate::experiment::Experiment;
use crate::printing::{print_header, print_parameters};
use crate::sink::{AtomicSink, write_dosage_rows};

struct ReplicateSummary {
    path: PathBuf,
    upper_bound: f64,
    resistant: usize,
}

/// Write the dosage matrix of every replicate, for PCA-based outlier scans.
pub fn genotypes(args: &GenotypesArgs) -> Result<()> {
    let config = args.config.load()?;
    let mut experiment = Experiment::new(config)?;

    print_header("Genotype matrices");
    print_parameters(experiment.config(), experiment.seed());

    let estimator = FrequencyEstimator::from_config(experiment.config());
    let threshold = experiment.config().sampling.resistance_threshold;
    let total_loci = experiment.config().genome.total_loci();
    let replicates = experiment.config().execution.trials;

    // Each replicate owns its own file, so writes run inside the parallel section.
    let summaries = experiment.run_trials(replicates, !args.no_progress, |runner, index, rng| {
        let population = runner.run_with(rng.clone());

        let path = PathBuf::from(format!("{}{index}.txt", args.prefix));
        let mut sink = AtomicSink::create(&path)?;
        write_dosage_rows(&mut sink, &estimator.dosage_rows(&population))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        sink.commit()?;

        let freqs = estimator.locus_frequencies(slice::from_ref(&population))?;
        let resistant = count_below(&freqs, threshold);
        let upper_bound = EmpiricalDistribution::new(freqs)?.quantile(LOCUS_QUANTILE);
        Ok(ReplicateSummary {
            path,
            upper_bound,
            resistant,
        })
    })?;

    println!("📊 Per-replicate crop frequencies");
    for (index, summary) in summaries.iter().enumerate() {
        println!(
            "  • Replicate {index}: 95% upper bound {}, resistant loci {} ({:.4}) → {}",
            summary.upper_bound,
            summary.resistant,
            summary.resistant as f64 / total_loci as f64,
            summary.path.display()
        );
    }
    Ok(())
}
