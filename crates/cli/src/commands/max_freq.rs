use anyhow::{Context, Result};
use cropwild_analysis::{EmpiricalDistribution, FrequencyEstimator};

use crate::args::TrialArgs;
use crate::defaults::UPPER_QUANTILE;
use crate::experiment::Experiment;
use crate::printing::{print_header, print_parameters};
use crate::sink::save_trial_rows;

/// Null distribution of the largest per-locus crop frequency in a pool of
/// independent populations.
pub fn max_freq(args: &TrialArgs) -> Result<()> {
    let config = args.config.load()?;
    let mut experiment = Experiment::new(config)?;

    print_header("Maximum pooled crop frequency");
    print_parameters(experiment.config(), experiment.seed());

    let estimator = FrequencyEstimator::from_config(experiment.config());
    let pooled = experiment.config().sampling.pooled_populations;
    let tail_rank = experiment.config().sampling.tail_rank;
    let trials = experiment.config().execution.trials;

    let rows = experiment.run_trials(trials, !args.no_progress, |runner, _, rng| {
        let populations = runner.run_batch(pooled, rng);
        let freqs = EmpiricalDistribution::new(estimator.locus_frequencies(&populations)?)?;
        let tail = freqs
            .rank_from_top(tail_rank)
            .with_context(|| format!("rank {tail_rank} exceeds {} loci", freqs.len()))?;
        Ok(vec![freqs.max(), tail])
    })?;

    if let Some(path) = &args.output {
        save_trial_rows(
            path,
            &["max_frequency".into(), format!("rank_{tail_rank}_frequency")],
            &rows,
        )?;
    }

    let maxima = EmpiricalDistribution::new(rows.iter().map(|r| r[0]).collect())?;
    let tails = EmpiricalDistribution::new(rows.iter().map(|r| r[1]).collect())?;

    println!("📊 Results over {trials} trials of {pooled} pooled populations");
    println!(
        "  • Upper 95% bound for maximum frequency: {}",
        maxima.quantile(UPPER_QUANTILE)
    );
    println!(
        "  • Upper 95% bound for rank-{tail_rank} frequency: {}",
        tails.quantile(UPPER_QUANTILE)
    );
    println!("  • Maximum frequency observed: {}", maxima.max());
    Ok(())
}
