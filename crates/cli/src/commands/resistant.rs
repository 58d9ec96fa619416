use anyhow::{Result, anyhow};
use cropwild_analysis::{EmpiricalDistribution, FrequencyEstimator, RegionAccumulator};
use log::info;

use crate::args::TrialArgs;
use crate::experiment::Experiment;
use crate::printing::{print_header, print_interval, print_parameters};
use crate::sink::save_trial_rows;

/// Null distribution of how many regions introgression-resistant loci are
/// shared across.
pub fn resistant(args: &TrialArgs) -> Result<()> {
    let config = args.config.load()?;
    let mut experiment = Experiment::new(config)?;

    print_header("Introgression-resistant loci across regions");
    print_parameters(experiment.config(), experiment.seed());

    let estimator = FrequencyEstimator::from_config(experiment.config());
    let layout = experiment.config().sampling.regions.clone();
    let threshold = experiment.config().sampling.resistance_threshold;
    let replicates = experiment.config().execution.replicates_per_trial;
    let trials = experiment.config().execution.trials;
    let shared: Vec<usize> = (2..=layout.len()).collect();

    let rows = experiment.run_trials(trials, !args.no_progress, |runner, index, rng| {
        let mut accumulator = RegionAccumulator::new(estimator, &layout);
        for (replicate, population) in runner.run_batch(replicates, rng).iter().enumerate() {
            accumulator.add_replicate(replicate, population)?;
        }

        let table = accumulator.classify(threshold)?;
        if index == 0 {
            info!("trial 0: {} resistant loci", table.resistant_loci());
        }
        shared
            .iter()
            .map(|&k| {
                table
                    .share_in_exactly(k)
                    .ok_or_else(|| anyhow!("no locus is below {threshold} in any region"))
            })
            .collect::<Result<Vec<f64>>>()
    })?;

    if let Some(path) = &args.output {
        let header: Vec<String> = shared.iter().map(|k| format!("share_in_{k}")).collect();
        save_trial_rows(path, &header, &rows)?;
    }

    println!(
        "📊 Results over {trials} trials, regions {:?}, threshold {threshold}",
        layout
    );
    for (column, k) in shared.iter().enumerate() {
        let shares = EmpiricalDistribution::new(rows.iter().map(|r| r[column]).collect())?;
        print_interval(&format!("Share resistant in exactly {k} regions"), &shares);
    }
    Ok(())
}
