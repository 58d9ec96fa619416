use anyhow::{Result, bail};
use cropwild_analysis::{EmpiricalDistribution, FrequencyEstimator, max_difference, one_way_anova};
use std::slice;

use crate::args::TrialArgs;
use crate::experiment::Experiment;
use crate::printing::{print_header, print_interval, print_parameters};
use crate::sink::save_trial_rows;

/// Null distribution of the between-linkage-group F-statistic and of the
/// max-difference between linkage-group means.
pub fn anova(args: &TrialArgs) -> Result<()> {
    let config = args.config.load()?;
    if config.genome.linkage_groups < 2 {
        bail!("ANOVA needs at least 2 linkage groups");
    }
    if config.execution.replicates_per_trial < 2 {
        bail!("ANOVA needs at least 2 replicates per trial");
    }
    let mut experiment = Experiment::new(config)?;

    print_header("ANOVA across linkage groups");
    print_parameters(experiment.config(), experiment.seed());

    let estimator = FrequencyEstimator::from_config(experiment.config());
    let groups = experiment.config().genome.linkage_groups;
    let replicates = experiment.config().execution.replicates_per_trial;
    let trials = experiment.config().execution.trials;

    let rows = experiment.run_trials(trials, !args.no_progress, |runner, _, rng| {
        let mut observations = vec![Vec::with_capacity(replicates); groups];
        for population in runner.run_batch(replicates, rng) {
            let freqs = estimator.group_frequencies(slice::from_ref(&population))?;
            for (group, freq) in freqs.into_iter().enumerate() {
                observations[group].push(freq);
            }
        }
        let result = one_way_anova(&observations)?;
        let diff = max_difference(&result.group_means)?;
        Ok(vec![result.f_statistic, diff])
    })?;

    if let Some(path) = &args.output {
        save_trial_rows(path, &["f_statistic".into(), "max_difference".into()], &rows)?;
    }

    let f = EmpiricalDistribution::new(rows.iter().map(|r| r[0]).collect())?;
    let diff = EmpiricalDistribution::new(rows.iter().map(|r| r[1]).collect())?;

    println!("📊 Results over {trials} trials");
    print_interval("F-statistic", &f);
    print_interval("Max difference", &diff);
    Ok(())
}
