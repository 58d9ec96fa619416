use anyhow::{Context, Result};
use cropwild_analysis::FrequencyEstimator;
use cropwild_analysis::analysis::utils::mean;
use log::info;
use std::slice;

use crate::args::LgFreqsArgs;
use crate::experiment::Experiment;
use crate::printing::{print_header, print_parameters};
use crate::sink::{AtomicSink, write_group_frequencies};

/// Per-linkage-group crop frequency of each replicate of one trial.
pub fn lg_freqs(args: &LgFreqsArgs) -> Result<()> {
    let config = args.config.load()?;
    let mut experiment = Experiment::new(config)?;

    print_header("Linkage-group frequencies");
    print_parameters(experiment.config(), experiment.seed());

    let replicates = experiment.config().execution.replicates_per_trial;
    let estimator = FrequencyEstimator::from_config(experiment.config());
    let populations = experiment.run_replicates(replicates);

    let mut sink = AtomicSink::create(&args.output)?;
    for (replicate, population) in populations.iter().enumerate() {
        let freqs = estimator.group_frequencies(slice::from_ref(population))?;
        info!("replicate {replicate}: mean group frequency {}", mean(&freqs));
        write_group_frequencies(&mut sink, replicate, &freqs)
            .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    }
    sink.commit()?;

    println!(
        "✓ Wrote {} rows to {}",
        replicates * experiment.config().genome.linkage_groups,
        args.output.display()
    );
    Ok(())
}
