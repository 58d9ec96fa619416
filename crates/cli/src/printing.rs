use cropwild_analysis::EmpiricalDistribution;
use cropwild_sim::simulation::{Configuration, DosageDivisor, SampleSelection};

use crate::defaults::{LOWER_QUANTILE, UPPER_QUANTILE};

pub fn print_header(title: &str) {
    println!("🌾 Cropwild - {title}");
    println!("============================================\n");
}

pub fn print_parameters(config: &Configuration, seed: u64) {
    let execution = &config.execution;
    let genome = &config.genome;
    let demography = &config.demography;
    let sampling = &config.sampling;

    println!("📋 Experiment");
    println!("  • Trials: {} [--trials]", execution.trials);
    println!("  • Replicates per Trial: {}", execution.replicates_per_trial);
    println!("  • Master Seed: {seed} [--seed]");

    println!("\n🧬 Genome Structure");
    println!("  • Linkage Groups: {}", genome.linkage_groups);
    println!("  • Loci per Group: {}", genome.loci_per_group);
    println!("  • Ploidy: Diploid (2 homologs)");

    println!("\n🌱 Demography");
    println!("  • Population Size: {}", demography.population_size);
    println!("  • Years: {}", demography.years);
    let years: Vec<String> = demography
        .gene_flow_years
        .iter()
        .map(|y| y.to_string())
        .collect();
    if years.is_empty() {
        println!("  • Gene Flow: None (closed population)");
    } else {
        println!(
            "  • Gene Flow Years: {} (F1 rate {})",
            years.join(", "),
            demography.f1_rate
        );
    }

    println!("\n🔬 Sampling");
    match sampling.selection {
        SampleSelection::Front(n) => println!("  • Sample: first {n} individuals"),
        SampleSelection::All => println!("  • Sample: whole population"),
    }
    match sampling.divisor {
        DosageDivisor::Sampled => println!("  • Divisor: sampled individuals × 2"),
        DosageDivisor::Census => println!("  • Divisor: population size × 2"),
    }
    println!();
}

/// Print the two-sided 95% interval and maximum of a trial statistic.
pub fn print_interval(name: &str, dist: &EmpiricalDistribution) {
    println!(
        "  • {name}: 95% interval [{}, {}], max {}",
        dist.quantile(LOWER_QUANTILE),
        dist.quantile(UPPER_QUANTILE),
        dist.max()
    );
}
