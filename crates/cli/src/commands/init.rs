use anyhow::{Context, Result, bail};
use cropwild_sim::simulation::Configuration;
use std::io::Write;

use crate::args::InitArgs;
use crate::sink::AtomicSink;

pub fn init_config(args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let config = build_config(args)?;
    let json = config
        .to_json_string()
        .context("Failed to serialize configuration")?;

    let mut sink = AtomicSink::create(&args.output)?;
    writeln!(sink, "{json}")
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    sink.commit()?;

    println!("✓ Configuration written to {}", args.output.display());
    println!(
        "  Population size: {}, years: {}, trials: {}",
        config.demography.population_size, config.demography.years, config.execution.trials
    );
    println!(
        "\n💡 Run an experiment with 'cropwild anova --config {}'",
        args.output.display()
    );
    Ok(())
}

fn build_config(args: &InitArgs) -> Result<Configuration> {
    let mut config = Configuration::default();
    if let Some(n) = args.population_size {
        config.demography.population_size = n;
    }
    if let Some(years) = args.years {
        config.demography.years = years;
    }
    if let Some(gene_flow_years) = &args.gene_flow_years {
        config.demography.gene_flow_years = gene_flow_years.iter().copied().collect();
    }
    if let Some(rate) = args.f1_rate {
        config.demography.f1_rate = rate;
    }
    if let Some(trials) = args.trials {
        config.execution.trials = trials;
    }
    config.execution.seed = args.seed;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
