//! Trial driver shared by the experiment subcommands.

use anyhow::{Context, Result};
use cropwild_sim::simulation::{
    Configuration, Population, ReplicateRunner, draw_seeds, par_map_seeded,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::defaults::{LOG_EVERY, PROGRESS_TEMPLATE};

/// A validated configuration with its replicate runner and master RNG.
pub struct Experiment {
    config: Configuration,
    runner: ReplicateRunner,
    seed: u64,
    master: Xoshiro256PlusPlus,
}

impl Experiment {
    pub fn new(config: Configuration) -> Result<Self> {
        let runner = ReplicateRunner::new(config.model()).context("Invalid model")?;
        let seed = config
            .execution
            .seed
            .unwrap_or_else(|| rand::rng().random());
        info!("master seed {seed}");

        Ok(Self {
            config,
            runner,
            seed,
            master: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The master seed actually used, drawn from the OS if none was configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run `count` replicates directly off the master generator.
    pub fn run_replicates(&mut self, count: usize) -> Vec<Population> {
        self.runner.run_batch(count, &mut self.master)
    }

    /// Run `count` trials in parallel, one seeded generator per trial.
    ///
    /// Results come back in trial order. Any failed trial fails the whole
    /// run.
    pub fn run_trials<T, F>(
        &mut self,
        count: usize,
        show_progress: bool,
        trial: F,
    ) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&ReplicateRunner, usize, &mut Xoshiro256PlusPlus) -> Result<T> + Sync + Send,
    {
        let seeds = draw_seeds(&mut self.master, count);
        let runner = &self.runner;

        let pb = if show_progress {
            let pb = ProgressBar::new(count as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        info!("running {count} trials");
        let results = par_map_seeded(&seeds, |index, rng| {
            let result =
                trial(runner, index, rng).with_context(|| format!("Trial {index} failed"));
            match &pb {
                Some(pb) => pb.inc(1),
                None if index % LOG_EVERY == 0 => info!("trial {index} done"),
                None => {}
            }
            result
        });

        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }

        results.into_iter().collect()
    }
}
