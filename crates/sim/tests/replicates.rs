//! Integration tests for whole replicate runs.

use cropwild_sim::simulation::{
    Configuration, DemographyConfig, GenomeStructure, ModelConfig, ReplicateRunner, Simulation,
    SimulationBuilder,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::BTreeSet;

fn model(flow: &[usize], f1_rate: f64, years: usize) -> ModelConfig {
    ModelConfig::new(
        GenomeStructure::new(2, 5),
        DemographyConfig {
            population_size: 10,
            years,
            gene_flow_years: flow.iter().copied().collect::<BTreeSet<_>>(),
            f1_rate,
        },
    )
}

#[test]
fn test_same_seed_same_population() {
    let mut a = Simulation::new(model(&[0], 0.2, 3), Some(2024)).unwrap();
    let mut b = Simulation::new(model(&[0], 0.2, 3), Some(2024)).unwrap();

    assert_eq!(a.run(), b.run());
}

#[test]
fn test_closed_system_stays_wild() {
    let runner = ReplicateRunner::new(model(&[], 0.5, 20)).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);

    for pop in runner.run_batch(5, &mut rng) {
        assert_eq!(pop.crop_count(), 0);
    }
}

#[test]
fn test_all_f1_generation_is_half_crop() {
    let mut sim = Simulation::new(model(&[0], 1.0, 3), Some(3)).unwrap();
    sim.step();

    let pop = sim.population();
    let loci = 2 * 5;
    assert_eq!(pop.crop_count(), pop.size() * loci);
    for ind in pop.individuals() {
        for group in 0..2 {
            for locus in 0..5 {
                assert_eq!(ind.dosage(group, locus), Some(1));
            }
        }
    }
}

#[test]
fn test_crop_alleles_persist_without_selection() {
    // With 5 of 100 F1s in two years, losing every crop allele in a few
    // generations is vanishingly unlikely.
    let mut sim = SimulationBuilder::new()
        .population_size(100)
        .years(6)
        .genome(3, 20)
        .gene_flow([0, 4], 0.05)
        .seed(17)
        .build()
        .unwrap();

    let pop = sim.run();
    assert!(pop.crop_count() > 0);
    assert!(pop.individuals().iter().all(|ind| ind.linkage_groups() == 3));
}

#[test]
fn test_default_configuration_runs() {
    let mut config = Configuration::default();
    config.genome = GenomeStructure::new(2, 10);
    config.demography.years = 5;

    let runner = ReplicateRunner::new(config.model()).unwrap();
    let pop = runner.run_one(5);
    assert_eq!(pop.size(), 100);
    assert_eq!(pop.generation(), 5);
    assert!(
        pop.individuals()
            .iter()
            .all(|ind| ind.check_geometry(2, 10).is_ok())
    );
    assert!(pop.crop_count() <= pop.size() * 2 * 20);
}
