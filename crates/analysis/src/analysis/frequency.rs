//! Crop-allele frequency estimation
//!
//! Frequencies are genotype-dosage estimates: the crop alleles carried by the
//! sampled individuals, divided by the number of allele copies those
//! individuals (or the whole census, see [`DosageDivisor`]) represent.
//!
//! Per-locus values are laid out densely in linkage-group-major order, so
//! locus `l` of group `g` lives at index `g * loci_per_group + l`.

use crate::StatsError;
use crate::analysis::statistics::ResistanceTable;
use cropwild_sim::genome::Individual;
use cropwild_sim::simulation::{
    Configuration, DosageDivisor, GenomeStructure, Population, SampleSelection,
};
use log::{debug, warn};
use rayon::prelude::*;

/// Dosage-based frequency estimator for one genome geometry and sampling
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEstimator {
    genome: GenomeStructure,
    selection: SampleSelection,
    divisor: DosageDivisor,
}

impl FrequencyEstimator {
    pub fn new(
        genome: GenomeStructure,
        selection: SampleSelection,
        divisor: DosageDivisor,
    ) -> Self {
        Self {
            genome,
            selection,
            divisor,
        }
    }

    /// Estimator using the configuration's genome and sampling policy.
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(
            config.genome,
            config.sampling.selection,
            config.sampling.divisor,
        )
    }

    pub fn genome(&self) -> GenomeStructure {
        self.genome
    }

    pub fn selection(&self) -> SampleSelection {
        self.selection
    }

    pub fn divisor(&self) -> DosageDivisor {
        self.divisor
    }

    /// Number of allele copies one population contributes to the denominator.
    pub fn allele_copies(&self, population: &Population) -> usize {
        let individuals = match self.divisor {
            DosageDivisor::Sampled => self.selection.count(population.size()),
            DosageDivisor::Census => population.size(),
        };
        individuals * 2
    }

    /// Add the crop dosage of every sampled individual of `population` into
    /// `counts` (one slot per locus).
    pub fn accumulate(
        &self,
        population: &Population,
        counts: &mut [u32],
    ) -> Result<(), StatsError> {
        let expected = self.genome.total_loci();
        if counts.len() != expected {
            return Err(StatsError::LocusCountMismatch {
                expected,
                found: counts.len(),
            });
        }

        self.add_population(population, counts);
        Ok(())
    }

    fn add_population(&self, population: &Population, counts: &mut [u32]) {
        let sample = population.sample(self.selection);
        counts
            .par_chunks_mut(self.genome.loci_per_group)
            .enumerate()
            .for_each(|(group, row)| {
                for individual in sample {
                    add_group_dosage(individual, group, row);
                }
            });
    }

    /// Crop dosage per locus summed over the samples of all `populations`.
    pub fn locus_counts(&self, populations: &[Population]) -> Vec<u32> {
        let mut counts = vec![0u32; self.genome.total_loci()];
        for population in populations {
            self.add_population(population, &mut counts);
        }
        counts
    }

    /// Per-locus crop frequency, pooling all `populations` into one estimate.
    pub fn locus_frequencies(&self, populations: &[Population]) -> Result<Vec<f64>, StatsError> {
        let copies: usize = populations.iter().map(|p| self.allele_copies(p)).sum();
        if copies == 0 {
            return Err(StatsError::EmptyInput);
        }
        Ok(self
            .locus_counts(populations)
            .into_iter()
            .map(|count| count as f64 / copies as f64)
            .collect())
    }

    /// Per-linkage-group crop frequency: dosages summed over every locus of
    /// the group before dividing.
    pub fn group_frequencies(&self, populations: &[Population]) -> Result<Vec<f64>, StatsError> {
        let copies: usize = populations.iter().map(|p| self.allele_copies(p)).sum();
        if copies == 0 {
            return Err(StatsError::EmptyInput);
        }
        let loci = self.genome.loci_per_group;
        let denominator = (copies * loci) as f64;

        Ok(self
            .locus_counts(populations)
            .chunks(loci)
            .map(|row| row.iter().map(|&c| c as u64).sum::<u64>() as f64 / denominator)
            .collect())
    }

    /// Dosage matrix of the sampled individuals: one row per locus in
    /// linkage-group-major order, one entry per individual in population
    /// order.
    pub fn dosage_rows(&self, population: &Population) -> Vec<Vec<u32>> {
        let sample = population.sample(self.selection);
        let mut rows = vec![Vec::with_capacity(sample.len()); self.genome.total_loci()];
        let loci = self.genome.loci_per_group;

        for individual in sample {
            let groups = individual
                .haplotype_a()
                .groups()
                .iter()
                .zip(individual.haplotype_b().groups());
            for (group, (a, b)) in groups.enumerate() {
                for (locus, (x, y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
                    rows[group * loci + locus].push(x.dosage() + y.dosage());
                }
            }
        }
        rows
    }
}

#[inline]
fn add_group_dosage(individual: &Individual, group: usize, row: &mut [u32]) {
    if let Some((a, b)) = individual.linkage_group(group) {
        for ((slot, x), y) in row.iter_mut().zip(a.as_slice()).zip(b.as_slice()) {
            *slot += x.dosage() + y.dosage();
        }
    }
}

/// Running per-locus crop counts for disjoint regions of replicates.
///
/// Replicates are assigned to regions in order: with a layout of `[8, 7, 7]`
/// replicates 0..8 form region 0, 8..15 region 1 and 15..22 region 2.
#[derive(Debug, Clone)]
pub struct RegionAccumulator {
    estimator: FrequencyEstimator,
    layout: Vec<usize>,
    counts: Vec<Vec<u32>>,
    copies: Vec<usize>,
}

impl RegionAccumulator {
    pub fn new(estimator: FrequencyEstimator, layout: &[usize]) -> Self {
        let total = estimator.genome().total_loci();
        Self {
            estimator,
            layout: layout.to_vec(),
            counts: vec![vec![0; total]; layout.len()],
            copies: vec![0; layout.len()],
        }
    }

    pub fn region_count(&self) -> usize {
        self.layout.len()
    }

    /// Total replicates covered by the layout.
    pub fn replicate_count(&self) -> usize {
        self.layout.iter().sum()
    }

    /// Region that replicate number `replicate` belongs to.
    pub fn region_of(&self, replicate: usize) -> Option<usize> {
        let mut end = 0;
        for (region, &size) in self.layout.iter().enumerate() {
            end += size;
            if replicate < end {
                return Some(region);
            }
        }
        None
    }

    /// Add replicate number `replicate` to its region, returning the region.
    pub fn add_replicate(
        &mut self,
        replicate: usize,
        population: &Population,
    ) -> Result<usize, StatsError> {
        let region = self
            .region_of(replicate)
            .ok_or(StatsError::ReplicateOutOfRange {
                replicate,
                total: self.replicate_count(),
            })?;
        self.estimator
            .accumulate(population, &mut self.counts[region])?;
        self.copies[region] += self.estimator.allele_copies(population);
        Ok(region)
    }

    /// Crop counts accumulated so far for `region`.
    pub fn counts(&self, region: usize) -> Option<&[u32]> {
        self.counts.get(region).map(Vec::as_slice)
    }

    /// Per-locus crop frequency of `region`, or `None` if the region is
    /// unknown or has no replicates yet.
    pub fn frequencies(&self, region: usize) -> Option<Vec<f64>> {
        let copies = *self.copies.get(region)?;
        if copies == 0 {
            return None;
        }
        Some(
            self.counts[region]
                .iter()
                .map(|&c| c as f64 / copies as f64)
                .collect(),
        )
    }

    /// Classify every locus in every populated region against `threshold`.
    pub fn classify(&self, threshold: f64) -> Result<ResistanceTable, StatsError> {
        let mut table = ResistanceTable::new(self.estimator.genome());
        for region in 0..self.region_count() {
            match self.frequencies(region) {
                Some(freqs) => {
                    let resistant = table.record_region(&freqs, threshold)?;
                    debug!("region {region}: {resistant} loci below {threshold}");
                }
                None => warn!("region {region} has no replicates yet, skipped"),
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropwild_sim::base::{Allele, AlleleSequence};
    use cropwild_sim::genome::Haplotype;

    fn genome() -> GenomeStructure {
        GenomeStructure::new(2, 3)
    }

    fn population(individuals: Vec<Individual>) -> Population {
        Population::new(individuals)
    }

    fn estimator(selection: SampleSelection, divisor: DosageDivisor) -> FrequencyEstimator {
        FrequencyEstimator::new(genome(), selection, divisor)
    }

    /// Individual whose homolog A groups are `a` and homolog B groups are `b`.
    fn individual(a: [&str; 2], b: [&str; 2]) -> Individual {
        let hap = |groups: [&str; 2]| {
            Haplotype::from_groups(
                groups
                    .iter()
                    .map(|s| s.parse::<AlleleSequence>().unwrap())
                    .collect(),
            )
        };
        Individual::new(hap(a), hap(b))
    }

    #[test]
    fn test_homozygous_crop_and_wild() {
        let pop = population(vec![Individual::uniform(Allele::Crop, 2, 3); 4]);
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        assert!(est.locus_frequencies(&[pop]).unwrap().iter().all(|&f| f == 1.0));

        let pop = population(vec![Individual::wild(2, 3); 4]);
        assert!(est.locus_frequencies(&[pop]).unwrap().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_locus_frequencies_layout() {
        let pop = population(vec![
            individual(["100", "000"], ["100", "001"]),
            individual(["000", "000"], ["100", "000"]),
        ]);
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let freqs = est.locus_frequencies(&[pop]).unwrap();
        assert_eq!(freqs, vec![0.75, 0.0, 0.0, 0.0, 0.0, 0.25]);
    }

    #[test]
    fn test_front_sample_ignores_rest() {
        let mut individuals = vec![Individual::wild(2, 3); 3];
        individuals.push(Individual::uniform(Allele::Crop, 2, 3));
        let pop = population(individuals);

        let sampled = estimator(SampleSelection::Front(3), DosageDivisor::Sampled);
        assert!(sampled.locus_frequencies(&[pop.clone()]).unwrap().iter().all(|&f| f == 0.0));

        let all = estimator(SampleSelection::All, DosageDivisor::Sampled);
        assert!(all.locus_frequencies(&[pop]).unwrap().iter().all(|&f| f == 0.25));
    }

    #[test]
    fn test_census_divisor() {
        let mut individuals = vec![Individual::uniform(Allele::Crop, 2, 3); 2];
        individuals.extend(vec![Individual::wild(2, 3); 2]);
        let pop = population(individuals);

        let est = estimator(SampleSelection::Front(2), DosageDivisor::Census);
        assert_eq!(est.allele_copies(&pop), 8);
        assert!(est.locus_frequencies(&[pop.clone()]).unwrap().iter().all(|&f| f == 0.5));

        let est = estimator(SampleSelection::Front(2), DosageDivisor::Sampled);
        assert_eq!(est.allele_copies(&pop), 4);
        assert!(est.locus_frequencies(&[pop]).unwrap().iter().all(|&f| f == 1.0));
    }

    #[test]
    fn test_pooled_populations() {
        let crop = population(vec![Individual::uniform(Allele::Crop, 2, 3); 2]);
        let wild = population(vec![Individual::wild(2, 3); 2]);
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);

        let freqs = est.locus_frequencies(&[crop, wild.clone(), wild.clone(), wild]).unwrap();
        assert!(freqs.iter().all(|&f| f == 0.25));
    }

    #[test]
    fn test_group_frequencies() {
        let pop = population(vec![
            individual(["111", "000"], ["100", "000"]),
            individual(["000", "000"], ["000", "001"]),
        ]);
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let freqs = est.group_frequencies(&[pop]).unwrap();
        assert_eq!(freqs.len(), 2);
        assert!((freqs[0] - 4.0 / 12.0).abs() < 1e-12);
        assert!((freqs[1] - 1.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        assert_eq!(est.locus_frequencies(&[]), Err(StatsError::EmptyInput));
        assert_eq!(
            est.group_frequencies(&[Population::new(Vec::new())]),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_accumulate_checks_buffer() {
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let pop = population(vec![Individual::wild(2, 3)]);
        let mut short = vec![0u32; 5];
        assert_eq!(
            est.accumulate(&pop, &mut short),
            Err(StatsError::LocusCountMismatch { expected: 6, found: 5 })
        );
    }

    #[test]
    fn test_dosage_rows() {
        let pop = population(vec![
            individual(["100", "010"], ["100", "000"]),
            individual(["000", "011"], ["100", "001"]),
            individual(["111", "111"], ["111", "111"]),
        ]);
        let est = estimator(SampleSelection::Front(2), DosageDivisor::Sampled);
        let rows = est.dosage_rows(&pop);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], vec![2, 1]);
        assert_eq!(rows[1], vec![0, 0]);
        assert_eq!(rows[2], vec![0, 0]);
        assert_eq!(rows[3], vec![0, 0]);
        assert_eq!(rows[4], vec![1, 1]);
        assert_eq!(rows[5], vec![0, 2]);
    }

    #[test]
    fn test_region_layout() {
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let acc = RegionAccumulator::new(est, &[8, 7, 7]);
        assert_eq!(acc.replicate_count(), 22);
        assert_eq!(acc.region_of(0), Some(0));
        assert_eq!(acc.region_of(7), Some(0));
        assert_eq!(acc.region_of(8), Some(1));
        assert_eq!(acc.region_of(14), Some(1));
        assert_eq!(acc.region_of(15), Some(2));
        assert_eq!(acc.region_of(21), Some(2));
        assert_eq!(acc.region_of(22), None);
    }

    #[test]
    fn test_region_accumulation() {
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let mut acc = RegionAccumulator::new(est, &[2, 1]);

        let crop = population(vec![Individual::uniform(Allele::Crop, 2, 3); 2]);
        let wild = population(vec![Individual::wild(2, 3); 2]);

        assert_eq!(acc.add_replicate(0, &crop).unwrap(), 0);
        assert_eq!(acc.frequencies(1), None);
        assert_eq!(acc.add_replicate(1, &wild).unwrap(), 0);
        assert_eq!(acc.add_replicate(2, &wild).unwrap(), 1);
        assert!(matches!(
            acc.add_replicate(3, &wild),
            Err(StatsError::ReplicateOutOfRange { replicate: 3, total: 3 })
        ));

        assert_eq!(acc.counts(0).unwrap(), &[4, 4, 4, 4, 4, 4]);
        assert!(acc.frequencies(0).unwrap().iter().all(|&f| f == 0.5));
        assert!(acc.frequencies(1).unwrap().iter().all(|&f| f == 0.0));
        assert_eq!(acc.frequencies(2), None);
    }

    #[test]
    fn test_region_classification() {
        let est = estimator(SampleSelection::All, DosageDivisor::Sampled);
        let mut acc = RegionAccumulator::new(est, &[1, 1]);

        // Region 0: only group 0 carries crop alleles.
        acc.add_replicate(0, &population(vec![individual(["111", "000"], ["111", "000"])]))
            .unwrap();
        // Region 1: locus 0 of group 0 and everything in group 1 carry crop.
        acc.add_replicate(1, &population(vec![individual(["100", "111"], ["100", "111"])]))
            .unwrap();

        let table = acc.classify(0.1).unwrap();
        assert_eq!(table.regions_resistant(0, 0), Some(0));
        assert_eq!(table.regions_resistant(0, 1), Some(1));
        assert_eq!(table.regions_resistant(1, 0), Some(1));
        assert_eq!(table.resistant_loci(), 5);
        assert_eq!(table.count_in_exactly(2), 0);
    }
}
