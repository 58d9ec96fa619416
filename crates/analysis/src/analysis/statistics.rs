//! Summary statistics over trials and linkage groups
//!
//! Implements:
//! - Rank-based (empirical quantile) confidence bounds
//! - One-way ANOVA F-statistic across linkage groups
//! - Max-difference between linkage-group means
//! - Resistant-locus classification across regions

use crate::StatsError;
use crate::analysis::utils::{mean, min_max, sample_variance};
use cropwild_sim::simulation::GenomeStructure;

/// Index of the `q` quantile in a sorted sample of `n` values.
///
/// This is `floor(q * n)`, clamped to the last index so that `q = 1.0`
/// selects the maximum.
///
/// # Examples
///
/// ```
/// use cropwild_analysis::quantile_index;
///
/// assert_eq!(quantile_index(100, 0.975), 97);
/// assert_eq!(quantile_index(2000, 0.025), 50);
/// ```
pub fn quantile_index(n: usize, q: f64) -> usize {
    let index = (q * n as f64).floor() as usize;
    index.min(n.saturating_sub(1))
}

/// Sorted sample of per-trial statistics.
///
/// Values are ordered with [`f64::total_cmp`], so a NaN statistic (see
/// [`one_way_anova`]) sorts above `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    sorted: Vec<f64>,
}

impl EmpiricalDistribution {
    pub fn new(mut values: Vec<f64>) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        values.sort_by(f64::total_cmp);
        Ok(Self { sorted: values })
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always false; construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.sorted
    }

    /// Value at sorted index [`quantile_index`]`(len, q)`.
    pub fn quantile(&self, q: f64) -> f64 {
        self.sorted[quantile_index(self.len(), q)]
    }

    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    pub fn max(&self) -> f64 {
        self.sorted[self.len() - 1]
    }

    /// The `rank`-th largest value (`rank = 1` is the maximum).
    pub fn rank_from_top(&self, rank: usize) -> Option<f64> {
        if rank == 0 || rank > self.len() {
            return None;
        }
        Some(self.sorted[self.len() - rank])
    }
}

/// Result of a one-way ANOVA across linkage groups.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    pub group_means: Vec<f64>,
    /// Mean of the group means
    pub grand_mean: f64,
    pub ss_between: f64,
    pub ss_within: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ms_between: f64,
    pub ms_within: f64,
    pub f_statistic: f64,
}

/// One-way ANOVA F-statistic across groups of replicate observations.
///
/// # Formula
///
/// With `k` groups of `n` observations each and `N = k * n`:
///
/// $$SS_B = \sum_i (\bar{x}_i - \bar{\bar{x}})^2 \qquad SS_W = \sum_i s_i^2 (n - 1)$$
///
/// $$F = \frac{SS_B / (k - 1)}{SS_W / (N - k)}$$
///
/// where $s_i^2$ is the sample variance of group `i` and $\bar{\bar{x}}$ is
/// the mean of the group means. The between-group sum of squares is not
/// weighted by `n`. Degrees of freedom come from the data, so 17 groups of 22
/// replicates give 16 and 357.
///
/// When the within-group mean square is exactly zero, `F` is `+inf` if the
/// group means differ and NaN if they do not. Near-zero within-group variance
/// yields a very large but finite `F`.
///
/// # Errors
///
/// Fewer than two groups, a group with fewer than two observations, or groups
/// of unequal size.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<AnovaResult, StatsError> {
    let k = groups.len();
    if k < 2 {
        return Err(StatsError::TooFewGroups {
            required: 2,
            found: k,
        });
    }
    let n = groups[0].len();
    for (group, values) in groups.iter().enumerate() {
        if values.len() < 2 {
            return Err(StatsError::TooFewObservations {
                group,
                found: values.len(),
            });
        }
        if values.len() != n {
            return Err(StatsError::UnequalGroupSizes {
                group,
                expected: n,
                found: values.len(),
            });
        }
    }

    let group_means: Vec<f64> = groups.iter().map(|g| mean(g)).collect();
    let grand_mean = mean(&group_means);

    let ss_between: f64 = group_means.iter().map(|m| (m - grand_mean).powi(2)).sum();
    let ss_within: f64 = groups
        .iter()
        .map(|g| sample_variance(g) * (n - 1) as f64)
        .sum();

    let df_between = k - 1;
    let df_within = k * n - k;
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let f_statistic = if ms_within > 0.0 {
        ms_between / ms_within
    } else if ms_between > 0.0 {
        f64::INFINITY
    } else {
        f64::NAN
    };

    Ok(AnovaResult {
        group_means,
        grand_mean,
        ss_between,
        ss_within,
        df_between,
        df_within,
        ms_between,
        ms_within,
        f_statistic,
    })
}

/// Largest minus smallest group mean.
pub fn max_difference(group_means: &[f64]) -> Result<f64, StatsError> {
    let (lo, hi) = min_max(group_means).ok_or(StatsError::EmptyInput)?;
    Ok(hi - lo)
}

/// Number of values strictly below `threshold`.
pub fn count_below(values: &[f64], threshold: f64) -> usize {
    values.iter().filter(|&&v| v < threshold).count()
}

/// For every locus, the number of regions in which it is
/// introgression-resistant (crop frequency below a threshold).
///
/// Counts are stored densely in linkage-group-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResistanceTable {
    genome: GenomeStructure,
    region_hits: Vec<u32>,
    regions_recorded: usize,
}

impl ResistanceTable {
    pub fn new(genome: GenomeStructure) -> Self {
        Self {
            genome,
            region_hits: vec![0; genome.total_loci()],
            regions_recorded: 0,
        }
    }

    /// Record one region's per-locus frequencies; returns how many loci are
    /// resistant in that region.
    pub fn record_region(
        &mut self,
        frequencies: &[f64],
        threshold: f64,
    ) -> Result<usize, StatsError> {
        if frequencies.len() != self.region_hits.len() {
            return Err(StatsError::LocusCountMismatch {
                expected: self.region_hits.len(),
                found: frequencies.len(),
            });
        }

        let mut resistant = 0;
        for (hits, &freq) in self.region_hits.iter_mut().zip(frequencies) {
            if freq < threshold {
                *hits += 1;
                resistant += 1;
            }
        }
        self.regions_recorded += 1;
        Ok(resistant)
    }

    pub fn regions_recorded(&self) -> usize {
        self.regions_recorded
    }

    /// Regions in which locus `locus` of group `group` is resistant.
    pub fn regions_resistant(&self, group: usize, locus: usize) -> Option<usize> {
        if group >= self.genome.linkage_groups || locus >= self.genome.loci_per_group {
            return None;
        }
        Some(self.region_hits[group * self.genome.loci_per_group + locus] as usize)
    }

    /// Loci resistant in at least one region.
    pub fn resistant_loci(&self) -> usize {
        self.region_hits.iter().filter(|&&h| h > 0).count()
    }

    /// Loci resistant in exactly `k` regions.
    pub fn count_in_exactly(&self, k: usize) -> usize {
        self.region_hits.iter().filter(|&&h| h as usize == k).count()
    }

    /// Share of resistant loci that are resistant in exactly `k` regions, or
    /// `None` when no locus is resistant anywhere.
    pub fn share_in_exactly(&self, k: usize) -> Option<f64> {
        let resistant = self.resistant_loci();
        if resistant == 0 {
            return None;
        }
        Some(self.count_in_exactly(k) as f64 / resistant as f64)
    }
}
