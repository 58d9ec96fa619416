//! Allele-frequency aggregation and null-distribution statistics for
//! cropwild simulations.
//!
//! Replicate populations from `cropwild-sim` are reduced to crop-allele
//! frequencies per locus or per linkage group, which are then summarized
//! across Monte Carlo trials with rank-based bounds, a one-way ANOVA across
//! linkage groups, and resistant-locus classification across regions.

pub mod analysis;
mod error;

pub use analysis::{
    AnovaResult, EmpiricalDistribution, FrequencyEstimator, RegionAccumulator, ResistanceTable,
    max_difference, one_way_anova, quantile_index,
};
pub use error::StatsError;
