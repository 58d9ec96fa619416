//! Population genetics analysis tools for cropwild
//!
//! This module provides:
//! - Crop-allele frequency estimation (per locus, per linkage group, pooled
//!   across replicates or accumulated per region)
//! - Rank-based confidence bounds over trial statistics
//! - One-way ANOVA and max-difference across linkage groups
//! - Resistant-locus classification

pub mod frequency;
pub mod statistics;
pub mod utils;

// Re-export commonly used items
pub use frequency::{FrequencyEstimator, RegionAccumulator};
pub use statistics::{
    AnovaResult, EmpiricalDistribution, ResistanceTable, max_difference, one_way_anova,
    quantile_index,
};
