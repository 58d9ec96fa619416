use thiserror::Error;

/// Error type for aggregation and summary statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("No values to summarize")]
    EmptyInput,
    #[error("Need at least {required} groups, got {found}")]
    TooFewGroups { required: usize, found: usize },
    #[error("Group {group} has {found} observations, need at least 2")]
    TooFewObservations { group: usize, found: usize },
    #[error("Group {group} has {found} observations, expected {expected}")]
    UnequalGroupSizes {
        group: usize,
        expected: usize,
        found: usize,
    },
    #[error("Replicate {replicate} is outside the {total} replicates assigned to regions")]
    ReplicateOutOfRange { replicate: usize, total: usize },
    #[error("Expected {expected} loci, got {found}")]
    LocusCountMismatch { expected: usize, found: usize },
}
