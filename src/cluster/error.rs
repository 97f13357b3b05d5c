use thiserror::Error;

/// Result alias for partitioning operations
pub type Result<T> = std::result::Result<T, PartitionError>;

/// Errors returned by `Partitioner::partition`
///
/// Degenerate (empty) clusters are recovered internally and never show up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PartitionError {
    /// No observations were supplied
    #[error("No observations to partition")]
    EmptyInput,

    /// Fewer distinct observations than requested clusters
    ///
    /// Initialization needs K observations with distinct coordinates.
    #[error("Insufficient observations: {k} clusters requested, {distinct} distinct observations")]
    InsufficientObservations {
        /// Requested number of clusters
        k: usize,
        /// Distinct observations available
        distinct: usize,
    },

    /// The configured iteration cap was reached before convergence
    #[error("Did not converge after {iterations} iterations")]
    NonConvergence {
        /// Passes performed before giving up
        iterations: usize,
    },
}
