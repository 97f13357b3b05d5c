use super::error::{PartitionError, Result};
use super::kmeans::{Initialization, KMeans};
use super::kmeans_multi::KMeansMulti;
use super::kmedoids::KMedoids;
use super::param::KParam;
use super::partition::Cluster;
use super::point::Point;
use super::profile::PartitioningProfile;
use std::collections::HashSet;

/// Common contract of every partitioning algorithm
///
/// A partitioner owns its K parameter and random source. Everything else is
/// rebuilt on each `partition` call.
pub trait Partitioner {
    /// Display label
    fn name(&self) -> &str;

    fn k_param(&self) -> &KParam;

    fn k_param_mut(&mut self) -> &mut KParam;

    fn k(&self) -> u8 {
        self.k_param().get()
    }

    /// Sets K if it is within bounds; out-of-range values are ignored
    fn set_k(&mut self, k: u32) -> bool {
        self.k_param_mut().set(k)
    }

    fn increment_k(&mut self) {
        self.k_param_mut().increment();
    }

    fn decrement_k(&mut self) {
        self.k_param_mut().decrement();
    }

    /// Partitions `observations` into clusters
    ///
    /// `profile` is reset, then filled with this call's iterations and elapsed
    /// time. On success the members of the returned clusters cover every
    /// observation index exactly once.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::EmptyInput`] if `observations` is empty
    /// - [`PartitionError::InsufficientObservations`] if there are fewer
    ///   distinct observations than K
    /// - [`PartitionError::NonConvergence`] if an iteration cap is configured
    ///   and reached
    fn partition(
        &mut self,
        observations: &[Point],
        profile: &mut PartitioningProfile,
    ) -> Result<Vec<Cluster>>;
}

/// Available partitioning algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Lloyd's K-means
    #[value(name = "kmeans")]
    KMeans,
    /// Medoid refinement over K-means assignment
    #[value(name = "kmedoids")]
    KMedoids,
    /// K-means over every K up to the configured maximum, keeping the best
    #[value(name = "kmeans-multi")]
    KMeansMulti,
}

/// Settings applied to a partitioner built from an [`Algorithm`]
///
/// `None` keeps the partitioner's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionerOptions {
    pub seed: Option<u64>,
    pub max_iterations: Option<usize>,
    pub initialization: Option<Initialization>,
}

macro_rules! configured {
    ($partitioner:expr, $options:expr) => {{
        let mut partitioner = $partitioner;
        if let Some(seed) = $options.seed {
            partitioner = partitioner.with_seed(seed);
        }
        if let Some(max_iterations) = $options.max_iterations {
            partitioner = partitioner.with_max_iterations(max_iterations);
        }
        if let Some(initialization) = $options.initialization {
            partitioner = partitioner.with_initialization(initialization);
        }
        Box::new(partitioner) as Box<dyn Partitioner>
    }};
}

impl Algorithm {
    pub fn build(self, options: &PartitionerOptions) -> Box<dyn Partitioner> {
        match self {
            Algorithm::KMeans => configured!(KMeans::new(), options),
            Algorithm::KMedoids => configured!(KMedoids::new(), options),
            Algorithm::KMeansMulti => configured!(KMeansMulti::new(), options),
        }
    }
}

/// Number of observations with pairwise distinct coordinates
pub fn distinct_count(observations: &[Point]) -> usize {
    observations.iter().collect::<HashSet<_>>().len()
}

/// Fails fast when `k` clusters cannot be seeded from `observations`
pub(crate) fn check_observations(observations: &[Point], k: usize) -> Result<()> {
    if observations.is_empty() {
        return Err(PartitionError::EmptyInput);
    }

    let distinct = distinct_count(observations);
    if distinct < k {
        return Err(PartitionError::InsufficientObservations { k, distinct });
    }

    Ok(())
}
