use super::error::Result;
use super::kmeans::{Initialization, KMeans};
use super::param::KParam;
use super::partition::{Cluster, dissimilarity};
use super::partitioner::{Partitioner, check_observations};
use super::point::Point;
use super::profile::PartitioningProfile;
use std::time::Instant;
use tracing::debug;

/// Best-K search over K-means
///
/// K is the largest candidate. Every K in `1..=K` is run to convergence and
/// the one with the lowest dissimilarity (smallest K on ties) is run once
/// more to produce the result.
#[derive(Debug, Clone)]
pub struct KMeansMulti {
    param: KParam,
    inner: KMeans,
    best_k: Option<u8>,
}

impl KMeansMulti {
    pub const NAME: &'static str = "K means (with max K)";

    pub fn new() -> Self {
        Self {
            param: KParam::new(),
            inner: KMeans::new(),
            best_k: None,
        }
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.with_seed(seed);
        self
    }

    /// Set the largest K to try
    pub fn with_k(mut self, k: u32) -> Self {
        self.param.set(k);
        self
    }

    /// Initializer used by every inner K-means run
    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.inner = self.inner.with_initialization(initialization);
        self
    }

    /// Iteration cap applied to each inner K-means run
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.inner = self.inner.with_max_iterations(max_iterations);
        self
    }

    /// K chosen by the last successful `partition` call
    pub fn best_k(&self) -> Option<u8> {
        self.best_k
    }
}

impl Default for KMeansMulti {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner for KMeansMulti {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn k_param(&self) -> &KParam {
        &self.param
    }

    fn k_param_mut(&mut self) -> &mut KParam {
        &mut self.param
    }

    fn partition(
        &mut self,
        observations: &[Point],
        profile: &mut PartitioningProfile,
    ) -> Result<Vec<Cluster>> {
        profile.reset();
        self.best_k = None;
        let started = Instant::now();

        let max_k = self.k();
        check_observations(observations, usize::from(max_k))?;

        let mut run = PartitioningProfile::default();
        let mut best_k = 1;
        let mut best_dissimilarity = u64::MAX;

        for k in 1..=max_k {
            self.inner.set_k(u32::from(k));
            let clusters = self.inner.partition(observations, &mut run)?;
            profile.iterations += run.iterations;

            let current = dissimilarity(&clusters, observations);
            debug!(k, dissimilarity = current, iterations = run.iterations, "best-K candidate");

            if current < best_dissimilarity {
                best_k = k;
                best_dissimilarity = current;
            }
        }

        self.inner.set_k(u32::from(best_k));
        let clusters = self.inner.partition(observations, &mut run)?;
        profile.iterations += run.iterations;

        self.best_k = Some(best_k);
        profile.elapsed = started.elapsed();
        debug!(best_k, best_dissimilarity, "best-K search finished");

        Ok(clusters)
    }
}
