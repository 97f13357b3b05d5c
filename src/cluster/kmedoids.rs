use super::error::{PartitionError, Result};
use super::kmeans::{Assignment, Initialization, seed_clusters};
use super::param::KParam;
use super::partition::{Cluster, dissimilarity};
use super::partitioner::{Partitioner, check_observations};
use super::point::Point;
use super::profile::PartitioningProfile;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

// KMedoids(D, K)
//    pick K representatives with the stratified initializer
//    repeat
//       assign every observation to the nearest representative
//       while some cluster is empty
//          reseed it with a random observation and assign again
//       for every cluster
//          centroid = average of its observations
//          representative = member nearest to centroid (by x-sorted search)
//       measure dissimilarity
//    until dissimilarity stops decreasing

/// K-medoids partitioner
///
/// Representatives are always member observations. The state of the pass
/// that failed to improve dissimilarity is the one returned.
#[derive(Debug, Clone)]
pub struct KMedoids {
    param: KParam,
    initialization: Initialization,
    max_iterations: Option<usize>,
    rng: ChaCha8Rng,
    history: Vec<u64>,
}

impl KMedoids {
    pub const NAME: &'static str = "K medoids";

    pub fn new() -> Self {
        Self {
            param: KParam::new(),
            initialization: Initialization::Stratified,
            max_iterations: None,
            rng: ChaCha8Rng::from_os_rng(),
            history: Vec::new(),
        }
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.param.set(k);
        self
    }

    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    /// Cap the number of assignment passes per call, repairs included
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Dissimilarity measured after each pass of the last `partition` call
    pub fn dissimilarity_history(&self) -> &[u64] {
        &self.history
    }

    /// Counts one assignment pass against the configured cap
    fn take_pass(&self, passes: &mut usize) -> Result<()> {
        if self.max_iterations.is_some_and(|cap| *passes >= cap) {
            return Err(PartitionError::NonConvergence { iterations: *passes });
        }
        *passes += 1;
        Ok(())
    }

    /// Assigns observations, reseeding empty clusters until none is left
    ///
    /// Each reseed takes a random observation whose coordinates are not a
    /// current representative, so it always claims at least itself.
    pub(super) fn assign_repairing(
        &mut self,
        observations: &[Point],
        clusters: &mut [Cluster],
        scratch: &mut Assignment,
        passes: &mut usize,
    ) -> Result<()> {
        self.take_pass(passes)?;

        while !scratch.assign(observations, clusters) {
            for c in 0..clusters.len() {
                if !clusters[c].is_empty() {
                    continue;
                }

                let representatives: HashSet<Point> =
                    clusters.iter().map(|cluster| cluster.representative).collect();
                let candidates: Vec<usize> = (0..observations.len())
                    .filter(|&i| !representatives.contains(&observations[i]))
                    .collect();

                let Some(&pick) = candidates.choose(&mut self.rng) else {
                    return Err(PartitionError::InsufficientObservations {
                        k: clusters.len(),
                        distinct: representatives.len(),
                    });
                };

                debug!(cluster = c, observation = pick, "reseeding empty cluster");
                clusters[c].representative = observations[pick];
            }

            self.take_pass(passes)?;
        }

        Ok(())
    }

    /// Member of `cluster` nearest to its centroid
    ///
    /// Members are sorted by x and the centroid's x is located by binary
    /// search; the hit and its predecessor are compared by squared distance.
    /// A search that runs past the last member falls back to a random member.
    fn medoid(&mut self, observations: &[Point], cluster: &Cluster) -> Point {
        let centroid = cluster.centroid(observations);

        let mut sorted: Vec<Point> = cluster.members.iter().map(|&i| observations[i]).collect();
        sorted.sort();

        let lower = sorted.partition_point(|p| p.x < centroid.x);
        if lower == sorted.len() {
            return sorted
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(cluster.representative);
        }

        let hit = sorted[lower];
        match lower.checked_sub(1).map(|i| sorted[i]) {
            Some(prev) if prev.sq_dist(&centroid) < hit.sq_dist(&centroid) => prev,
            _ => hit,
        }
    }
}

impl Default for KMedoids {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner for KMedoids {
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
        self.history.clear();
        let started = Instant::now();

        let k = usize::from(self.k());
        check_observations(observations, k)?;

        let mut clusters = seed_clusters(observations, k, self.initialization, &mut self.rng);
        let mut scratch = Assignment::new(observations.len());
        let mut passes = 0;
        let mut previous = u64::MAX;
        let mut current;

        loop {
            self.assign_repairing(observations, &mut clusters, &mut scratch, &mut passes)?;

            for c in 0..clusters.len() {
                let medoid = self.medoid(observations, &clusters[c]);
                clusters[c].representative = medoid;
            }

            profile.iterations += 1;

            current = dissimilarity(&clusters, observations);
            self.history.push(current);
            trace!(iteration = profile.iterations, current, previous, "K-medoids pass");

            if current >= previous {
                break;
            }
            previous = current;
        }

        profile.elapsed = started.elapsed();
        debug!(
            k,
            iterations = profile.iterations,
            dissimilarity = current,
            "K-medoids finished"
        );

        Ok(clusters)
    }
}
