use super::error::{PartitionError, Result};
use super::param::KParam;
use super::partition::Cluster;
use super::partitioner::{Partitioner, check_observations};
use super::point::Point;
use super::profile::PartitioningProfile;
use bitvec::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

// Lloyd's algorithm:
//
// KMeans(D, K)
//    pick K distinct observations as initial means
//    repeat
//       assign every observation to the nearest mean (lowest index on ties)
//       if some cluster got no observations
//          start over from initialization
//       move every mean to the average of its observations
//    until no mean moved

/// How the initial representatives are picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Initialization {
    /// K observations with distinct coordinates, uniformly at random
    #[default]
    Random,
    /// One observation per vertical strip of the bounding box
    Stratified,
}

/// K-means partitioner
#[derive(Debug, Clone)]
pub struct KMeans {
    param: KParam,
    initialization: Initialization,
    max_iterations: Option<usize>,
    rng: ChaCha8Rng,
    restarts: usize,
}

impl KMeans {
    pub const NAME: &'static str = "K means";

    /// Creates a K-means partitioner with default K, seeded from OS entropy
    pub fn new() -> Self {
        Self {
            param: KParam::new(),
            initialization: Initialization::Random,
            max_iterations: None,
            rng: ChaCha8Rng::from_os_rng(),
            restarts: 0,
        }
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Set K; out-of-range values keep the current K
    pub fn with_k(mut self, k: u32) -> Self {
        self.param.set(k);
        self
    }

    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    /// Cap the number of assignment passes per call, restarts included
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn initialization(&self) -> Initialization {
        self.initialization
    }

    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Restarts caused by empty clusters during the last `partition` call
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner for KMeans {
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
        self.restarts = 0;
        let started = Instant::now();

        let k = usize::from(self.k());
        check_observations(observations, k)?;

        let mut scratch = Assignment::new(observations.len());
        let mut passes = 0;

        let clusters = loop {
            let mut clusters = seed_clusters(observations, k, self.initialization, &mut self.rng);

            if lloyd(
                observations,
                &mut clusters,
                &mut scratch,
                profile,
                &mut passes,
                self.max_iterations,
            )? {
                break clusters;
            }

            self.restarts += 1;
            debug!(
                k,
                restarts = self.restarts,
                "empty cluster, restarting from initialization"
            );
        };

        profile.elapsed = started.elapsed();
        trace!(
            k,
            iterations = profile.iterations,
            restarts = self.restarts,
            "K-means converged"
        );

        Ok(clusters)
    }
}

/// Runs assign/update passes until no representative moves
///
/// Returns `Ok(false)` as soon as a pass leaves a cluster empty.
pub(crate) fn lloyd(
    observations: &[Point],
    clusters: &mut [Cluster],
    scratch: &mut Assignment,
    profile: &mut PartitioningProfile,
    passes: &mut usize,
    max_iterations: Option<usize>,
) -> Result<bool> {
    loop {
        if max_iterations.is_some_and(|cap| *passes >= cap) {
            return Err(PartitionError::NonConvergence { iterations: *passes });
        }
        *passes += 1;

        if !scratch.assign(observations, clusters) {
            return Ok(false);
        }

        let mut moved = false;
        for cluster in clusters.iter_mut() {
            let mean = cluster.centroid(observations);
            moved |= mean != cluster.representative;
            cluster.representative = mean;
        }

        profile.iterations += 1;

        if !moved {
            return Ok(true);
        }
    }
}

/// Per-observation working state of an assignment pass
///
/// Lives only for the duration of one `partition` call.
#[derive(Debug)]
pub(crate) struct Assignment {
    /// Squared distance to the closest representative seen so far
    distances: Vec<u64>,
    /// Index of that representative
    labels: Vec<usize>,
}

impl Assignment {
    pub(crate) fn new(num_points: usize) -> Self {
        Self {
            distances: vec![u64::MAX; num_points],
            labels: vec![0; num_points],
        }
    }

    /// Moves every observation into the cluster with the nearest representative
    ///
    /// Ties go to the lowest cluster index. Returns `false` if any cluster
    /// ends up without members.
    pub(crate) fn assign(&mut self, observations: &[Point], clusters: &mut [Cluster]) -> bool {
        for cluster in clusters.iter_mut() {
            cluster.members.clear();
        }
        self.distances.fill(u64::MAX);
        self.labels.fill(0);

        for (i, observation) in observations.iter().enumerate() {
            for (j, cluster) in clusters.iter().enumerate() {
                let distance = observation.sq_dist(&cluster.representative);

                if distance < self.distances[i] {
                    self.distances[i] = distance;
                    self.labels[i] = j;
                }
            }

            clusters[self.labels[i]].members.push(i);
        }

        clusters.iter().all(|c| !c.is_empty())
    }
}

/// Creates K clusters around freshly picked representatives
///
/// Requires at least `k` distinct observations.
pub(crate) fn seed_clusters(
    observations: &[Point],
    k: usize,
    initialization: Initialization,
    rng: &mut impl Rng,
) -> Vec<Cluster> {
    let seeds = match initialization {
        Initialization::Random => random_seeds(observations, k, rng),
        Initialization::Stratified => stratified_seeds(observations, k, rng),
    };

    seeds
        .into_iter()
        .enumerate()
        .map(|(i, idx)| Cluster::new(i, observations[idx]))
        .collect()
}

/// Picks `k` observation indices with pairwise distinct coordinates
///
/// Shuffles the whole index range and keeps the first index of every
/// coordinate until `k` are collected.
pub(crate) fn random_seeds(observations: &[Point], k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..observations.len()).collect();
    order.shuffle(rng);

    let mut taken = HashSet::with_capacity(k);
    order
        .into_iter()
        .filter(|&i| taken.insert(observations[i]))
        .take(k)
        .collect()
}

/// Picks one observation per vertical strip of the bounding box
///
/// The box is split into `k` strips of equal width. Inside each strip a target
/// x is drawn within a quarter strip width of the strip center, and the
/// observation nearest to it by x is taken. Coordinates already taken are
/// skipped by walking outward along the x-sorted order.
pub(crate) fn stratified_seeds(
    observations: &[Point],
    k: usize,
    rng: &mut impl Rng,
) -> Vec<usize> {
    // One index per distinct coordinate, sorted by (x, y)
    let mut by_x: Vec<usize> = (0..observations.len()).collect();
    by_x.sort_by_key(|&i| observations[i]);
    by_x.dedup_by_key(|i| observations[*i]);

    let (Some(&first), Some(&last)) = (by_x.first(), by_x.last()) else {
        return Vec::new();
    };

    let min_x = i64::from(observations[first].x);
    let max_x = i64::from(observations[last].x);
    let width = ((max_x - min_x + 1) / k as i64).max(1);
    let jitter = width / 4;

    let mut used = bitvec![0; by_x.len()];
    let mut seeds = Vec::with_capacity(k);

    for strip in 0..k as i64 {
        let center = min_x + strip * width + width / 2;
        let target = center + rng.random_range(-jitter..=jitter);

        let nearest = nearest_by_x(observations, &by_x, target);
        let Some(pos) = nearest_free(&used, nearest) else {
            break;
        };

        used.set(pos, true);
        seeds.push(by_x[pos]);
    }

    seeds
}

/// Position in `sorted` whose x is closest to `target` (binary search)
fn nearest_by_x(observations: &[Point], sorted: &[usize], target: i64) -> usize {
    let x = |pos: usize| i64::from(observations[sorted[pos]].x);
    let lower = sorted.partition_point(|&i| i64::from(observations[i].x) < target);

    if lower == sorted.len() {
        return sorted.len() - 1;
    }
    if lower > 0 && target - x(lower - 1) <= x(lower) - target {
        return lower - 1;
    }

    lower
}

/// Closest position to `pos` not yet marked in `used`, searching both ways
fn nearest_free(used: &BitSlice, pos: usize) -> Option<usize> {
    let len = used.len();

    for d in 0..len {
        if pos + d < len && !used[pos + d] {
            return Some(pos + d);
        }
        if d <= pos && !used[pos - d] {
            return Some(pos - d);
        }
    }

    None
}
