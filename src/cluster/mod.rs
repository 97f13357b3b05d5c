//! Package cluster partitions 2-D integer observations into K clusters
//! with K-means, K-medoids and a best-K search over K-means
pub mod color;
pub mod error;
pub mod generate;
pub mod kmeans;
pub mod kmeans_multi;
pub mod kmedoids;
pub mod param;
pub mod partition;
pub mod partitioner;
pub mod point;
pub mod profile;

#[cfg(test)]
mod kmeans_multi_test;

pub use color::{Color, VISUALLY_DISTINCT_COLORS};
pub use error::{PartitionError, Result};
pub use generate::{GeneratorConfig, generate_observations};
pub use kmeans::{Initialization, KMeans};
pub use kmeans_multi::KMeansMulti;
pub use kmedoids::KMedoids;
pub use param::{K_DEFAULT, K_MAX, K_MIN, KParam};
pub use partition::{Cluster, dissimilarity, is_exact_partition, labels};
pub use partitioner::{Algorithm, Partitioner, PartitionerOptions, distinct_count};
pub use point::{Point, PointList};
pub use profile::{PartitioningProfile, format_elapsed};
