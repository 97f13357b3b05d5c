//! 2-D point partitioning engine
//!
//! Groups planar integer observations into K clusters, each summarized by a
//! representative point and a color. See [`cluster::Partitioner`].
pub mod cluster;
