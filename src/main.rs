//! 2-D point partitioning tool
//!
//! Reads integer points from a CSV file (or generates a clustered set),
//! partitions them with K-means, K-medoids or a best-K search, and writes
//! every point together with its cluster index and color.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_partition::cluster::generate::{
    DEFAULT_INITIAL_OBSERVATIONS, DEFAULT_PLANE_SIZE, DEFAULT_SPREAD,
};
use rust_partition::cluster::{
    Algorithm, Cluster, GeneratorConfig, Initialization, K_DEFAULT, PartitionerOptions,
    PartitioningProfile, Point, PointList, dissimilarity, format_elapsed, generate_observations,
    labels,
};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, warn};

#[cfg(test)]
mod main_test;

#[derive(Parser)]
#[command(name = "rust_partition")]
#[command(about = "K-means / K-medoids 2-D point partitioning tool", long_about = None)]
struct Args {
    /// Input CSV file with x,y columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Generate this many observations instead of reading the input file
    #[arg(short, long)]
    generate: Option<u32>,

    /// Output CSV file with labeled points (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Partitioning algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::KMeans)]
    algorithm: Algorithm,

    /// Number of clusters (largest K to try for kmeans-multi), 1..=255
    #[arg(short, long, default_value_t = u32::from(K_DEFAULT))]
    k: u32,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Give up after this many assignment passes
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Initializer override (kmeans defaults to random, kmedoids to stratified)
    #[arg(long, value_enum)]
    init: Option<Initialization>,

    /// Side of the square plane used by --generate
    #[arg(long, default_value_t = DEFAULT_PLANE_SIZE)]
    plane_size: u16,

    /// Maximum per-axis offset of a generated point from its parent
    #[arg(long, default_value_t = DEFAULT_SPREAD)]
    spread: u16,

    /// Number of uniformly scattered points --generate grows blobs from
    #[arg(long, default_value_t = DEFAULT_INITIAL_OBSERVATIONS)]
    initial: u16,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    let points = match load_points(&args) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error reading points: {}", e);
            std::process::exit(1);
        }
    };

    if points.is_empty() {
        eprintln!("No points found");
        std::process::exit(1);
    }

    info!(count = points.len(), "observations ready");

    let options = PartitionerOptions {
        seed: args.seed,
        max_iterations: args.max_iterations,
        initialization: args.init,
    };
    let mut partitioner = args.algorithm.build(&options);

    if !partitioner.set_k(args.k) {
        warn!(
            requested = args.k,
            k = partitioner.k(),
            "K out of range, keeping current value"
        );
    }

    debug!(algorithm = partitioner.name(), k = partitioner.k(), "partitioning");

    let mut profile = PartitioningProfile::default();
    let clusters = match partitioner.partition(&points, &mut profile) {
        Ok(clusters) => clusters,
        Err(e) => {
            eprintln!("Error partitioning: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        algorithm = partitioner.name(),
        k = partitioner.k(),
        clusters = clusters.len(),
        iterations = profile.iterations,
        elapsed = %format_elapsed(profile.elapsed),
        dissimilarity = dissimilarity(&clusters, &points),
        "partition finished"
    );

    for (i, cluster) in clusters.iter().enumerate() {
        debug!(
            cluster = i,
            representative = %cluster.representative,
            members = cluster.len(),
            color = %cluster.color,
            "cluster"
        );
    }

    let written = match &args.output {
        None => write_labeled_points(io::stdout().lock(), &points, &clusters),
        Some(path) => File::create(path)
            .map_err(Into::into)
            .and_then(|file| write_labeled_points(file, &points, &clusters)),
    };

    if let Err(e) = written {
        eprintln!("Error writing CSV: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = &args.output {
        debug!(?path, "labeled points written");
    }
}

/// Diagnostics go to stderr so CSV on stdout stays clean
fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Generates observations when requested, otherwise reads the input file
fn load_points(args: &Args) -> Result<PointList, Box<dyn std::error::Error>> {
    match args.generate {
        Some(total) => {
            let config = GeneratorConfig {
                width: args.plane_size,
                height: args.plane_size,
                spread: args.spread,
                initial: args.initial,
                total,
            };
            let mut rng = match args.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_os_rng(),
            };
            Ok(generate_observations(&config, &mut rng))
        }
        None => read_points_from_file(&args.input),
    }
}

fn read_points_from_file(filename: &Path) -> Result<PointList, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    read_points(file)
}

/// Reads points from CSV
///
/// Expected format: `x,y` (header row is optional). Rows that do not hold
/// two integers are skipped.
fn read_points<R: io::Read>(reader: R) -> Result<PointList, Box<dyn std::error::Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = PointList::new();
    let mut skipped = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let x = record.get(0).map(str::parse::<i32>);
        let y = record.get(1).map(str::parse::<i32>);

        match (x, y) {
            (Some(Ok(x)), Some(Ok(y))) => points.push(Point::new(x, y)),
            // Header is a first row whose first cell is not a number
            _ if row == 0 && record.get(0).is_some_and(|c| c.parse::<f64>().is_err()) => {}
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped rows without two integer coordinates");
    }

    Ok(points)
}

/// Writes every point with its cluster index and the cluster color
///
/// Format: `x,y,cluster,color` with a header row; color is `#rrggbb`.
fn write_labeled_points<W: io::Write>(
    writer: W,
    points: &[Point],
    clusters: &[Cluster],
) -> Result<(), Box<dyn std::error::Error>> {
    let labels = labels(clusters, points.len());
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(["x", "y", "cluster", "color"])?;

    for (point, label) in points.iter().zip(&labels) {
        let (cluster, color) = match label {
            Some(c) => (c.to_string(), clusters[*c].color.to_string()),
            None => (String::new(), String::new()),
        };
        writer.write_record([point.x.to_string(), point.y.to_string(), cluster, color])?;
    }

    writer.flush()?;
    Ok(())
}
