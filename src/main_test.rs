#[cfg(test)]
mod tests {
    use crate::{read_points, read_points_from_file, write_labeled_points};
    use rust_partition::cluster::{
        Algorithm, PartitionerOptions, PartitioningProfile, Point, is_exact_partition,
    };
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_main_program() {
        // Create a test CSV file
        let test_csv = "x,y
0,0
0,1
10,10
10,11";

        let test_file = PathBuf::from("test_points_rust_partition.csv");
        fs::write(&test_file, test_csv).expect("Failed to create test CSV");

        let points = read_points_from_file(&test_file).expect("Failed to read CSV");
        assert_eq!(points.len(), 4);

        let options = PartitionerOptions {
            seed: Some(7),
            ..Default::default()
        };
        let mut partitioner = Algorithm::KMeans.build(&options);
        assert!(partitioner.set_k(2));

        let mut profile = PartitioningProfile::default();
        let clusters = partitioner
            .partition(&points, &mut profile)
            .expect("Failed to partition");
        assert!(is_exact_partition(&clusters, points.len()));

        let mut out = Vec::new();
        write_labeled_points(&mut out, &points, &clusters).expect("Failed to write CSV");
        let out = String::from_utf8(out).expect("CSV is not UTF-8");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x,y,cluster,color");

        // Both pairs end up together
        let cluster_of = |line: &str| line.split(',').nth(2).map(str::to_string);
        assert_eq!(cluster_of(lines[1]), cluster_of(lines[2]));
        assert_eq!(cluster_of(lines[3]), cluster_of(lines[4]));
        assert_ne!(cluster_of(lines[1]), cluster_of(lines[3]));
        assert!(lines[1].contains('#'));

        // Clean up
        fs::remove_file(&test_file).ok();
    }

    #[test]
    fn test_read_points_formats() {
        let test_cases: Vec<(&str, &str, Vec<(i32, i32)>)> = vec![
            ("with header", "x,y\n1,2\n3,4\n", vec![(1, 2), (3, 4)]),
            ("without header", "1,2\n-3,4\n", vec![(1, 2), (-3, 4)]),
            ("extra columns", "5,6,label\n7,8,other\n", vec![(5, 6), (7, 8)]),
            ("spaces", " 1 , 2\n", vec![(1, 2)]),
            ("bad rows skipped", "1,2\nfoo,3\n4\n5,6\n", vec![(1, 2), (5, 6)]),
            ("empty", "", vec![]),
        ];

        for (name, csv, expected) in test_cases {
            let points = read_points(csv.as_bytes()).expect(name);
            let expected: Vec<Point> = expected.into_iter().map(Point::from).collect();
            assert_eq!(points, expected, "Test case: {}", name);
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(read_points_from_file(&PathBuf::from("does_not_exist_partition.csv")).is_err());
    }
}
