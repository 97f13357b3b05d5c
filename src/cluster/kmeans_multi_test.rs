#[cfg(test)]
mod tests {
    use super::super::*;

    fn blob(x: i32, y: i32) -> PointList {
        (0..4)
            .flat_map(|dx| (0..4).map(move |dy| Point::new(x + dx, y + dy)))
            .collect()
    }

    #[test]
    fn test_selects_three_blobs() {
        let mut points = blob(0, 0);
        points.extend(blob(1000, 500));
        points.extend(blob(1997, 0));

        for seed in 0..5 {
            let mut multi = KMeansMulti::new()
                .with_seed(seed)
                .with_k(3)
                .with_initialization(Initialization::Stratified);
            let mut profile = PartitioningProfile::default();
            let clusters = multi.partition(&points, &mut profile).unwrap();

            assert_eq!(multi.best_k(), Some(3));
            assert_eq!(clusters.len(), 3);
            assert!(is_exact_partition(&clusters, points.len()));
            for (i, cluster) in clusters.iter().enumerate() {
                assert_eq!(cluster.members, (i * 16..(i + 1) * 16).collect::<Vec<_>>());
            }

            // Sweep over K = 1, 2, 3 plus the final run, one pass at least each
            assert!(profile.iterations >= 4);
        }
    }

    #[test]
    fn test_duplicated_coordinates() {
        // Two distinct coordinates repeated: K = 2 already reaches zero
        let mut points = vec![Point::new(5, 5); 10];
        points.extend(vec![Point::new(50, 50); 10]);

        let mut multi = KMeansMulti::new().with_seed(3).with_k(2);
        let clusters = multi
            .partition(&points, &mut PartitioningProfile::default())
            .unwrap();

        assert_eq!(multi.best_k(), Some(2));
        assert_eq!(dissimilarity(&clusters, &points), 0);
    }

    #[test]
    fn test_k_one_only() {
        let points = blob(10, 10);
        let mut multi = KMeansMulti::new().with_seed(1).with_k(1);
        let mut profile = PartitioningProfile::default();
        let clusters = multi.partition(&points, &mut profile).unwrap();

        assert_eq!(multi.best_k(), Some(1));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].representative, Point::new(11, 11));
        // One or two passes for the sweep, the same for the final run
        assert!((2..=4).contains(&profile.iterations));
    }

    #[test]
    fn test_max_k_needs_enough_observations() {
        let points = blob(0, 0);
        let mut multi = KMeansMulti::new().with_seed(1).with_k(20);

        assert_eq!(
            multi.partition(&points, &mut PartitioningProfile::default()),
            Err(PartitionError::InsufficientObservations { k: 20, distinct: 16 })
        );
        assert_eq!(multi.best_k(), None);
    }
}
