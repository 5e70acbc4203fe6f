use std::collections::HashSet;

use markercluster::cluster::{ClusterAlgorithm, DistanceBased, GridBased};
use markercluster::{
    Algorithm, Cluster, ClusterManager, ClusterOptions, Item, ItemId, LatLng, Pixel, Platform,
    Projection, Viewport,
};
use proptest::prelude::*;

fn items_from(positions: &[(f64, f64)]) -> Vec<Item<usize>> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &(lat, lng))| Item::new(ItemId(i as u64), LatLng::new(lat, lng), i))
        .collect()
}

fn assert_partition(clusters: &[Cluster], n: usize) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for cluster in clusters {
        prop_assert!(!cluster.is_empty());
        for id in cluster.members() {
            prop_assert!(seen.insert(*id), "{:?} appears twice", id);
        }
    }
    prop_assert_eq!(seen.len(), n);
    Ok(())
}

fn position_sets() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-80.0f64..80.0, -179.0f64..179.0), 1..60)
}

fn algorithms() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::GridBased),
        Just(Algorithm::DistanceBased),
        Just(Algorithm::VisibleNonHierarchicalDistanceBased),
    ]
}

proptest! {
    #[test]
    fn prop_every_item_in_exactly_one_cluster(
        positions in position_sets(),
        zoom in 0.0f64..22.0,
        bucket in 10.0f64..200.0,
    ) {
        let items = items_from(&positions);
        let viewport = Viewport::world(zoom);

        let grid = GridBased::new(bucket).cluster(&items, &viewport);
        assert_partition(&grid, items.len())?;

        let distance = DistanceBased::new(bucket).cluster(&items, &viewport);
        assert_partition(&distance, items.len())?;
    }

    #[test]
    fn prop_manager_is_deterministic(
        positions in position_sets(),
        zoom in 0.0f64..20.0,
        algorithm in algorithms(),
    ) {
        let mut manager = ClusterManager::new(ClusterOptions::new(algorithm), Platform::Android).unwrap();
        manager.set_items(items_from(&positions));
        let viewport = Viewport::world(zoom);

        let first = manager.cluster(&viewport);
        assert_partition(&first.additions().cloned().collect::<Vec<_>>(), positions.len())?;
        let rendered: Vec<Cluster> = manager.rendered().rendered().cloned().collect();

        let second = manager.cluster(&viewport);
        prop_assert!(second.is_empty());
        let again: Vec<Cluster> = manager.rendered().rendered().cloned().collect();
        prop_assert_eq!(rendered, again);
    }

    #[test]
    fn prop_above_max_zoom_all_singletons(
        positions in position_sets(),
        max_zoom in 0u8..20,
        algorithm in algorithms(),
    ) {
        let options = ClusterOptions::new(algorithm).with_max_zoom_for_cluster(max_zoom);
        let mut manager = ClusterManager::new(options, Platform::Android).unwrap();
        manager.set_items(items_from(&positions));

        let diff = manager.cluster(&Viewport::world(f64::from(max_zoom) + 0.5));
        let added: Vec<&Cluster> = diff.additions().collect();
        prop_assert_eq!(added.len(), positions.len());
        prop_assert!(added.iter().all(|cluster| cluster.is_singleton()));
    }

    #[test]
    fn prop_grid_same_cell_merges(
        cell_x in 10i64..1000,
        cell_y in 10i64..1000,
        offsets in prop::collection::vec((0.05f64..0.95, 0.05f64..0.95), 2..8),
    ) {
        let zoom = 12.0;
        let cell = 100.0;
        let projection = Projection::new(zoom);
        let items: Vec<Item<()>> = offsets
            .iter()
            .enumerate()
            .map(|(i, &(dx, dy))| {
                let pixel = Pixel::new(
                    (cell_x as f64 + dx) * cell,
                    (cell_y as f64 + dy) * cell,
                );
                Item::new(ItemId(i as u64), projection.to_lat_lng(pixel), ())
            })
            .collect();

        let clusters = GridBased::new(cell).cluster(&items, &Viewport::world(zoom));
        prop_assert_eq!(clusters.len(), 1);
        prop_assert_eq!(clusters[0].len(), items.len());
    }

    #[test]
    fn prop_distance_far_items_stay_apart(
        count in 2usize..10,
        threshold in 20.0f64..150.0,
    ) {
        let zoom = 12.0;
        let projection = Projection::new(zoom);
        // Spaced at twice the threshold along a line: no seed reaches a neighbour.
        let items: Vec<Item<()>> = (0..count)
            .map(|i| {
                let pixel = Pixel::new(10_000.0 + i as f64 * threshold * 2.0, 10_000.0);
                Item::new(ItemId(i as u64), projection.to_lat_lng(pixel), ())
            })
            .collect();

        let clusters = DistanceBased::new(threshold).cluster(&items, &Viewport::world(zoom));
        prop_assert_eq!(clusters.len(), count);
    }

    #[test]
    fn prop_distance_items_near_seed_merge(
        offsets in prop::collection::vec((-0.6f64..0.6, -0.6f64..0.6), 1..10),
        threshold in 20.0f64..150.0,
    ) {
        let zoom = 12.0;
        let projection = Projection::new(zoom);
        let seed = Pixel::new(20_000.0, 20_000.0);
        let mut items = vec![Item::new(ItemId(0), projection.to_lat_lng(seed), ())];
        for (i, &(dx, dy)) in offsets.iter().enumerate() {
            // |offset| <= 0.6 * sqrt(2) < 1, so every point is within the threshold.
            let pixel = Pixel::new(seed.x + dx * threshold, seed.y + dy * threshold);
            items.push(Item::new(ItemId(i as u64 + 1), projection.to_lat_lng(pixel), ()));
        }

        let clusters = DistanceBased::new(threshold).cluster(&items, &Viewport::world(zoom));
        prop_assert_eq!(clusters.len(), 1);
        prop_assert_eq!(clusters[0].len(), items.len());
    }

    #[test]
    fn prop_projection_roundtrip(
        lat in -85.0f64..85.0,
        lng in -180.0f64..180.0,
        zoom in 0.0f64..22.0,
    ) {
        let projection = Projection::new(zoom);
        let back = projection.to_lat_lng(projection.to_pixel(LatLng::new(lat, lng)));
        prop_assert!((back.lat - lat).abs() < 1e-6);
        prop_assert!((back.lng - lng).abs() < 1e-6);
    }
}
