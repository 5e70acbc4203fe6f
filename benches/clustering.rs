use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markercluster::cluster::{ClusterAlgorithm, DistanceBased, GridBased};
use markercluster::{Algorithm, ClusterManager, ClusterOptions, Item, ItemId, LatLng, Platform, Viewport};
use rand::prelude::*;

fn synthetic_items(n: usize) -> Vec<Item<()>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let lat = rng.random_range(47.0..48.0);
            let lng = rng.random_range(-123.0..-122.0);
            Item::new(ItemId(i as u64), LatLng::new(lat, lng), ())
        })
        .collect()
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");
    let items = synthetic_items(2000);
    let viewport = Viewport::world(11.0);

    group.bench_function("grid_n2000_z11", |b| {
        let algo = GridBased::new(100.0);
        b.iter(|| algo.cluster(black_box(items.as_slice()), &viewport))
    });

    group.bench_function("distance_n2000_z11", |b| {
        let algo = DistanceBased::new(100.0);
        b.iter(|| algo.cluster(black_box(items.as_slice()), &viewport))
    });

    group.finish();
}

fn bench_manager(c: &mut Criterion) {
    let items = synthetic_items(2000);

    c.bench_function("manager_zoom_sweep_n2000", |b| {
        b.iter(|| {
            let mut manager =
                ClusterManager::new(ClusterOptions::new(Algorithm::DistanceBased), Platform::Android)
                    .unwrap();
            manager.set_items(items.iter().cloned());
            for zoom in 8..16 {
                black_box(manager.cluster(&Viewport::world(f64::from(zoom))));
            }
        })
    });
}

criterion_group!(benches, bench_algorithms, bench_manager);
criterion_main!(benches);
