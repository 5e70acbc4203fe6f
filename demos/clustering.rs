//! Grid and distance clustering of a handful of markers while zooming in.

use markercluster::{
    Algorithm, ClusterEvent, ClusterManager, ClusterOptions, Item, ItemId, LatLng, MarkerKey,
    Platform, RenderOp, Viewport,
};

fn main() -> markercluster::Result<()> {
    env_logger::init();

    // Three neighbourhoods of a city plus one distant marker.
    let places = [
        // Downtown
        (47.6062, -122.3321),
        (47.6070, -122.3330),
        (47.6055, -122.3310),
        // Capitol Hill
        (47.6253, -122.3222),
        (47.6260, -122.3200),
        // Ballard
        (47.6687, -122.3847),
        // Far away
        (45.5152, -122.6784),
    ];
    let items: Vec<Item<&str>> = places
        .iter()
        .enumerate()
        .map(|(i, &(lat, lng))| Item::new(ItemId(i as u64), LatLng::new(lat, lng), "pin"))
        .collect();

    for algorithm in [Algorithm::GridBased, Algorithm::DistanceBased] {
        let mut manager = ClusterManager::new(ClusterOptions::new(algorithm), Platform::Android)?;
        manager.set_items(items.iter().cloned());

        // Requested before a map is attached: replayed on attach.
        manager.request_cluster();
        let attachment = manager.attach(Viewport::world(8.0));

        println!("=== {algorithm:?} ===");
        if let Some(diff) = attachment.replayed {
            println!("  zoom  8: {} markers", diff.additions().count());
        }

        for zoom in [11.0, 14.0, 17.0] {
            let diff = manager.cluster(&Viewport::world(zoom));
            println!("  zoom {zoom:2}: {} markers", manager.rendered().len());
            for op in diff.ops() {
                match op {
                    RenderOp::Remove(MarkerKey::Item(id)) => println!("    - {id}"),
                    RenderOp::Remove(MarkerKey::Cluster(key)) => println!("    - {key}"),
                    RenderOp::Add(cluster) => println!(
                        "    + {} item(s) at ({:.4}, {:.4})",
                        cluster.len(),
                        cluster.position().lat,
                        cluster.position().lng
                    ),
                }
            }
        }

        manager.handle_item_click(ItemId(6));
        for event in manager.drain_events() {
            if let ClusterEvent::ItemClicked(id) = event {
                println!("  clicked {id}");
            }
        }

        manager.detach(attachment.subscription)?;
    }

    Ok(())
}
