//! Non-hierarchical distance-based clustering.
//!
//! # The Algorithm
//!
//! A single greedy pass over the items in insertion order:
//!
//! 1. The first item not yet in a cluster becomes a seed.
//! 2. Every other unclustered item within `max_distance_px` of the seed's own
//!    pixel position is absorbed into the seed's group.
//! 3. Absorbed items are never reconsidered by later seeds.
//!
//! The seed's position is the cluster centroid. There is no re-centering and
//! no second merge pass, which keeps the work to one pass and the output
//! reproducible for identical input.
//!
//! The radius is fixed in screen pixels, so its ground distance halves with
//! every zoom level.
//!
//! ## Complexity
//!
//! Neighbourhoods come from an R-tree over the projected positions:
//! O(n log n) to build, then one radius query per seed. The worst case (every
//! query returning most of the set) is still O(n²), which is fine for
//! on-screen marker counts.
//!
//! ## Visible variant
//!
//! [`VisibleDistanceBased`] only clusters items inside the viewport (padded by
//! the absorb radius). Items outside it are returned as singletons.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use super::traits::ClusterAlgorithm;
use super::types::Cluster;
use super::util;
use crate::item::ClusterItem;
use crate::viewport::Viewport;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Distance-based clustering algorithm.
#[derive(Debug, Clone)]
pub struct DistanceBased {
    /// Absorb radius around a seed, in screen pixels.
    max_distance_px: f64,
    /// Minimum members for a group to render as a cluster.
    min_cluster_size: usize,
    /// Above this zoom every item is a singleton.
    max_zoom_for_cluster: u8,
}

impl DistanceBased {
    /// Create a distance-based clusterer.
    ///
    /// Defaults: `min_cluster_size = 2`, `max_zoom_for_cluster = 20`.
    pub fn new(max_distance_px: f64) -> Self {
        Self {
            max_distance_px,
            min_cluster_size: 2,
            max_zoom_for_cluster: 20,
        }
    }

    /// Set the minimum number of members for a group to become a cluster.
    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Set the zoom level above which clustering is disabled.
    pub fn with_max_zoom_for_cluster(mut self, max_zoom_for_cluster: u8) -> Self {
        self.max_zoom_for_cluster = max_zoom_for_cluster;
        self
    }

    pub fn max_distance_px(&self) -> f64 {
        self.max_distance_px
    }
}

impl Default for DistanceBased {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ClusterAlgorithm for DistanceBased {
    fn cluster<I: ClusterItem>(&self, items: &[I], viewport: &Viewport) -> Vec<Cluster> {
        if util::clustering_disabled(viewport, self.max_zoom_for_cluster) {
            return util::singletons(items);
        }

        let projection = viewport.projection();
        let points: Vec<IndexedPoint> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let pixel = projection.to_pixel(item.position());
                GeomWithData::new([pixel.x, pixel.y], idx)
            })
            .collect();
        let seeds: Vec<[f64; 2]> = points.iter().map(|p| *p.geom()).collect();
        let tree = RTree::bulk_load(points);

        let radius_squared = self.max_distance_px * self.max_distance_px;
        let mut clustered = vec![false; items.len()];
        let mut out = Vec::new();

        for seed in 0..items.len() {
            if clustered[seed] {
                continue;
            }
            clustered[seed] = true;

            let mut members = vec![seed];
            for neighbor in tree.locate_within_distance(seeds[seed], radius_squared) {
                if !clustered[neighbor.data] {
                    clustered[neighbor.data] = true;
                    members.push(neighbor.data);
                }
            }
            // Tree order is arbitrary; restore insertion order.
            members.sort_unstable();

            let seed_position = items[seed].position();
            util::emit_group(
                members
                    .into_iter()
                    .map(|idx| (items[idx].id(), items[idx].position()))
                    .collect(),
                self.min_cluster_size,
                || seed_position,
                &mut out,
            );
        }

        out
    }

    fn name(&self) -> &'static str {
        "distance_based"
    }
}

/// Distance-based clustering of the items inside the viewport only.
#[derive(Debug, Clone, Default)]
pub struct VisibleDistanceBased {
    inner: DistanceBased,
}

impl VisibleDistanceBased {
    pub fn new(inner: DistanceBased) -> Self {
        Self { inner }
    }
}

impl ClusterAlgorithm for VisibleDistanceBased {
    fn cluster<I: ClusterItem>(&self, items: &[I], viewport: &Viewport) -> Vec<Cluster> {
        if util::clustering_disabled(viewport, self.inner.max_zoom_for_cluster) {
            return util::singletons(items);
        }

        let projection = viewport.projection();
        let region = viewport.pixel_region(self.inner.max_distance_px);
        let (visible, hidden): (Vec<&I>, Vec<&I>) = items
            .iter()
            .partition(|item| region.contains(projection.to_pixel(item.position())));

        let mut out = self.inner.cluster(&visible, viewport);
        out.extend(util::singletons(&hidden));
        out
    }

    fn name(&self) -> &'static str {
        "visible_distance_based"
    }
}
