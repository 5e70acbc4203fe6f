//! Grid-based clustering.
//!
//! The world at the current (discrete) zoom level is cut into square cells of
//! a fixed screen-pixel size. Every occupied cell is one group. Because the
//! cell size is fixed in pixels, cluster granularity looks the same on screen
//! at every zoom level while covering less ground as the map zooms in.
//!
//! ## Cell assignment
//!
//! ```text
//! cell = (floor(x / cell_size), floor(y / cell_size))
//! ```
//!
//! Cells are half-open, `[n * cell_size, (n + 1) * cell_size)`, so a point
//! exactly on a boundary belongs to the higher-indexed cell.
//!
//! ## Centroid
//!
//! The arithmetic mean of the members' pixel positions, projected back to
//! latitude/longitude.
//!
//! ## Complexity
//!
//! O(n) time and space with one hash map lookup per item.

use std::collections::HashMap;

use super::traits::ClusterAlgorithm;
use super::types::Cluster;
use super::util;
use crate::item::{ClusterItem, ItemId};
use crate::projection::{LatLng, Pixel};
use crate::viewport::Viewport;

/// Grid-based clustering algorithm.
#[derive(Debug, Clone)]
pub struct GridBased {
    /// Cell edge length in screen pixels.
    cell_size_px: f64,
    /// Minimum members for a cell to render as a cluster.
    min_cluster_size: usize,
    /// Above this zoom every item is a singleton.
    max_zoom_for_cluster: u8,
}

#[derive(Default)]
struct Cell {
    members: Vec<(ItemId, LatLng)>,
    sum_x: f64,
    sum_y: f64,
}

impl Cell {
    fn push(&mut self, id: ItemId, position: LatLng, pixel: Pixel) {
        self.members.push((id, position));
        self.sum_x += pixel.x;
        self.sum_y += pixel.y;
    }

    fn mean(&self) -> Pixel {
        let n = self.members.len() as f64;
        Pixel::new(self.sum_x / n, self.sum_y / n)
    }
}

impl GridBased {
    /// Create a grid clusterer with `cell_size_px` cells.
    ///
    /// Defaults: `min_cluster_size = 2`, `max_zoom_for_cluster = 20`.
    pub fn new(cell_size_px: f64) -> Self {
        Self {
            cell_size_px,
            min_cluster_size: 2,
            max_zoom_for_cluster: 20,
        }
    }

    /// Set the minimum number of members for a cell to become a cluster.
    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Set the zoom level above which clustering is disabled.
    pub fn with_max_zoom_for_cluster(mut self, max_zoom_for_cluster: u8) -> Self {
        self.max_zoom_for_cluster = max_zoom_for_cluster;
        self
    }

    pub fn cell_size_px(&self) -> f64 {
        self.cell_size_px
    }

    /// Floored cell coordinates. Kept as `f64` so tiny cells at deep zoom
    /// never saturate an integer cast and collapse distinct cells.
    #[inline]
    fn cell_of(&self, pixel: Pixel) -> (f64, f64) {
        (
            (pixel.x / self.cell_size_px).floor(),
            (pixel.y / self.cell_size_px).floor(),
        )
    }

    /// Hashable key for a cell. `+ 0.0` folds `-0.0` into `0.0`.
    #[inline]
    fn cell_key(&self, pixel: Pixel) -> (u64, u64) {
        let (cx, cy) = self.cell_of(pixel);
        ((cx + 0.0).to_bits(), (cy + 0.0).to_bits())
    }
}

impl Default for GridBased {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ClusterAlgorithm for GridBased {
    fn cluster<I: ClusterItem>(&self, items: &[I], viewport: &Viewport) -> Vec<Cluster> {
        if util::clustering_disabled(viewport, self.max_zoom_for_cluster) {
            return util::singletons(items);
        }

        let projection = viewport.projection();

        // Cells are kept in order of first appearance so output follows input order.
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut cells: Vec<Cell> = Vec::new();

        for item in items {
            let position = item.position();
            let pixel = projection.to_pixel(position);
            let slot = *index.entry(self.cell_key(pixel)).or_insert_with(|| {
                cells.push(Cell::default());
                cells.len() - 1
            });
            cells[slot].push(item.id(), position, pixel);
        }

        let mut out = Vec::with_capacity(cells.len());
        for cell in cells {
            let mean = cell.mean();
            util::emit_group(
                cell.members,
                self.min_cluster_size,
                || projection.to_lat_lng(mean),
                &mut out,
            );
        }
        out
    }

    fn name(&self) -> &'static str {
        "grid_based"
    }
}
