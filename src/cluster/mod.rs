//! Marker clustering algorithms.
//!
//! This module groups positioned map items into clusters for a viewport.
//!
//! ## Pixel space
//!
//! All decisions are made in world-pixel space at the viewport's integer zoom
//! level (see [`crate::projection`]). Distances and cell sizes are screen
//! pixels, so the same configuration produces visually similar clusters at
//! every zoom while covering less ground as the map zooms in.
//!
//! ## Algorithms
//!
//! ### Grid-based
//!
//! Cuts the world into fixed-size pixel cells; each occupied cell is a group.
//! Centroid: mean of the members' pixel positions. O(n).
//!
//! ### Distance-based (non-hierarchical)
//!
//! Greedy single pass in insertion order: each unclustered item seeds a group
//! and absorbs the unclustered items within a pixel radius of the seed.
//! Centroid: the seed's position.
//!
//! ### Visible distance-based
//!
//! Distance-based clustering over the on-screen items only; off-screen items
//! stay singletons. Only available on platforms whose native SDK ships it.
//!
//! ## Shared rules
//!
//! - Every item lands in exactly one output cluster.
//! - Groups smaller than `min_cluster_size` are emitted as singletons.
//! - Above `max_zoom_for_cluster` every item is a singleton.
//!
//! ## Usage
//!
//! ```rust
//! use markercluster::cluster::{ClusterAlgorithm, DistanceBased, GridBased};
//! use markercluster::{Item, ItemId, LatLng, Viewport};
//!
//! let items = vec![
//!     Item::new(ItemId(1), LatLng::new(0.0, 0.0), "a"),
//!     Item::new(ItemId(2), LatLng::new(0.0, 0.0001), "b"),
//!     Item::new(ItemId(3), LatLng::new(10.0, 10.0), "c"),
//! ];
//! let viewport = Viewport::world(15.0);
//!
//! let clusters = GridBased::new(100.0).cluster(&items, &viewport);
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].len(), 2);
//!
//! let clusters = DistanceBased::new(100.0).cluster(&items, &viewport);
//! assert_eq!(clusters.len(), 2);
//! ```

mod distance;
mod grid;
mod strategy;
mod traits;
mod types;
mod util;

pub use distance::{DistanceBased, VisibleDistanceBased};
pub use grid::GridBased;
pub use strategy::ClusterStrategy;
pub use traits::ClusterAlgorithm;
pub use types::{Cluster, ClusterKey, MarkerKey};
