//! Map marker clustering.
//!
//! `markercluster` groups geo-positioned map items into clusters for the
//! current viewport and keeps a rendered marker set up to date with minimal
//! add/remove operations.
//!
//! - [`projection`]: Web Mercator conversions between lat/lng and world pixels.
//! - [`cluster`]: grid-based and distance-based clustering algorithms.
//! - [`render`]: diffs between successive clusterings.
//! - [`manager`]: the live item set, attach/detach lifecycle and click handling.
//!
//! ```rust
//! use markercluster::{
//!     Algorithm, ClusterManager, ClusterOptions, Item, ItemId, LatLng, Platform, Viewport,
//! };
//!
//! let mut manager = ClusterManager::new(ClusterOptions::new(Algorithm::GridBased), Platform::Android)?;
//! manager.add_item(Item::new(ItemId(1), LatLng::new(0.0, 0.0), "a"));
//! manager.add_item(Item::new(ItemId(2), LatLng::new(0.0, 0.0001), "b"));
//! manager.add_item(Item::new(ItemId(3), LatLng::new(10.0, 10.0), "c"));
//!
//! let diff = manager.cluster(&Viewport::world(15.0));
//! assert_eq!(diff.additions().count(), 2);
//! # Ok::<(), markercluster::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod item;
pub mod manager;
pub mod options;
pub mod projection;
pub mod render;
pub mod viewport;

pub use cluster::{
    Cluster, ClusterAlgorithm, ClusterKey, ClusterStrategy, DistanceBased, GridBased, MarkerKey,
    VisibleDistanceBased,
};
pub use error::{Error, Result};
pub use item::{ClusterItem, Item, ItemId};
pub use manager::{
    Attachment, ClusterClicked, ClusterEvent, ClusterManager, ManagerState, Subscription,
};
pub use options::{Algorithm, ClusterOptions, Platform};
pub use projection::{LatLng, Pixel, Projection};
pub use render::{RenderDiff, RenderDiffer, RenderOp};
pub use viewport::{LatLngBounds, Viewport, ViewportSource};
