//! The cluster manager: live item set, lifecycle, re-clustering and clicks.
//!
//! ## Lifecycle
//!
//! A manager starts detached. A cluster request made
//! while detached is remembered and replayed as soon as a viewport source is
//! attached; while attached, requests run immediately against the source's
//! current viewport.
//!
//! ## Threading
//!
//! One owner. Mutations, clustering and click handling all take `&mut self`,
//! so callers serialize them (UI thread, task queue, or an outer mutex).
//! Clicks that arrive for markers a newer pass already removed resolve to
//! nothing instead of failing.

use std::collections::VecDeque;

use crate::cluster::{ClusterAlgorithm, ClusterKey, ClusterStrategy, MarkerKey};
use crate::error::{Error, Result};
use crate::item::{Item, ItemId, ItemStore};
use crate::options::{ClusterOptions, Platform};
use crate::projection::LatLng;
use crate::render::{RenderDiff, RenderDiffer};
use crate::viewport::{Viewport, ViewportSource};

/// Rendering state of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Items or options changed since the last render (or nothing rendered yet).
    Idle,
    /// A clustering pass is running.
    Clustering,
    /// The rendered markers reflect the current items and options.
    Rendered,
}

/// Payload of a cluster click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterClicked {
    /// Positions of the cluster's members that are still live.
    pub members: Vec<LatLng>,
    /// Member count of the clicked marker.
    pub count: usize,
    /// Marker position.
    pub centroid: LatLng,
}

/// Events surfaced to the UI layer, drained with [`ClusterManager::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterEvent {
    ClusterClicked(ClusterClicked),
    ItemClicked(ItemId),
    ItemInfoWindowClicked(ItemId),
    ItemInfoWindowLongClicked(ItemId),
    SelectionChanged(Option<ItemId>),
}

/// Handle for an attached viewport source. Pass it back to
/// [`ClusterManager::detach`] to release the source.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the subscription is needed to detach the viewport source"]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of [`ClusterManager::attach`].
#[derive(Debug)]
pub struct Attachment {
    pub subscription: Subscription,
    /// Render diff of a cluster request deferred while detached.
    pub replayed: Option<RenderDiff>,
}

enum Lifecycle {
    Detached {
        deferred: bool,
    },
    Attached {
        subscription: u64,
        source: Box<dyn ViewportSource>,
    },
}

/// Owns the live items and turns them into marker updates.
pub struct ClusterManager<T> {
    options: ClusterOptions,
    platform: Platform,
    strategy: ClusterStrategy,
    items: ItemStore<T>,
    differ: RenderDiffer,
    lifecycle: Lifecycle,
    state: ManagerState,
    selected: Option<ItemId>,
    events: VecDeque<ClusterEvent>,
    next_subscription: u64,
}

impl<T> ClusterManager<T> {
    /// Create a manager. Fails if `platform` lacks the configured algorithm.
    pub fn new(options: ClusterOptions, platform: Platform) -> Result<Self> {
        options.validate(platform)?;
        log::info!(
            "cluster manager configured: {:?} on {:?}, bucket {} px, min size {}, max zoom {}",
            options.algorithm,
            platform,
            options.bucket_size_px,
            options.min_cluster_size,
            options.max_zoom_for_cluster
        );
        Ok(Self {
            strategy: ClusterStrategy::from_options(&options),
            options,
            platform,
            items: ItemStore::new(),
            differ: RenderDiffer::new(),
            lifecycle: Lifecycle::Detached { deferred: false },
            state: ManagerState::Idle,
            selected: None,
            events: VecDeque::new(),
            next_subscription: 0,
        })
    }

    /// Replace the options. On failure the previous options stay in effect.
    pub fn configure(&mut self, options: ClusterOptions) -> Result<()> {
        options.validate(self.platform)?;
        log::info!("cluster options changed: {:?}", options);
        self.strategy = ClusterStrategy::from_options(&options);
        self.options = options;
        self.state = ManagerState::Idle;
        Ok(())
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Whether items or options changed since the last render.
    pub fn needs_cluster(&self) -> bool {
        self.state != ManagerState::Rendered
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Attached { .. })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.len() == 0
    }

    pub fn item(&self, id: ItemId) -> Option<&Item<T>> {
        self.items.get(id)
    }

    /// Live items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item<T>> + '_ {
        self.items.iter()
    }

    /// Replace the whole live set.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item<T>>) {
        self.items.clear();
        for item in items {
            self.items.insert(item);
        }
        if let Some(selected) = self.selected {
            if self.items.get(selected).is_none() {
                self.set_selection(None);
            }
        }
        self.state = ManagerState::Idle;
    }

    /// Add an item. An item with the same id is replaced and returned.
    pub fn add_item(&mut self, item: Item<T>) -> Option<Item<T>> {
        self.state = ManagerState::Idle;
        self.items.insert(item)
    }

    /// Remove an item by id. Clears the selection if it pointed at the item.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item<T>> {
        let removed = self.items.remove(id)?;
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        self.state = ManagerState::Idle;
        Some(removed)
    }

    /// Move an item. Returns `false` for unknown ids.
    pub fn update_item_position(&mut self, id: ItemId, position: LatLng) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.set_position(position);
                self.state = ManagerState::Idle;
                true
            }
            None => false,
        }
    }

    /// Attach a viewport source, replaying a cluster request deferred while detached.
    ///
    /// Attaching while already attached replaces the source; the earlier
    /// subscription becomes stale.
    pub fn attach<S>(&mut self, source: S) -> Attachment
    where
        S: ViewportSource + 'static,
    {
        let deferred = match &self.lifecycle {
            Lifecycle::Detached { deferred } => *deferred,
            Lifecycle::Attached { subscription, .. } => {
                log::warn!("replacing viewport source of subscription {subscription}");
                false
            }
        };

        self.next_subscription += 1;
        let id = self.next_subscription;
        let viewport = source.viewport();
        self.lifecycle = Lifecycle::Attached {
            subscription: id,
            source: Box::new(source),
        };
        log::info!("viewport source attached (subscription {id})");

        let replayed = deferred.then(|| {
            log::debug!("replaying deferred cluster request");
            self.cluster(&viewport)
        });

        Attachment {
            subscription: Subscription(id),
            replayed,
        }
    }

    /// Detach the viewport source and hand it back.
    pub fn detach(&mut self, subscription: Subscription) -> Result<Box<dyn ViewportSource>> {
        match &self.lifecycle {
            Lifecycle::Attached {
                subscription: active,
                ..
            } if *active == subscription.0 => {}
            _ => return Err(Error::StaleSubscription(subscription.0)),
        }

        let previous = std::mem::replace(
            &mut self.lifecycle,
            Lifecycle::Detached { deferred: false },
        );
        log::info!("viewport source detached (subscription {})", subscription.0);
        match previous {
            Lifecycle::Attached { source, .. } => Ok(source),
            Lifecycle::Detached { .. } => Err(Error::StaleSubscription(subscription.0)),
        }
    }

    /// Ask for a re-cluster.
    ///
    /// Runs immediately against the attached viewport and returns the diff, or
    /// defers the request until [`ClusterManager::attach`] when detached.
    pub fn request_cluster(&mut self) -> Option<RenderDiff> {
        match &mut self.lifecycle {
            Lifecycle::Detached { deferred } => {
                log::debug!("cluster requested while detached, deferring");
                *deferred = true;
                None
            }
            Lifecycle::Attached { source, .. } => {
                let viewport = source.viewport();
                Some(self.cluster(&viewport))
            }
        }
    }

    /// Cluster the live items for `viewport` and diff against the previous render.
    pub fn cluster(&mut self, viewport: &Viewport) -> RenderDiff {
        self.state = ManagerState::Clustering;

        let items: Vec<&Item<T>> = self.items.iter().collect();
        let clusters = self.strategy.cluster(&items, viewport);
        log::debug!(
            "{} clustered {} items into {} markers at zoom {}",
            self.strategy.name(),
            items.len(),
            clusters.len(),
            viewport.zoom()
        );

        let diff = self.differ.diff(clusters);
        log::debug!(
            "render diff: {} removals, {} additions",
            diff.removals().count(),
            diff.additions().count()
        );

        self.state = ManagerState::Rendered;
        diff
    }

    /// Currently rendered markers.
    pub fn rendered(&self) -> &RenderDiffer {
        &self.differ
    }

    /// Handle a click on a cluster marker. Always consumes the click.
    ///
    /// Queues [`ClusterEvent::ClusterClicked`] when the cluster is still rendered.
    pub fn handle_cluster_click(&mut self, key: &ClusterKey) -> bool {
        let marker = MarkerKey::Cluster(key.clone());
        match self.differ.get(&marker) {
            Some(cluster) => {
                let members = cluster
                    .members()
                    .iter()
                    .filter_map(|id| self.items.get(*id).map(Item::position))
                    .collect();
                let clicked = ClusterClicked {
                    members,
                    count: cluster.len(),
                    centroid: cluster.position(),
                };
                self.events.push_back(ClusterEvent::ClusterClicked(clicked));
            }
            None => log::trace!("click on stale {key}"),
        }
        true
    }

    /// Resolve a click on a singleton marker back to its item and select it.
    ///
    /// Returns `None` if the item is gone, e.g. removed by a pass that raced
    /// the click.
    pub fn handle_item_click(&mut self, id: ItemId) -> Option<&Item<T>> {
        if self.items.get(id).is_none() {
            log::trace!("click on stale {id}");
            return None;
        }
        self.set_selection(Some(id));
        self.events.push_back(ClusterEvent::ItemClicked(id));
        self.items.get(id)
    }

    /// Resolve a click on an item's info window.
    pub fn handle_info_window_click(&mut self, id: ItemId) -> Option<&Item<T>> {
        if self.items.get(id).is_none() {
            log::trace!("info window click on stale {id}");
            return None;
        }
        self.events.push_back(ClusterEvent::ItemInfoWindowClicked(id));
        self.items.get(id)
    }

    /// Resolve a long press on an item's info window.
    pub fn handle_info_window_long_click(&mut self, id: ItemId) -> Option<&Item<T>> {
        if self.items.get(id).is_none() {
            log::trace!("info window long click on stale {id}");
            return None;
        }
        self.events.push_back(ClusterEvent::ItemInfoWindowLongClicked(id));
        self.items.get(id)
    }

    /// The info window of `id` closed; drop the selection if it was that item.
    pub fn handle_info_window_closed(&mut self, id: ItemId) {
        if self.selected == Some(id) {
            self.set_selection(None);
        }
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected
    }

    /// Select an item (or clear the selection). Unknown ids are rejected.
    pub fn select_item(&mut self, id: Option<ItemId>) -> bool {
        if let Some(id) = id {
            if self.items.get(id).is_none() {
                return false;
            }
        }
        self.set_selection(id);
        true
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ClusterEvent> + '_ {
        self.events.drain(..)
    }

    fn set_selection(&mut self, id: Option<ItemId>) {
        if self.selected != id {
            self.selected = id;
            self.events.push_back(ClusterEvent::SelectionChanged(id));
        }
    }
}
