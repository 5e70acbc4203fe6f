//! Minimal marker updates between two clustering passes.
//!
//! Markers that are unchanged between passes (same membership and same
//! position) are left alone; everything else is removed and re-added. All
//! removals are emitted before any addition so overlapping old and new
//! markers are never on the map at the same time.

use std::collections::{HashMap, HashSet};

use crate::cluster::{Cluster, MarkerKey};

/// One marker instruction for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Take the marker with this key off the map.
    Remove(MarkerKey),
    /// Put a marker for this cluster (or singleton) on the map.
    Add(Cluster),
}

/// Ordered marker instructions: every `Remove` precedes every `Add`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDiff {
    ops: Vec<RenderOp>,
}

impl RenderDiff {
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<RenderOp> {
        self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn removals(&self) -> impl Iterator<Item = &MarkerKey> + '_ {
        self.ops.iter().filter_map(|op| match op {
            RenderOp::Remove(key) => Some(key),
            RenderOp::Add(_) => None,
        })
    }

    pub fn additions(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.ops.iter().filter_map(|op| match op {
            RenderOp::Add(cluster) => Some(cluster),
            RenderOp::Remove(_) => None,
        })
    }
}

/// Tracks the rendered marker set and diffs new clusterings against it.
#[derive(Debug, Default)]
pub struct RenderDiffer {
    rendered: HashMap<MarkerKey, Cluster>,
    order: Vec<MarkerKey>,
}

impl RenderDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendered set with `next` and return the operations that
    /// get the map from the old set to the new one.
    pub fn diff(&mut self, next: Vec<Cluster>) -> RenderDiff {
        let mut next_rendered: HashMap<MarkerKey, Cluster> = HashMap::with_capacity(next.len());
        let mut next_order = Vec::with_capacity(next.len());
        for cluster in next {
            let key = cluster.key();
            next_order.push(key.clone());
            next_rendered.insert(key, cluster);
        }

        let unchanged: HashSet<&MarkerKey> = next_order
            .iter()
            .filter(|key| match (self.rendered.get(*key), next_rendered.get(*key)) {
                (Some(old), Some(new)) => old.position() == new.position(),
                _ => false,
            })
            .collect();

        let mut ops = Vec::new();
        for key in &self.order {
            if !unchanged.contains(key) {
                ops.push(RenderOp::Remove(key.clone()));
            }
        }
        for key in &next_order {
            if !unchanged.contains(key) {
                if let Some(cluster) = next_rendered.get(key) {
                    ops.push(RenderOp::Add(cluster.clone()));
                }
            }
        }

        self.rendered = next_rendered;
        self.order = next_order;
        RenderDiff { ops }
    }

    /// The currently rendered marker for `key`, if any.
    pub fn get(&self, key: &MarkerKey) -> Option<&Cluster> {
        self.rendered.get(key)
    }

    /// Rendered markers in render order.
    pub fn rendered(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.order.iter().filter_map(|key| self.rendered.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
