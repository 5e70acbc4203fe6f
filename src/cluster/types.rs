use std::fmt;

use crate::item::ItemId;
use crate::projection::LatLng;

/// One output group of a clustering pass.
///
/// Clusters are recomputed on every pass; their identity is their membership,
/// see [`Cluster::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    position: LatLng,
    members: Vec<ItemId>,
}

impl Cluster {
    /// `members` must be non-empty and in insertion order.
    pub(crate) fn new(position: LatLng, members: Vec<ItemId>) -> Self {
        debug_assert!(!members.is_empty());
        Self { position, members }
    }

    pub(crate) fn singleton(id: ItemId, position: LatLng) -> Self {
        Self {
            position,
            members: vec![id],
        }
    }

    /// Representative position used for the marker.
    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn members(&self) -> &[ItemId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Marker identity derived from membership.
    pub fn key(&self) -> MarkerKey {
        match self.members.as_slice() {
            [id] => MarkerKey::Item(*id),
            members => MarkerKey::Cluster(ClusterKey::new(members)),
        }
    }
}

/// Identity of a multi-item cluster: its member ids, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey(Box<[ItemId]>);

impl ClusterKey {
    pub fn new(members: &[ItemId]) -> Self {
        let mut members = members.to_vec();
        members.sort_unstable();
        members.dedup();
        Self(members.into_boxed_slice())
    }

    pub fn members(&self) -> &[ItemId] {
        &self.0
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", id.0)?;
        }
        write!(f, "]")
    }
}

/// Identity of a rendered marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerKey {
    /// A singleton marker for one item.
    Item(ItemId),
    /// An aggregate marker for several items.
    Cluster(ClusterKey),
}
