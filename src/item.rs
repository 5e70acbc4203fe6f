//! Map items and the live item set.

use std::collections::HashMap;
use std::fmt;

use crate::projection::LatLng;

/// Caller-assigned identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Anything that can be clustered: an identity and a position.
pub trait ClusterItem {
    fn id(&self) -> ItemId;
    fn position(&self) -> LatLng;
}

impl<I: ClusterItem + ?Sized> ClusterItem for &I {
    fn id(&self) -> ItemId {
        (**self).id()
    }

    fn position(&self) -> LatLng {
        (**self).position()
    }
}

/// A positioned map item carrying an opaque caller payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    id: ItemId,
    position: LatLng,
    payload: T,
}

impl<T> Item<T> {
    pub fn new(id: ItemId, position: LatLng, payload: T) -> Self {
        Self {
            id,
            position,
            payload,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub(crate) fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }
}

impl<T> ClusterItem for Item<T> {
    fn id(&self) -> ItemId {
        self.id
    }

    fn position(&self) -> LatLng {
        self.position
    }
}

// Compact once at least this many slots are vacant and they make up half the order.
const COMPACT_MIN_VACANT: usize = 32;

struct Entry<T> {
    slot: usize,
    item: Item<T>,
}

/// Insertion-ordered item set with O(1) average insert, lookup and removal.
///
/// Removal leaves a vacant slot in the order vector; slots are compacted once
/// vacancies dominate, which keeps removal amortized O(1).
pub(crate) struct ItemStore<T> {
    order: Vec<Option<ItemId>>,
    entries: HashMap<ItemId, Entry<T>>,
    vacant: usize,
}

impl<T> ItemStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            vacant: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert an item. An existing item with the same id is replaced in place
    /// and returned; it keeps its position in the iteration order.
    pub(crate) fn insert(&mut self, item: Item<T>) -> Option<Item<T>> {
        if let Some(entry) = self.entries.get_mut(&item.id) {
            return Some(std::mem::replace(&mut entry.item, item));
        }
        let slot = self.order.len();
        self.order.push(Some(item.id));
        self.entries.insert(item.id, Entry { slot, item });
        None
    }

    pub(crate) fn remove(&mut self, id: ItemId) -> Option<Item<T>> {
        let entry = self.entries.remove(&id)?;
        self.order[entry.slot] = None;
        self.vacant += 1;
        if self.vacant >= COMPACT_MIN_VACANT && self.vacant * 2 >= self.order.len() {
            self.compact();
        }
        Some(entry.item)
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<&Item<T>> {
        self.entries.get(&id).map(|entry| &entry.item)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item<T>> {
        self.entries.get_mut(&id).map(|entry| &mut entry.item)
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
        self.vacant = 0;
    }

    /// Items in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Item<T>> + '_ {
        self.order
            .iter()
            .flatten()
            .filter_map(|id| self.entries.get(id).map(|entry| &entry.item))
    }

    fn compact(&mut self) {
        self.order.retain(Option::is_some);
        for (slot, id) in self.order.iter().enumerate() {
            if let Some(entry) = id.and_then(|id| self.entries.get_mut(&id)) {
                entry.slot = slot;
            }
        }
        self.vacant = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> Item<u64> {
        Item::new(ItemId(id), LatLng::new(id as f64 * 0.1, 0.0), id)
    }

    fn ids(store: &ItemStore<u64>) -> Vec<u64> {
        store.iter().map(|item| item.id().0).collect()
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let mut store = ItemStore::new();
        for id in [5, 3, 9, 1] {
            store.insert(item(id));
        }
        assert_eq!(ids(&store), vec![5, 3, 9, 1]);
    }

    #[test]
    fn test_replace_keeps_slot() {
        let mut store = ItemStore::new();
        store.insert(item(1));
        store.insert(item(2));
        let previous = store.insert(Item::new(ItemId(1), LatLng::new(3.0, 3.0), 100));
        assert_eq!(previous.map(Item::into_payload), Some(1));
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.get(ItemId(1)).map(|i| *i.payload()), Some(100));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut store: ItemStore<u64> = ItemStore::new();
        assert!(store.remove(ItemId(7)).is_none());
    }

    #[test]
    fn test_remove_preserves_order_across_compaction() {
        let mut store = ItemStore::new();
        for id in 0..200 {
            store.insert(item(id));
        }
        for id in (0..200).filter(|id| id % 3 != 0) {
            assert!(store.remove(ItemId(id)).is_some());
        }
        let expected: Vec<u64> = (0..200).filter(|id| id % 3 == 0).collect();
        assert_eq!(ids(&store), expected);
        assert_eq!(store.len(), expected.len());

        // Slots stay consistent after compaction.
        assert!(store.remove(ItemId(99)).is_some());
        store.insert(item(1000));
        assert_eq!(ids(&store).last(), Some(&1000));
        assert!(!ids(&store).contains(&99));
    }

    #[test]
    fn test_clear() {
        let mut store = ItemStore::new();
        store.insert(item(1));
        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.iter().next().is_none());
    }
}
