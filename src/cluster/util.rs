use super::types::Cluster;
use crate::item::{ClusterItem, ItemId};
use crate::projection::LatLng;
use crate::viewport::Viewport;

/// Clustering is switched off once the map is zoomed in past `max_zoom_for_cluster`.
#[inline]
pub(crate) fn clustering_disabled(viewport: &Viewport, max_zoom_for_cluster: u8) -> bool {
    viewport.zoom() > f64::from(max_zoom_for_cluster)
}

/// One singleton per item, in input order.
pub(crate) fn singletons<I: ClusterItem>(items: &[I]) -> Vec<Cluster> {
    items
        .iter()
        .map(|item| Cluster::singleton(item.id(), item.position()))
        .collect()
}

/// Emit a group either as one cluster or, when below `min_cluster_size`, as
/// singletons at the members' own positions.
pub(crate) fn emit_group(
    members: Vec<(ItemId, LatLng)>,
    min_cluster_size: usize,
    centroid: impl FnOnce() -> LatLng,
    out: &mut Vec<Cluster>,
) {
    if members.len() >= min_cluster_size.max(2) {
        let ids = members.into_iter().map(|(id, _)| id).collect();
        out.push(Cluster::new(centroid(), ids));
    } else {
        out.extend(
            members
                .into_iter()
                .map(|(id, position)| Cluster::singleton(id, position)),
        );
    }
}
