use super::types::Cluster;
use crate::item::ClusterItem;
use crate::viewport::Viewport;

/// Common interface for marker clustering algorithms.
pub trait ClusterAlgorithm {
    /// Partition `items` into clusters for `viewport`.
    ///
    /// Every input item appears in exactly one output cluster. The output only
    /// depends on the items (and their order), the algorithm parameters and the
    /// viewport.
    fn cluster<I: ClusterItem>(&self, items: &[I], viewport: &Viewport) -> Vec<Cluster>;

    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;
}
