use super::distance::{DistanceBased, VisibleDistanceBased};
use super::grid::GridBased;
use super::traits::ClusterAlgorithm;
use super::types::Cluster;
use crate::item::ClusterItem;
use crate::options::{Algorithm, ClusterOptions};
use crate::viewport::Viewport;

/// The configured algorithm, chosen once from [`ClusterOptions`].
#[derive(Debug, Clone)]
pub enum ClusterStrategy {
    Grid(GridBased),
    Distance(DistanceBased),
    VisibleDistance(VisibleDistanceBased),
}

impl ClusterStrategy {
    /// Build the strategy for `options`. Platform support is checked by
    /// [`ClusterOptions::validate`], not here.
    pub fn from_options(options: &ClusterOptions) -> Self {
        match options.algorithm {
            Algorithm::GridBased => Self::Grid(
                GridBased::new(options.bucket_size_px)
                    .with_min_cluster_size(options.min_cluster_size)
                    .with_max_zoom_for_cluster(options.max_zoom_for_cluster),
            ),
            Algorithm::DistanceBased => Self::Distance(Self::distance(options)),
            Algorithm::VisibleNonHierarchicalDistanceBased => {
                Self::VisibleDistance(VisibleDistanceBased::new(Self::distance(options)))
            }
        }
    }

    fn distance(options: &ClusterOptions) -> DistanceBased {
        DistanceBased::new(options.bucket_size_px)
            .with_min_cluster_size(options.min_cluster_size)
            .with_max_zoom_for_cluster(options.max_zoom_for_cluster)
    }
}

impl ClusterAlgorithm for ClusterStrategy {
    fn cluster<I: ClusterItem>(&self, items: &[I], viewport: &Viewport) -> Vec<Cluster> {
        match self {
            Self::Grid(algo) => algo.cluster(items, viewport),
            Self::Distance(algo) => algo.cluster(items, viewport),
            Self::VisibleDistance(algo) => algo.cluster(items, viewport),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Grid(algo) => algo.name(),
            Self::Distance(algo) => algo.name(),
            Self::VisibleDistance(algo) => algo.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_selects_variant() {
        let grid = ClusterStrategy::from_options(&ClusterOptions::new(Algorithm::GridBased));
        assert_eq!(grid.name(), "grid_based");

        let distance =
            ClusterStrategy::from_options(&ClusterOptions::new(Algorithm::DistanceBased));
        assert_eq!(distance.name(), "distance_based");

        let visible = ClusterStrategy::from_options(&ClusterOptions::new(
            Algorithm::VisibleNonHierarchicalDistanceBased,
        ));
        assert_eq!(visible.name(), "visible_distance_based");
    }

    #[test]
    fn test_from_options_carries_bucket_size() {
        let options = ClusterOptions::new(Algorithm::GridBased).with_bucket_size_px(42.0);
        match ClusterStrategy::from_options(&options) {
            ClusterStrategy::Grid(grid) => assert_eq!(grid.cell_size_px(), 42.0),
            other => panic!("unexpected strategy {other:?}"),
        }
    }
}
