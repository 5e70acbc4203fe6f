//! Clustering configuration and platform profiles.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which clustering algorithm family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Uniform screen-pixel grid; each occupied cell is one cluster.
    GridBased,
    /// Greedy single-pass merge of items within a pixel radius of a seed.
    #[default]
    DistanceBased,
    /// Distance-based clustering restricted to the visible region.
    VisibleNonHierarchicalDistanceBased,
}

/// Host platform profile. Decides which algorithms are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn supports(&self, algorithm: Algorithm) -> bool {
        match (self, algorithm) {
            (Platform::Ios, Algorithm::VisibleNonHierarchicalDistanceBased) => false,
            _ => true,
        }
    }
}

/// Tunable clustering options.
///
/// Deserializes from TOML with every field optional:
///
/// ```toml
/// algorithm = "grid_based"
/// min_cluster_size = 4
/// max_zoom_for_cluster = 18
/// bucket_size_px = 80.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    pub algorithm: Algorithm,

    /// Smallest group rendered as a cluster; smaller groups become singletons.
    pub min_cluster_size: usize,

    /// Above this zoom level every item is rendered on its own.
    pub max_zoom_for_cluster: u8,

    /// Grid cell edge (grid mode) or absorb radius (distance modes), in screen pixels.
    pub bucket_size_px: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            min_cluster_size: 2,
            max_zoom_for_cluster: 20,
            bucket_size_px: 100.0,
        }
    }
}

impl ClusterOptions {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    pub fn with_max_zoom_for_cluster(mut self, max_zoom_for_cluster: u8) -> Self {
        self.max_zoom_for_cluster = max_zoom_for_cluster;
        self
    }

    pub fn with_bucket_size_px(mut self, bucket_size_px: f64) -> Self {
        self.bucket_size_px = bucket_size_px;
        self
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Check the options against a platform profile.
    pub fn validate(&self, platform: Platform) -> Result<()> {
        if !platform.supports(self.algorithm) {
            return Err(Error::UnsupportedConfiguration {
                algorithm: self.algorithm,
                platform,
            });
        }

        if !self.bucket_size_px.is_finite() || self.bucket_size_px <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "bucket_size_px",
                message: "must be positive and finite",
            });
        }

        if self.min_cluster_size == 0 {
            return Err(Error::InvalidParameter {
                name: "min_cluster_size",
                message: "must be at least 1",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_variant_is_android_only() {
        let options = ClusterOptions::new(Algorithm::VisibleNonHierarchicalDistanceBased);
        assert!(options.validate(Platform::Android).is_ok());
        assert!(matches!(
            options.validate(Platform::Ios),
            Err(Error::UnsupportedConfiguration {
                algorithm: Algorithm::VisibleNonHierarchicalDistanceBased,
                platform: Platform::Ios,
            })
        ));
    }

    #[test]
    fn test_invalid_params() {
        let options = ClusterOptions::default().with_bucket_size_px(0.0);
        assert!(options.validate(Platform::Android).is_err());

        let options = ClusterOptions::default().with_bucket_size_px(f64::NAN);
        assert!(options.validate(Platform::Android).is_err());

        let options = ClusterOptions::default().with_min_cluster_size(0);
        assert!(options.validate(Platform::Ios).is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let options = ClusterOptions::from_toml_str(
            r#"
            algorithm = "grid_based"
            bucket_size_px = 64.0
            "#,
        )
        .unwrap();
        assert_eq!(options.algorithm, Algorithm::GridBased);
        assert_eq!(options.bucket_size_px, 64.0);
        assert_eq!(options.min_cluster_size, 2);
        assert_eq!(options.max_zoom_for_cluster, 20);
    }

    #[test]
    fn test_from_toml_rejects_unknown_algorithm() {
        let result = ClusterOptions::from_toml_str(r#"algorithm = "kmeans""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let options = ClusterOptions::from_toml_str("").unwrap();
        assert_eq!(options, ClusterOptions::default());
    }
}
