//! Query parameters

use crate::tree::{limit_from, Distance};

/// Bound shared by the examples and the demonstration binary.
pub const DEFAULT_MAX_DISTANCE: i64 = 15;

/// Parameters for distance queries over a zip tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Largest distance reported. Negative bounds report nothing.
    pub max_distance: i64,

    /// Also report each pair with its seeds swapped.
    pub include_symmetric: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            include_symmetric: false,
        }
    }
}

impl QueryConfig {
    /// Configuration with an explicit bound.
    pub fn with_max_distance(max_distance: i64) -> Self {
        Self {
            max_distance,
            ..Self::default()
        }
    }

    /// Report both orientations of every pair.
    pub fn with_symmetric(mut self, enabled: bool) -> Self {
        self.include_symmetric = enabled;
        self
    }

    /// Internal limit, or `None` when nothing can be reported.
    pub fn limit(&self) -> Option<Distance> {
        limit_from(self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.max_distance, 15);
        assert!(!config.include_symmetric);
        assert_eq!(config.limit(), Some(15));
    }

    #[test]
    fn test_negative_bound_has_no_limit() {
        let config = QueryConfig::with_max_distance(-3).with_symmetric(true);
        assert_eq!(config.limit(), None);
        assert!(config.include_symmetric);
    }
}
