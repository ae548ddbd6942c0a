//! Bounded-distance queries
//!
//! Built on the tree walkers:
//! - `Reachable`: seeds within a bound of one seed, looking leftward/outward
//! - `DistancePairs`: all such pairs across the tree

mod config;
mod pairs;
mod reachable;

pub use config::{QueryConfig, DEFAULT_MAX_DISTANCE};
pub use pairs::{DistancePairs, SeedPair};
pub use reachable::Reachable;

use crate::tree::ZipTree;

impl<S> ZipTree<S> {
    /// Seeds reachable from the first seed equal to `seed`.
    ///
    /// Returns `None` when the seed is not in the tree.
    pub fn reachable_from(&self, seed: &S, max_distance: i64) -> Option<Reachable<'_, S>>
    where
        S: PartialEq,
    {
        self.locate(seed)
            .map(|path| Reachable::new(path, max_distance))
    }

    /// All pairs within the configured bound.
    pub fn pairs_within(&self, config: &QueryConfig) -> DistancePairs<'_, S> {
        DistancePairs::with_config(self, config)
    }
}
