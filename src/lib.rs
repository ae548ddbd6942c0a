//! # Bounded-distance seed queries over zip trees
//!
//! A zip tree summarizes a variation graph's snarl/chain decomposition:
//! chains record the gaps between consecutive elements, snarls record the
//! distances from each inner chain to the snarl boundaries and to earlier
//! chains. Those summaries are enough to list every pair of seeds within a
//! distance bound without touching the graph.
//!
//! ## Walks
//!
//! 1. **Right to left** (`tree::RightToLeft`): seeds with their distance to an
//!    element's right end, pruning chains once past the bound
//! 2. **Left to right** (`tree::LeftToRight`): every seed with its
//!    containment path, deepest container first
//! 3. **Outward** (`query::Reachable`): from one seed, climb the path and
//!    search each level's preceding siblings right to left
//! 4. **All pairs** (`query::DistancePairs`): outward walk from every seed
//!
//! All walks are lazy, single-pass and keep their own frame stacks, so
//! independent queries can share one tree across threads.
//!
//! ## Usage Example
//!
//! ```
//! use ziptree::notation::{parse_tree, NotationConfig, EXAMPLE};
//! use ziptree::query::QueryConfig;
//!
//! let tree = parse_tree(EXAMPLE, &NotationConfig::default())?;
//! let close: Vec<_> = tree
//!     .pairs_within(&QueryConfig::with_max_distance(4))
//!     .map(|pair| (pair.origin.as_str(), pair.reached.as_str(), pair.distance))
//!     .collect();
//! assert_eq!(close, vec![("d", "c", 4), ("h", "g", 2), ("j", "i", 2)]);
//! # Ok::<(), ziptree::notation::NotationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod notation; // Bracket notation reader
pub mod query; // Reachability and all-pairs queries
pub mod tree; // Zip tree model and walkers

// Re-exports for convenience
pub use query::{DistancePairs, QueryConfig, Reachable, SeedPair};
pub use tree::{
    Chain, ChainEntry, ContainmentPath, Distance, Element, LeftToRight, RightToLeft, Snarl,
    StructureError, ZipTree, UNREACHABLE,
};
