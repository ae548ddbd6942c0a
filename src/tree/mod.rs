//! Zip tree: nested chains and snarls over seeds
//!
//! A zip tree stores just enough distances to answer "which seeds lie
//! within d of this one" without the underlying graph:
//! chains carry gaps between consecutive elements, snarls carry
//! per-chain distances to their boundaries and to earlier chains.
//!
//! The tree is immutable once built; every query borrows it.

mod node;
mod path;
mod traversal;

pub use node::{Chain, ChainEntry, Distance, Element, Snarl, StructureError, UNREACHABLE};
pub use path::{Container, ContainmentPath, PathStep};
pub use traversal::{LeftToRight, RightToLeft};

use tracing::{debug, Level};

/// Convert a caller bound into an internal limit; negative bounds admit nothing.
#[inline]
pub(crate) fn limit_from(max_distance: i64) -> Option<Distance> {
    Distance::try_from(max_distance).ok()
}

/// Zip tree rooted at a chain (or, less commonly, a snarl or lone seed).
#[derive(Debug, Clone)]
pub struct ZipTree<S> {
    root: Element<S>,
}

impl<S> ZipTree<S> {
    /// Wrap an already validated root element.
    pub fn new(root: impl Into<Element<S>>) -> Self {
        let tree = Self { root: root.into() };
        // Both statistics walk the whole tree.
        if tracing::enabled!(Level::DEBUG) {
            debug!(
                seeds = tree.seed_count(),
                depth = tree.depth(),
                "zip tree ready"
            );
        }
        tree
    }

    /// Root element.
    pub fn root(&self) -> &Element<S> {
        &self.root
    }

    /// Number of seeds in the tree.
    pub fn seed_count(&self) -> usize {
        LeftToRight::new(&self.root).count()
    }

    /// Deepest seed nesting (number of enclosing containers).
    pub fn depth(&self) -> usize {
        LeftToRight::new(&self.root)
            .map(|(_, path)| path.depth())
            .max()
            .unwrap_or(0)
    }

    /// Seeds within `max_distance` of the tree's right end.
    pub fn seeds_right_to_left(&self, max_distance: i64) -> RightToLeft<'_, S> {
        RightToLeft::new(&self.root, max_distance)
    }

    /// All seeds left to right with their containment paths.
    pub fn seeds_left_to_right(&self) -> LeftToRight<'_, S> {
        LeftToRight::new(&self.root)
    }

    /// Containment path of the leftmost seed equal to `seed`.
    pub fn locate(&self, seed: &S) -> Option<ContainmentPath<'_, S>>
    where
        S: PartialEq,
    {
        self.seeds_left_to_right()
            .find(|(candidate, _)| *candidate == seed)
            .map(|(_, path)| path)
    }
}

impl<S> From<Element<S>> for ZipTree<S> {
    fn from(root: Element<S>) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_from() {
        assert_eq!(limit_from(-1), None);
        assert_eq!(limit_from(0), Some(0));
        assert_eq!(limit_from(15), Some(15));
    }

    #[test]
    fn test_tree_statistics() {
        let inner = Chain::new(vec![Element::Seed(1), Element::Seed(2)], vec![4]).unwrap();
        let snarl = Snarl::new(vec![ChainEntry::new(vec![0], inner)], vec![2, 1]).unwrap();
        let root = Chain::new(vec![Element::Seed(0), snarl.into()], vec![3]).unwrap();
        let tree = ZipTree::new(root);

        assert_eq!(tree.seed_count(), 3);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_deep_tree_builds_clones_and_prints() {
        let mut root = Element::Seed("deep");
        for _ in 0..50_000 {
            root = Chain::single(root).into();
        }
        let tree = ZipTree::new(root);
        let copy = tree.clone();
        assert_eq!(copy.root(), tree.root());
        assert!(format!("{:?}", copy).starts_with("ZipTree { root: [[["));
        assert_eq!(copy.seeds_right_to_left(0).count(), 1);
    }

    #[test]
    fn test_tree_is_sync_for_sync_seeds() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<ZipTree<String>>();
    }
}
