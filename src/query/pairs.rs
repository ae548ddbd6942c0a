use std::fmt;

use crate::tree::{Distance, LeftToRight, ZipTree};

use super::{QueryConfig, Reachable};

/// Two seeds and the distance between them.
///
/// Pairs come out of the all-pairs walk with `reached` to the left of
/// `origin`; `swapped` gives the other orientation.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SeedPair<'t, S> {
    /// Seed the outward walk started from.
    pub origin: &'t S,
    /// Seed found by that walk.
    pub reached: &'t S,
    /// Shortest summary distance between the two.
    pub distance: Distance,
}

impl<S> Clone for SeedPair<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SeedPair<'_, S> {}

impl<'t, S> SeedPair<'t, S> {
    /// Same pair, seeds exchanged.
    pub fn swapped(self) -> Self {
        Self {
            origin: self.reached,
            reached: self.origin,
            distance: self.distance,
        }
    }
}

impl<S: fmt::Display> fmt::Display for SeedPair<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.origin, self.reached, self.distance)
    }
}

/// Every pair of seeds within a bound.
///
/// Seeds are taken left to right; each one runs an outward walk, which only
/// looks left, so every unordered pair is produced once.
#[derive(Debug)]
pub struct DistancePairs<'t, S> {
    seeds: LeftToRight<'t, S>,
    current: Option<(&'t S, Reachable<'t, S>)>,
    max_distance: i64,
    symmetric: bool,
    mirrored: Option<SeedPair<'t, S>>,
}

impl<'t, S> DistancePairs<'t, S> {
    /// Pairs within `max_distance`, one orientation each.
    pub fn new(tree: &'t ZipTree<S>, max_distance: i64) -> Self {
        Self::with_config(tree, &QueryConfig::with_max_distance(max_distance))
    }

    /// Pairs as described by `config`.
    pub fn with_config(tree: &'t ZipTree<S>, config: &QueryConfig) -> Self {
        Self {
            seeds: tree.seeds_left_to_right(),
            current: None,
            max_distance: config.max_distance,
            symmetric: config.include_symmetric,
            mirrored: None,
        }
    }
}

impl<'t, S> Iterator for DistancePairs<'t, S> {
    type Item = SeedPair<'t, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pair) = self.mirrored.take() {
            return Some(pair);
        }

        loop {
            if let Some((origin, walk)) = self.current.as_mut() {
                if let Some((reached, distance)) = walk.next() {
                    let pair = SeedPair {
                        origin: *origin,
                        reached,
                        distance,
                    };
                    if self.symmetric {
                        self.mirrored = Some(pair.swapped());
                    }
                    return Some(pair);
                }
            }

            let (seed, path) = self.seeds.next()?;
            self.current = Some((seed, Reachable::new(path, self.max_distance)));
        }
    }
}
