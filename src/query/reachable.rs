use tracing::trace;

use crate::tree::{limit_from, Container, ContainmentPath, Distance, RightToLeft};

/// Seeds reachable leftward/outward from one seed, within a bound.
///
/// Walks the seed's containment path from the innermost container out. At
/// each level every preceding sibling is searched right to left; the
/// distance already travelled from the origin rides along as the sibling
/// walk's offset.
///
/// - Chain level: gaps and element crossings accumulate monotonically, so
///   the whole walk ends once the running distance passes the bound.
/// - Snarl level: every preceding chain entry is searched (their distances
///   are unordered), then the cost of reaching the snarl's left boundary is
///   added and the bound re-checked.
#[derive(Debug)]
pub struct Reachable<'t, S> {
    path: ContainmentPath<'t, S>,
    /// Position in `path` currently being searched.
    level: usize,
    /// Preceding siblings still to search at `level`.
    cursor: usize,
    /// Distance from the origin seed to the nearest unsearched side.
    travelled: Distance,
    sibling: Option<RightToLeft<'t, S>>,
    max_distance: i64,
    limit: Distance,
    finished: bool,
}

impl<'t, S> Reachable<'t, S> {
    /// Start a walk outward along `path`.
    pub fn new(path: ContainmentPath<'t, S>, max_distance: i64) -> Self {
        let cursor = path.steps().first().map_or(0, |step| step.index);
        let limit = limit_from(max_distance);
        Self {
            path,
            level: 0,
            cursor,
            travelled: 0,
            sibling: None,
            max_distance,
            limit: limit.unwrap_or(0),
            finished: limit.is_none(),
        }
    }

    /// Distance accumulated so far from the origin seed.
    pub fn travelled(&self) -> Distance {
        self.travelled
    }

    fn check_bound(&mut self) {
        if self.travelled > self.limit {
            trace!(
                level = self.level,
                travelled = self.travelled,
                "outward walk passed bound"
            );
            self.sibling = None;
            self.finished = true;
        }
    }
}

impl<'t, S> Iterator for Reachable<'t, S> {
    type Item = (&'t S, Distance);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(sibling) = self.sibling.as_mut() {
                if let Some(hit) = sibling.next() {
                    return Some(hit);
                }
                self.sibling = None;
                self.check_bound();
                continue;
            }

            let Some(step) = self.path.steps().get(self.level).copied() else {
                self.finished = true;
                continue;
            };

            if self.cursor == 0 {
                // Step out of this container toward its left side.
                if let Container::Snarl(snarl) = step.container {
                    let exit = snarl.entry(step.index).to_left_boundary();
                    self.travelled = self.travelled.saturating_add(exit);
                }
                self.level += 1;
                self.cursor = self
                    .path
                    .steps()
                    .get(self.level)
                    .map_or(0, |outer| outer.index);
                self.check_bound();
                continue;
            }

            self.cursor -= 1;
            let k = self.cursor;
            match step.container {
                Container::Chain(chain) => {
                    self.travelled = self.travelled.saturating_add(chain.gap_after(k));
                    self.check_bound();
                    if self.finished {
                        continue;
                    }
                    let element = chain.element(k);
                    self.sibling = Some(RightToLeft::starting_at(
                        element,
                        self.travelled,
                        self.max_distance,
                    ));
                    self.travelled = self.travelled.saturating_add(element.crossing_length());
                }
                Container::Snarl(snarl) => {
                    let offset = self
                        .travelled
                        .saturating_add(snarl.entry(step.index).to_preceding(k));
                    self.sibling = Some(RightToLeft::for_chain(
                        snarl.entry(k).chain(),
                        offset,
                        self.max_distance,
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Chain, ChainEntry, Element, LeftToRight, Snarl};

    fn seed(name: &'static str) -> Element<&'static str> {
        Element::Seed(name)
    }

    /// ["a", 2, ((1, ["b", 1, "c"]), (2, 5, ["d"]), (4, 0, 3)), 6, "e"]
    fn fixture() -> Element<&'static str> {
        let left = Chain::new(vec![seed("b"), seed("c")], vec![1]).unwrap();
        let snarl = Snarl::new(
            vec![
                ChainEntry::new(vec![1], left),
                ChainEntry::new(vec![2, 5], Chain::single(seed("d"))),
            ],
            vec![4, 0, 3],
        )
        .unwrap();
        Chain::new(vec![seed("a"), snarl.into(), seed("e")], vec![2, 6])
            .unwrap()
            .into()
    }

    fn reach_from(
        tree: &Element<&'static str>,
        name: &str,
        max_distance: i64,
    ) -> Vec<(&'static str, Distance)> {
        let (_, path) = LeftToRight::new(tree)
            .find(|(seed, _)| **seed == name)
            .expect("seed present");
        Reachable::new(path, max_distance)
            .map(|(seed, d)| (*seed, d))
            .collect()
    }

    #[test]
    fn test_snarl_sibling_then_outer_chain() {
        let tree = fixture();
        // d: c at 0 + 5, b at 5 + 1; leave snarl (+2), then a at 2 + 2
        assert_eq!(reach_from(&tree, "d", 100), vec![("c", 5), ("b", 6), ("a", 4)]);
    }

    #[test]
    fn test_chain_crosses_snarl() {
        let tree = fixture();
        // e: gap 6, snarl walk at 6, crossing 4, gap 2 → a at 12
        assert_eq!(
            reach_from(&tree, "e", 100),
            vec![("d", 9), ("c", 6), ("b", 7), ("a", 12)]
        );
        assert_eq!(reach_from(&tree, "e", 9), vec![("d", 9), ("c", 6), ("b", 7)]);
    }

    #[test]
    fn test_stops_when_leaving_snarl_exceeds_bound() {
        let tree = fixture();
        // c: b at 1; leaving the snarl costs 1 + 1 = 2 > 1
        assert_eq!(reach_from(&tree, "c", 1), vec![("b", 1)]);
    }

    #[test]
    fn test_nested_chain_siblings() {
        // ["a", 1, ["b", 5, "c"], 1, "d"]
        let inner = Chain::new(vec![seed("b"), seed("c")], vec![5]).unwrap();
        let tree: Element<_> = Chain::new(vec![seed("a"), inner.into(), seed("d")], vec![1, 1])
            .unwrap()
            .into();
        // d: c at 1, b at 1 + 5; crossing the inner chain costs 5, then a at 6 + 1
        assert_eq!(reach_from(&tree, "d", 100), vec![("c", 1), ("b", 6), ("a", 7)]);
        // c: b at 5; leaving the inner chain, a at 5 + 1
        assert_eq!(reach_from(&tree, "c", 100), vec![("b", 5), ("a", 6)]);
        assert_eq!(reach_from(&tree, "d", 6), vec![("c", 1), ("b", 6)]);
    }

    #[test]
    fn test_first_seed_reaches_nothing() {
        let tree = fixture();
        assert!(reach_from(&tree, "a", 100).is_empty());
    }

    #[test]
    fn test_negative_bound() {
        let tree = fixture();
        assert!(reach_from(&tree, "e", -5).is_empty());
    }
}
