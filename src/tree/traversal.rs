//! Stackless-recursion walks over a zip tree
//!
//! Both walkers keep an explicit frame stack instead of recursing, so
//! nesting depth costs heap, never call stack. Each frame holds only a
//! cursor and (for the right-to-left walk) a running distance.

use tracing::trace;

use super::limit_from;
use super::node::{Chain, Distance, Element, Snarl};
use super::path::{Container, ContainmentPath, PathStep};

/// Right-to-left walk state for one container.
#[derive(Debug)]
enum WalkFrame<'t, S> {
    /// `remaining` elements still to visit; the next one is `remaining - 1`.
    Chain {
        chain: &'t Chain<S>,
        remaining: usize,
        offset: Distance,
    },
    /// Entries are visited from the highest index down.
    Snarl {
        snarl: &'t Snarl<S>,
        remaining: usize,
        offset: Distance,
    },
}

/// Seeds within a bound of an element's right end, nearest chain side first.
///
/// Yields `(seed, distance)` where `distance` is the distance from the seed
/// to the right end of the walked element plus the starting offset. Chains
/// stop as soon as their running distance passes the bound (chain distances
/// only grow leftward); snarl entries are all tried since distances across
/// sibling chains are unordered.
#[derive(Debug)]
pub struct RightToLeft<'t, S> {
    stack: Vec<WalkFrame<'t, S>>,
    pending: Option<(&'t S, Distance)>,
    limit: Distance,
}

impl<'t, S> RightToLeft<'t, S> {
    /// Walk `element` with no accumulated offset.
    pub fn new(element: &'t Element<S>, max_distance: i64) -> Self {
        Self::starting_at(element, 0, max_distance)
    }

    /// Walk `element` as if `offset` had already been travelled.
    pub fn starting_at(element: &'t Element<S>, offset: Distance, max_distance: i64) -> Self {
        let mut walker = Self::idle();
        if let Some(limit) = limit_from(max_distance) {
            walker.limit = limit;
            walker.pending = walker.descend(element, offset);
        }
        walker
    }

    /// Walk a bare chain (e.g. a snarl entry) from `offset`.
    pub fn for_chain(chain: &'t Chain<S>, offset: Distance, max_distance: i64) -> Self {
        let mut walker = Self::idle();
        if let Some(limit) = limit_from(max_distance) {
            walker.limit = limit;
            walker.push_chain(chain, offset);
        }
        walker
    }

    fn idle() -> Self {
        Self {
            stack: Vec::new(),
            pending: None,
            limit: 0,
        }
    }

    fn push_chain(&mut self, chain: &'t Chain<S>, offset: Distance) {
        self.stack.push(WalkFrame::Chain {
            chain,
            remaining: chain.len(),
            offset,
        });
    }

    /// Seeds are reported directly; containers become frames.
    fn descend(&mut self, element: &'t Element<S>, at: Distance) -> Option<(&'t S, Distance)> {
        match element {
            Element::Seed(seed) => (at <= self.limit).then_some((seed, at)),
            Element::Chain(chain) => {
                self.push_chain(chain, at);
                None
            }
            Element::Snarl(snarl) => {
                self.stack.push(WalkFrame::Snarl {
                    snarl,
                    remaining: snarl.len(),
                    offset: at,
                });
                None
            }
        }
    }
}

impl<'t, S> Iterator for RightToLeft<'t, S> {
    type Item = (&'t S, Distance);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(hit) = self.pending.take() {
            return Some(hit);
        }

        while let Some(frame) = self.stack.last_mut() {
            match frame {
                WalkFrame::Chain {
                    chain,
                    remaining,
                    offset,
                } => {
                    if *remaining == 0 {
                        self.stack.pop();
                        continue;
                    }
                    if *offset > self.limit {
                        trace!(remaining = *remaining, offset = *offset, "chain walk passed bound");
                        self.stack.pop();
                        continue;
                    }

                    *remaining -= 1;
                    let index = *remaining;
                    let chain: &'t Chain<S> = *chain;
                    let element = chain.element(index);
                    let at = *offset;

                    // Cost of reaching the next element to the left.
                    *offset = offset.saturating_add(element.crossing_length());
                    if index > 0 {
                        *offset = offset.saturating_add(chain.gap_after(index - 1));
                    }

                    if let Some(hit) = self.descend(element, at) {
                        return Some(hit);
                    }
                }
                WalkFrame::Snarl {
                    snarl,
                    remaining,
                    offset,
                } => {
                    if *remaining == 0 {
                        self.stack.pop();
                        continue;
                    }

                    *remaining -= 1;
                    let index = *remaining;
                    let snarl: &'t Snarl<S> = *snarl;
                    let at = offset.saturating_add(snarl.right_boundary_to(index));
                    self.push_chain(snarl.entry(index).chain(), at);
                }
            }
        }

        None
    }
}

/// Left-to-right scan state for one container.
#[derive(Debug)]
enum ScanFrame<'t, S> {
    /// `next` is the element to visit next; the current one is `next - 1`.
    Chain { chain: &'t Chain<S>, next: usize },
    Snarl { snarl: &'t Snarl<S>, next: usize },
}

/// Every seed in left-to-right order with its containment path.
///
/// The frame stack mirrors the path: reading it top-down gives the
/// containers deepest first.
#[derive(Debug)]
pub struct LeftToRight<'t, S> {
    stack: Vec<ScanFrame<'t, S>>,
    pending: Option<&'t S>,
}

impl<'t, S> LeftToRight<'t, S> {
    /// Enumerate all seeds beneath `element`.
    pub fn new(element: &'t Element<S>) -> Self {
        let mut scan = Self {
            stack: Vec::new(),
            pending: None,
        };
        match element {
            Element::Seed(seed) => scan.pending = Some(seed),
            Element::Chain(chain) => scan.stack.push(ScanFrame::Chain { chain, next: 0 }),
            Element::Snarl(snarl) => scan.stack.push(ScanFrame::Snarl { snarl, next: 0 }),
        }
        scan
    }

    fn current_path(&self) -> ContainmentPath<'t, S> {
        let steps = self
            .stack
            .iter()
            .rev()
            .map(|frame| match *frame {
                ScanFrame::Chain { chain, next } => PathStep {
                    container: Container::Chain(chain),
                    index: next - 1,
                },
                ScanFrame::Snarl { snarl, next } => PathStep {
                    container: Container::Snarl(snarl),
                    index: next - 1,
                },
            })
            .collect();
        ContainmentPath::from_steps(steps)
    }
}

impl<'t, S> Iterator for LeftToRight<'t, S> {
    type Item = (&'t S, ContainmentPath<'t, S>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(seed) = self.pending.take() {
            return Some((seed, ContainmentPath::empty()));
        }

        while let Some(frame) = self.stack.last_mut() {
            let child = match frame {
                ScanFrame::Chain { chain, next } => {
                    if *next == chain.len() {
                        self.stack.pop();
                        continue;
                    }
                    let chain: &'t Chain<S> = *chain;
                    *next += 1;
                    chain.element(*next - 1)
                }
                ScanFrame::Snarl { snarl, next } => {
                    if *next == snarl.len() {
                        self.stack.pop();
                        continue;
                    }
                    let snarl: &'t Snarl<S> = *snarl;
                    *next += 1;
                    let chain = snarl.entry(*next - 1).chain();
                    self.stack.push(ScanFrame::Chain { chain, next: 0 });
                    continue;
                }
            };

            match child {
                Element::Seed(seed) => return Some((seed, self.current_path())),
                Element::Chain(chain) => self.stack.push(ScanFrame::Chain { chain, next: 0 }),
                Element::Snarl(snarl) => self.stack.push(ScanFrame::Snarl { snarl, next: 0 }),
            }
        }

        None
    }
}
