//! Zip tree elements
//!
//! Element = Seed | Chain | Snarl
//! Chain  = [E0, d1, E1, ..., dk, Ek]   (gaps stored beside the elements)
//! Snarl  = N chain entries + boundary record of N + 1 distances
//!
//! Constructors check arity, so every element reachable from a `ZipTree`
//! satisfies the layout invariants the walkers rely on.

use std::fmt;

use thiserror::Error;

/// Path length between two element sides.
pub type Distance = u64;

/// Sentinel for sides that cannot reach each other.
///
/// Accumulation saturates, so anything behind an unreachable hop compares
/// greater than every bound a query can supply.
pub const UNREACHABLE: Distance = Distance::MAX;

/// Layout violations rejected at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A chain needs at least one element.
    #[error("chain must contain at least one element")]
    EmptyChain,

    /// Gaps must sit strictly between consecutive elements.
    #[error("chain with {elements} elements needs {expected} gaps, found {found}")]
    GapCount {
        /// Number of elements supplied.
        elements: usize,
        /// Number of gaps the elements require.
        expected: usize,
        /// Number of gaps supplied.
        found: usize,
    },

    /// Chain entry `i` must carry `i + 1` distances.
    #[error("snarl chain entry {index} needs {expected} distances, found {found}")]
    EntryArity {
        /// Position of the entry inside its snarl.
        index: usize,
        /// Required number of distances.
        expected: usize,
        /// Number of distances supplied.
        found: usize,
    },

    /// Boundary record must carry one distance per chain plus the crossing.
    #[error("snarl with {chains} chains needs {expected} boundary distances, found {found}")]
    BoundaryArity {
        /// Number of chain entries in the snarl.
        chains: usize,
        /// Required number of boundary distances.
        expected: usize,
        /// Number of boundary distances supplied.
        found: usize,
    },
}

/// Node of a zip tree.
#[derive(Clone, PartialEq, Eq)]
pub enum Element<S> {
    /// Leaf position (caller payload).
    Seed(S),
    /// Linear run of elements with known gaps.
    Chain(Chain<S>),
    /// Branching region between two boundaries.
    Snarl(Snarl<S>),
}

impl<S> Element<S> {
    /// Minimum distance from this element's left side to its right side.
    ///
    /// Seeds are points, snarls use boundary record entry 0 and chains
    /// use their cached minimum length.
    #[inline]
    pub fn crossing_length(&self) -> Distance {
        match self {
            Element::Seed(_) => 0,
            Element::Chain(chain) => chain.min_length(),
            Element::Snarl(snarl) => snarl.min_crossing(),
        }
    }

    /// Returns the seed payload if this element is a leaf.
    pub fn as_seed(&self) -> Option<&S> {
        match self {
            Element::Seed(seed) => Some(seed),
            _ => None,
        }
    }
}

impl<S> From<Chain<S>> for Element<S> {
    fn from(chain: Chain<S>) -> Self {
        Element::Chain(chain)
    }
}

impl<S> From<Snarl<S>> for Element<S> {
    fn from(snarl: Snarl<S>) -> Self {
        Element::Snarl(snarl)
    }
}

/// Elements joined left to right by gap distances.
///
/// `Clone`, `PartialEq`, `Debug` and `Display` work from an explicit stack,
/// so arbitrarily deep nesting is safe for all of them.
pub struct Chain<S> {
    elements: Vec<Element<S>>,
    /// `gaps[i]`: right side of `elements[i]` to left side of `elements[i + 1]`
    gaps: Vec<Distance>,
    min_length: Distance,
}

impl<S> Chain<S> {
    /// Build a chain from its elements and the gaps between them.
    pub fn new(elements: Vec<Element<S>>, gaps: Vec<Distance>) -> Result<Self, StructureError> {
        if elements.is_empty() {
            return Err(StructureError::EmptyChain);
        }
        let expected = elements.len() - 1;
        if gaps.len() != expected {
            return Err(StructureError::GapCount {
                elements: elements.len(),
                expected,
                found: gaps.len(),
            });
        }

        let min_length = elements
            .iter()
            .map(Element::crossing_length)
            .chain(gaps.iter().copied())
            .fold(0, Distance::saturating_add);

        Ok(Self {
            elements,
            gaps,
            min_length,
        })
    }

    /// Chain holding a single element.
    pub fn single(element: Element<S>) -> Self {
        let min_length = element.crossing_length();
        Self {
            elements: vec![element],
            gaps: Vec::new(),
            min_length,
        }
    }

    /// Elements in left-to-right order.
    pub fn elements(&self) -> &[Element<S>] {
        &self.elements
    }

    /// Gap distances; `gaps()[i]` follows `elements()[i]`.
    pub fn gaps(&self) -> &[Distance] {
        &self.gaps
    }

    /// Element at `index`.
    #[inline]
    pub fn element(&self, index: usize) -> &Element<S> {
        &self.elements[index]
    }

    /// Gap between `elements()[index]` and `elements()[index + 1]`.
    #[inline]
    pub fn gap_after(&self, index: usize) -> Distance {
        self.gaps[index]
    }

    /// Number of elements (not counting gaps).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false for a constructed chain.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Minimum left-to-right length: all gaps plus every element's crossing.
    pub fn min_length(&self) -> Distance {
        self.min_length
    }

    /// Same gaps and cached length; elements are not compared.
    fn same_layout(&self, other: &Self) -> bool {
        self.min_length == other.min_length && self.gaps == other.gaps
    }
}

impl<S: Clone> Clone for Chain<S> {
    fn clone(&self) -> Self {
        Self {
            elements: clone_elements(&self.elements),
            gaps: self.gaps.clone(),
            min_length: self.min_length,
        }
    }
}

impl<S: PartialEq> PartialEq for Chain<S> {
    fn eq(&self, other: &Self) -> bool {
        self.same_layout(other) && elements_eq(&self.elements, &other.elements)
    }
}

impl<S: Eq> Eq for Chain<S> {}

/// Copy a run of elements bottom-up.
///
/// Finished containers collect on `elements` (chain and snarl elements) and
/// `chains` (snarl entry chains) until their parent's finish task drains them.
fn clone_elements<S: Clone>(roots: &[Element<S>]) -> Vec<Element<S>> {
    enum Task<'a, S> {
        Visit(&'a Element<S>),
        Entry(&'a Chain<S>),
        FinishChain { chain: &'a Chain<S>, entry: bool },
        FinishSnarl(&'a Snarl<S>),
    }

    let mut tasks: Vec<Task<'_, S>> = roots.iter().rev().map(Task::Visit).collect();
    let mut elements: Vec<Element<S>> = Vec::new();
    let mut chains: Vec<Chain<S>> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(Element::Seed(seed)) => elements.push(Element::Seed(seed.clone())),
            Task::Visit(Element::Chain(chain)) => {
                tasks.push(Task::FinishChain { chain, entry: false });
                tasks.extend(chain.elements.iter().rev().map(Task::Visit));
            }
            Task::Entry(chain) => {
                tasks.push(Task::FinishChain { chain, entry: true });
                tasks.extend(chain.elements.iter().rev().map(Task::Visit));
            }
            Task::Visit(Element::Snarl(snarl)) => {
                tasks.push(Task::FinishSnarl(snarl));
                tasks.extend(snarl.entries.iter().rev().map(|entry| Task::Entry(&entry.chain)));
            }
            Task::FinishChain { chain, entry } => {
                let built = Chain {
                    elements: elements.split_off(elements.len() - chain.len()),
                    gaps: chain.gaps.clone(),
                    min_length: chain.min_length,
                };
                if entry {
                    chains.push(built);
                } else {
                    elements.push(Element::Chain(built));
                }
            }
            Task::FinishSnarl(snarl) => {
                let built = chains.split_off(chains.len() - snarl.len());
                let entries = snarl
                    .entries
                    .iter()
                    .zip(built)
                    .map(|(entry, chain)| ChainEntry {
                        distances: entry.distances.clone(),
                        chain,
                    })
                    .collect();
                elements.push(Element::Snarl(Snarl {
                    entries,
                    boundary: snarl.boundary.clone(),
                }));
            }
        }
    }

    elements
}

/// Compare two runs of elements pairwise, descending through snarls too.
fn elements_eq<S: PartialEq>(left: &[Element<S>], right: &[Element<S>]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut pending: Vec<(&Element<S>, &Element<S>)> = left.iter().zip(right).collect();

    while let Some(pair) = pending.pop() {
        match pair {
            (Element::Seed(a), Element::Seed(b)) => {
                if a != b {
                    return false;
                }
            }
            (Element::Chain(a), Element::Chain(b)) => {
                if a.len() != b.len() || !a.same_layout(b) {
                    return false;
                }
                pending.extend(a.elements.iter().zip(&b.elements));
            }
            (Element::Snarl(a), Element::Snarl(b)) => {
                if a.boundary != b.boundary || a.len() != b.len() {
                    return false;
                }
                for (x, y) in a.entries.iter().zip(&b.entries) {
                    if x.distances != y.distances
                        || x.chain.len() != y.chain.len()
                        || !x.chain.same_layout(&y.chain)
                    {
                        return false;
                    }
                    pending.extend(x.chain.elements.iter().zip(&y.chain.elements));
                }
            }
            _ => return false,
        }
    }

    true
}

impl<S> Drop for Chain<S> {
    // Flatten nested chains so teardown depth does not follow tree depth.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.elements);
        while let Some(element) = pending.pop() {
            match element {
                Element::Seed(_) => {}
                Element::Chain(mut chain) => pending.append(&mut chain.elements),
                Element::Snarl(mut snarl) => {
                    for entry in &mut snarl.entries {
                        pending.append(&mut entry.chain.elements);
                    }
                }
            }
        }
    }
}

/// One chain inside a snarl together with its distances to earlier sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry<S> {
    /// `[to left boundary, to right side of chain 0, ..., of chain i - 1]`
    distances: Vec<Distance>,
    chain: Chain<S>,
}

impl<S> ChainEntry<S> {
    /// Pair a chain with its distance tuple.
    ///
    /// Arity is checked by `Snarl::new`, which knows the entry's position.
    pub fn new(distances: Vec<Distance>, chain: Chain<S>) -> Self {
        Self { distances, chain }
    }

    /// Left side of this chain to the snarl's left boundary.
    #[inline]
    pub fn to_left_boundary(&self) -> Distance {
        self.distances[0]
    }

    /// Left side of this chain to the right side of preceding chain `k`.
    #[inline]
    pub fn to_preceding(&self, k: usize) -> Distance {
        self.distances[k + 1]
    }

    /// Raw distance tuple.
    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// The entry's chain.
    pub fn chain(&self) -> &Chain<S> {
        &self.chain
    }
}

/// Branching region with one left and one right boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct Snarl<S> {
    entries: Vec<ChainEntry<S>>,
    /// `[min crossing, right boundary to right side of chain 0, ...]`
    boundary: Vec<Distance>,
}

impl<S> Snarl<S> {
    /// Build a snarl, checking every distance tuple's arity.
    pub fn new(entries: Vec<ChainEntry<S>>, boundary: Vec<Distance>) -> Result<Self, StructureError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.distances.len() != index + 1 {
                return Err(StructureError::EntryArity {
                    index,
                    expected: index + 1,
                    found: entry.distances.len(),
                });
            }
        }
        if boundary.len() != entries.len() + 1 {
            return Err(StructureError::BoundaryArity {
                chains: entries.len(),
                expected: entries.len() + 1,
                found: boundary.len(),
            });
        }
        Ok(Self { entries, boundary })
    }

    /// Chain entries in declaration order.
    pub fn entries(&self) -> &[ChainEntry<S>] {
        &self.entries
    }

    /// Entry at `index`.
    #[inline]
    pub fn entry(&self, index: usize) -> &ChainEntry<S> {
        &self.entries[index]
    }

    /// Boundary record.
    pub fn boundary(&self) -> &[Distance] {
        &self.boundary
    }

    /// Shortest path from the right boundary to the left boundary.
    #[inline]
    pub fn min_crossing(&self) -> Distance {
        self.boundary[0]
    }

    /// Right boundary to the right side of chain `index`.
    #[inline]
    pub fn right_boundary_to(&self, index: usize) -> Distance {
        self.boundary[index + 1]
    }

    /// Number of chain entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a snarl without chains (boundary record holds only the crossing).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn write_distance(f: &mut fmt::Formatter<'_>, distance: Distance) -> fmt::Result {
    if distance == UNREACHABLE {
        f.write_str("inf")
    } else {
        write!(f, "{}", distance)
    }
}

fn write_tuple(f: &mut fmt::Formatter<'_>, distances: &[Distance]) -> fmt::Result {
    for (i, &distance) in distances.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_distance(f, distance)?;
    }
    Ok(())
}

/// Pieces of bracket notation still to be written.
enum Piece<'a, S> {
    Text(&'static str),
    Gap(Distance),
    Tuple(&'a [Distance]),
    Element(&'a Element<S>),
    Chain(&'a Chain<S>),
    Snarl(&'a Snarl<S>),
}

type SeedWriter<S> = fn(&S, &mut fmt::Formatter<'_>) -> fmt::Result;

/// Write `root` in bracket notation without recursing per nesting level.
fn render<S>(f: &mut fmt::Formatter<'_>, root: Piece<'_, S>, seed: SeedWriter<S>) -> fmt::Result {
    let mut pending = vec![root];
    let mut expanded = Vec::new();

    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => f.write_str(text)?,
            Piece::Gap(distance) => write_distance(f, distance)?,
            Piece::Tuple(distances) => write_tuple(f, distances)?,
            Piece::Element(Element::Seed(payload)) => seed(payload, f)?,
            Piece::Element(Element::Chain(chain)) => expand_chain(&mut expanded, chain),
            Piece::Chain(chain) => expand_chain(&mut expanded, chain),
            Piece::Element(Element::Snarl(snarl)) => expand_snarl(&mut expanded, snarl),
            Piece::Snarl(snarl) => expand_snarl(&mut expanded, snarl),
        }
        pending.extend(expanded.drain(..).rev());
    }

    Ok(())
}

fn expand_chain<'a, S>(out: &mut Vec<Piece<'a, S>>, chain: &'a Chain<S>) {
    out.push(Piece::Text("["));
    for (i, element) in chain.elements.iter().enumerate() {
        if i > 0 {
            out.push(Piece::Text(", "));
            out.push(Piece::Gap(chain.gaps[i - 1]));
            out.push(Piece::Text(", "));
        }
        out.push(Piece::Element(element));
    }
    out.push(Piece::Text("]"));
}

fn expand_snarl<'a, S>(out: &mut Vec<Piece<'a, S>>, snarl: &'a Snarl<S>) {
    out.push(Piece::Text("("));
    for entry in &snarl.entries {
        out.push(Piece::Text("("));
        out.push(Piece::Tuple(&entry.distances));
        out.push(Piece::Text(", "));
        out.push(Piece::Chain(&entry.chain));
        out.push(Piece::Text("), "));
    }
    out.push(Piece::Text("("));
    out.push(Piece::Tuple(&snarl.boundary));
    // one-element tuple keeps its comma
    out.push(Piece::Text(if snarl.boundary.len() == 1 { ",))" } else { "))" }));
}

fn display_seed<S: fmt::Display>(seed: &S, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"{}\"", seed)
}

fn debug_seed<S: fmt::Debug>(seed: &S, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", seed)
}

impl<S: fmt::Display> fmt::Display for Element<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Element(self), display_seed)
    }
}

impl<S: fmt::Display> fmt::Display for Chain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Chain(self), display_seed)
    }
}

impl<S: fmt::Display> fmt::Display for Snarl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Snarl(self), display_seed)
    }
}

// Debug uses the same notation with `Debug` seeds.
impl<S: fmt::Debug> fmt::Debug for Element<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Element(self), debug_seed)
    }
}

impl<S: fmt::Debug> fmt::Debug for Chain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Chain(self), debug_seed)
    }
}

impl<S: fmt::Debug> fmt::Debug for Snarl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Piece::Snarl(self), debug_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(name: &str) -> Element<String> {
        Element::Seed(name.to_string())
    }

    #[test]
    fn test_chain_rejects_bad_gap_count() {
        let err = Chain::new(vec![seed("a"), seed("b")], vec![]).unwrap_err();
        assert_eq!(
            err,
            StructureError::GapCount {
                elements: 2,
                expected: 1,
                found: 0
            }
        );
        assert_eq!(
            Chain::<String>::new(vec![], vec![]).unwrap_err(),
            StructureError::EmptyChain
        );
    }

    #[test]
    fn test_snarl_arity_checks() {
        let entry0 = ChainEntry::new(vec![1], Chain::single(seed("x")));
        let bad_entry1 = ChainEntry::new(vec![1], Chain::single(seed("y")));
        let err = Snarl::new(vec![entry0.clone(), bad_entry1], vec![0, 0, 0]).unwrap_err();
        assert!(matches!(err, StructureError::EntryArity { index: 1, expected: 2, found: 1 }));

        let err = Snarl::new(vec![entry0], vec![0]).unwrap_err();
        assert!(matches!(err, StructureError::BoundaryArity { chains: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn test_chain_min_length_includes_snarl_crossing() {
        let snarl = Snarl::new(
            vec![ChainEntry::new(vec![1], Chain::single(seed("b")))],
            vec![3, 0],
        )
        .unwrap();
        let chain = Chain::new(vec![seed("a"), snarl.into(), seed("c")], vec![5, 10]).unwrap();
        assert_eq!(chain.min_length(), 18);
    }

    #[test]
    fn test_unreachable_saturates() {
        let chain = Chain::new(vec![seed("a"), seed("b"), seed("c")], vec![UNREACHABLE, 4]).unwrap();
        assert_eq!(chain.min_length(), UNREACHABLE);
    }

    #[test]
    fn test_empty_snarl_has_single_boundary_entry() {
        let snarl = Snarl::<String>::new(vec![], vec![7]).unwrap();
        assert!(snarl.is_empty());
        assert_eq!(snarl.boundary().len(), 1);
        assert_eq!(snarl.min_crossing(), 7);
    }

    #[test]
    fn test_display_renders_bracket_notation() {
        let snarl = Snarl::new(
            vec![ChainEntry::new(vec![1], Chain::single(seed("b")))],
            vec![1, 0],
        )
        .unwrap();
        let chain = Chain::new(vec![seed("a"), snarl.into()], vec![UNREACHABLE]).unwrap();
        assert_eq!(chain.to_string(), "[\"a\", inf, ((1, [\"b\"]), (1, 0))]");
    }

    fn nested_chains(depth: usize) -> Element<String> {
        let mut element = seed("deep");
        for _ in 0..depth {
            element = Chain::single(element).into();
        }
        element
    }

    fn nested_snarls(depth: usize) -> Element<String> {
        let mut element = seed("deep");
        for _ in 0..depth {
            let entry = ChainEntry::new(vec![1], Chain::single(element));
            element = Snarl::new(vec![entry], vec![2, 0]).unwrap().into();
        }
        element
    }

    #[test]
    fn test_deep_chain_display_and_debug() {
        let element = nested_chains(50_000);
        let text = element.to_string();
        assert_eq!(text.len(), 50_000 * 2 + "\"deep\"".len());
        assert!(text.starts_with("[[[") && text.ends_with("]]]"));
        assert_eq!(format!("{:?}", element), text);
    }

    #[test]
    fn test_deep_chain_clone_and_eq() {
        let element = nested_chains(50_000);
        let copy = element.clone();
        assert_eq!(copy, element);
        assert_ne!(copy, nested_chains(49_999));
    }

    #[test]
    fn test_deep_snarl_nesting_traits() {
        let element = nested_snarls(20_000);
        let copy = element.clone();
        assert_eq!(copy, element);
        assert!(copy.to_string().starts_with("((1, [((1, ["));

        let Element::Snarl(snarl) = &copy else {
            panic!("root is a snarl");
        };
        assert_eq!(snarl.boundary(), &[2, 0]);
        assert_ne!(copy, nested_snarls(19_999));
    }

    #[test]
    fn test_clone_keeps_layout_and_seeds() {
        let snarl = Snarl::new(
            vec![
                ChainEntry::new(vec![1], Chain::new(vec![seed("b"), seed("c")], vec![4]).unwrap()),
                ChainEntry::new(vec![2, 5], Chain::single(seed("d"))),
            ],
            vec![4, 0, 3],
        )
        .unwrap();
        let chain = Chain::new(vec![seed("a"), snarl.into(), seed("e")], vec![2, 6]).unwrap();
        let copy = chain.clone();
        assert_eq!(copy, chain);
        assert_eq!(copy.min_length(), chain.min_length());
        assert_eq!(copy.to_string(), chain.to_string());

        let other = Chain::new(vec![seed("a"), seed("x"), seed("e")], vec![2, 6]).unwrap();
        assert_ne!(copy, other);
    }
}
