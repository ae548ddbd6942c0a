//! Containment paths
//!
//! For one seed: the chains and snarls enclosing it, deepest first,
//! each paired with the seed's position inside that container.

use super::node::{Chain, Snarl};

/// Borrowed reference to an enclosing container.
#[derive(Debug)]
pub enum Container<'t, S> {
    /// Enclosing chain.
    Chain(&'t Chain<S>),
    /// Enclosing snarl.
    Snarl(&'t Snarl<S>),
}

impl<S> Clone for Container<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Container<'_, S> {}

/// One level of a containment path.
#[derive(Debug)]
pub struct PathStep<'t, S> {
    /// Container at this level.
    pub container: Container<'t, S>,
    /// Element ordinal (chain) or chain-entry ordinal (snarl).
    pub index: usize,
}

impl<S> Clone for PathStep<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for PathStep<'_, S> {}

impl<'t, S> PathStep<'t, S> {
    /// Position in the alternating element/distance layout.
    ///
    /// Chains interleave gaps, so element `i` sits at `2 * i`; snarl entries
    /// are listed back to back.
    pub fn alternating_index(&self) -> usize {
        match self.container {
            Container::Chain(_) => self.index * 2,
            Container::Snarl(_) => self.index,
        }
    }

    /// True when this level is a snarl.
    pub fn is_snarl(&self) -> bool {
        matches!(self.container, Container::Snarl(_))
    }
}

/// Ancestors of a seed, innermost first.
#[derive(Debug)]
pub struct ContainmentPath<'t, S> {
    steps: Vec<PathStep<'t, S>>,
}

impl<S> Clone for ContainmentPath<'_, S> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<'t, S> ContainmentPath<'t, S> {
    /// Wrap steps already ordered innermost first.
    pub fn from_steps(steps: Vec<PathStep<'t, S>>) -> Self {
        Self { steps }
    }

    /// Path of a seed that is the tree root.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Steps, innermost first.
    pub fn steps(&self) -> &[PathStep<'t, S>] {
        &self.steps
    }

    /// Nesting depth of the seed.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// True for a root seed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Extend the path outward by one container.
    pub fn push_outer(&mut self, step: PathStep<'t, S>) {
        self.steps.push(step);
    }

    /// Indices from innermost to outermost.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().map(|step| step.index)
    }
}

impl<'t, S> IntoIterator for ContainmentPath<'t, S> {
    type Item = PathStep<'t, S>;
    type IntoIter = std::vec::IntoIter<PathStep<'t, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
