//! Ordered, duplicate-free node set and the transformations the query engine
//! is built from.
//!
//! Every transformation consumes the set and returns the next one, so a chain
//! of calls is a pure function of the seed and the arguments. Order is always
//! the order in which nodes were first discovered.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

#[derive(Clone)]
pub struct WorkingSet<N> {
    nodes: IndexSet<N>,
}

impl<N> Default for WorkingSet<N> {
    fn default() -> Self {
        Self {
            nodes: IndexSet::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> WorkingSet<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `nodes` in order, skipping any already present.
    pub fn seed<I: IntoIterator<Item = N>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Replace the set with the concatenation of `lookup(root)` for every
    /// root, in root order, keeping the first occurrence of each node.
    pub fn descend<F, I>(self, mut lookup: F) -> Self
    where
        F: FnMut(N) -> I,
        I: IntoIterator<Item = N>,
    {
        let mut next = IndexSet::new();
        for &root in &self.nodes {
            next.extend(lookup(root));
        }
        Self { nodes: next }
    }

    /// Like [`descend`](Self::descend), but each root contributes only the
    /// match at `index` of its own match list.
    ///
    /// Indexing happens per root, before the results of different roots are
    /// merged; this is not the `index`-th node of the flattened union. A root
    /// with fewer than `index + 1` matches contributes nothing.
    pub fn descend_at<F>(self, index: usize, mut lookup: F) -> Self
    where
        F: FnMut(N) -> Vec<N>,
    {
        let mut next = IndexSet::new();
        for &root in &self.nodes {
            if let Some(&found) = lookup(root).get(index) {
                next.insert(found);
            }
        }
        Self { nodes: next }
    }

    /// Keep the nodes satisfying `predicate`, preserving order.
    pub fn filter<F>(mut self, mut predicate: F) -> Self
    where
        F: FnMut(N) -> bool,
    {
        self.nodes.retain(|&node| predicate(node));
        self
    }

    /// Narrow the whole set to its `index`-th node, or to nothing.
    pub fn nth(self, index: usize) -> Self {
        let nodes = self.nodes.get_index(index).copied().into_iter().collect();
        Self { nodes }
    }

    pub fn first(&self) -> Option<N> {
        self.nodes.first().copied()
    }

    pub fn to_vec(&self) -> Vec<N> {
        self.nodes.iter().copied().collect()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.iter().copied()
    }
}

// `IndexSet` equality ignores order; working sets compare as sequences.
impl<N: Eq + Hash> PartialEq for WorkingSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.iter().eq(other.nodes.iter())
    }
}

impl<N: Eq + Hash> Eq for WorkingSet<N> {}

impl<N: fmt::Debug> fmt::Debug for WorkingSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.nodes.iter()).finish()
    }
}

impl<N: Copy + Eq + Hash> FromIterator<N> for WorkingSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::new().seed(iter)
    }
}

impl<N> IntoIterator for WorkingSet<N> {
    type Item = N;
    type IntoIter = indexmap::set::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}
