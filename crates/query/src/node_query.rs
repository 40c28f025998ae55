//! The chainable query builder.
//!
//! A [`NodeQuery`] borrows a tree and wraps one [`WorkingSet`]. Composition
//! methods consume the query and return the next one; terminal methods read
//! the current set without changing it.
//!
//! ```text
//! NodeQuery::new(&scene)
//!     .from([panes])
//!     .lookup_at(1, &by_selector(".pane")?)
//!     .lookup_at(2, &by_selector(".label")?)
//!     .query_first()
//! ```

use std::fmt;

use scene::Scene;
use selector::SelectorError;
use tracing::trace;

use crate::matchers::{Lookup, Predicate, by_selector};
use crate::tree::SceneTree;
use crate::working_set::WorkingSet;

pub struct NodeQuery<'t, T: SceneTree> {
    tree: &'t T,
    set: WorkingSet<T::Node>,
}

// Derived `Clone` would require `T: Clone`; only the reference is copied.
impl<T: SceneTree> Clone for NodeQuery<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            set: self.set.clone(),
        }
    }
}

impl<T: SceneTree> fmt::Debug for NodeQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeQuery").field("set", &self.set).finish()
    }
}

impl<'t, T: SceneTree> NodeQuery<'t, T> {
    /// An empty query over `tree`.
    pub fn new(tree: &'t T) -> Self {
        Self {
            tree,
            set: WorkingSet::new(),
        }
    }

    pub fn tree(&self) -> &'t T {
        self.tree
    }

    /// Add `nodes` to the working set. Repeated calls accumulate; nodes
    /// already present keep their original position.
    pub fn from<I: IntoIterator<Item = T::Node>>(self, nodes: I) -> Self {
        let Self { tree, set } = self;
        let before = set.len();
        let set = set.seed(nodes);
        trace!(before, after = set.len(), "from");
        Self { tree, set }
    }

    /// Replace every node with its matching descendants.
    pub fn lookup<L: Lookup<T> + ?Sized>(self, lookup: &L) -> Self {
        let Self { tree, set } = self;
        let roots = set.len();
        let set = set.descend(|root| lookup.lookup(tree, root));
        trace!(roots, matches = set.len(), "lookup");
        Self { tree, set }
    }

    /// Replace every node with its `index`-th matching descendant, dropping
    /// nodes that have too few matches.
    pub fn lookup_at<L: Lookup<T> + ?Sized>(self, index: usize, lookup: &L) -> Self {
        let Self { tree, set } = self;
        let roots = set.len();
        let set = set.descend_at(index, |root| lookup.lookup(tree, root));
        trace!(roots, index, matches = set.len(), "lookup_at");
        Self { tree, set }
    }

    /// Keep only the nodes satisfying `predicate`.
    pub fn matching<P: Predicate<T> + ?Sized>(self, predicate: &P) -> Self {
        let Self { tree, set } = self;
        let before = set.len();
        let set = set.filter(|node| predicate.test(tree, node));
        trace!(before, after = set.len(), "matching");
        Self { tree, set }
    }

    /// Narrow the whole working set to its `index`-th node.
    ///
    /// Unlike [`lookup_at`](Self::lookup_at) this indexes the flattened set,
    /// not each root's matches.
    pub fn nth(self, index: usize) -> Self {
        let Self { tree, set } = self;
        let set = set.nth(index);
        trace!(index, found = !set.is_empty(), "nth");
        Self { tree, set }
    }

    pub fn query_all(&self) -> Vec<T::Node> {
        self.set.to_vec()
    }

    /// The first node of the working set, or `None` when it is empty.
    pub fn query_first(&self) -> Option<T::Node> {
        self.set.first()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn working_set(&self) -> &WorkingSet<T::Node> {
        &self.set
    }
}

impl NodeQuery<'_, Scene> {
    /// [`lookup`](Self::lookup) with a selector string.
    pub fn lookup_selector(self, selector: &str) -> Result<Self, SelectorError> {
        let selector = by_selector(selector)?;
        Ok(self.lookup(&selector))
    }

    /// [`lookup_at`](Self::lookup_at) with a selector string.
    pub fn lookup_at_selector(self, index: usize, selector: &str) -> Result<Self, SelectorError> {
        let selector = by_selector(selector)?;
        Ok(self.lookup_at(index, &selector))
    }

    /// [`matching`](Self::matching) with a selector string tested against
    /// each node itself.
    pub fn matching_selector(self, selector: &str) -> Result<Self, SelectorError> {
        let selector = by_selector(selector)?;
        Ok(self.matching(&selector))
    }
}
