//! Reusable, stateless matchers consumed by [`NodeQuery`](crate::NodeQuery).
//!
//! A [`Lookup`] turns one root into its ordered matching descendants; a
//! [`Predicate`] tests a single node. Closures implement both traits directly.

use std::fmt;
use std::str::FromStr;

use scene::{NodeId, Scene};
use selector::{SelectorError, SelectorList, parse_selector_list};

use crate::matching::matches_selector_list;
use crate::tree::SceneTree;

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a root to its matching descendants.
///
/// Implementations must be deterministic, return matches in pre-order
/// (parents before children, siblings in child order) and never include
/// `root` itself.
pub trait Lookup<T: SceneTree> {
    fn lookup(&self, tree: &T, root: T::Node) -> Vec<T::Node>;
}

/// A boolean test of a single node.
pub trait Predicate<T: SceneTree> {
    fn test(&self, tree: &T, node: T::Node) -> bool;
}

impl<T, F> Lookup<T> for F
where
    T: SceneTree,
    F: Fn(&T, T::Node) -> Vec<T::Node>,
{
    fn lookup(&self, tree: &T, root: T::Node) -> Vec<T::Node> {
        self(tree, root)
    }
}

impl<T, F> Predicate<T> for F
where
    T: SceneTree,
    F: Fn(&T, T::Node) -> bool,
{
    fn test(&self, tree: &T, node: T::Node) -> bool {
        self(tree, node)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selector
// ─────────────────────────────────────────────────────────────────────────────

/// Matches scene nodes against a parsed selector list.
///
/// As a [`Lookup`] it yields the descendants of the root that match; as a
/// [`Predicate`] it tests the node itself.
#[derive(Clone, PartialEq, Eq)]
pub struct BySelector {
    list: SelectorList,
}

impl BySelector {
    pub fn new(list: SelectorList) -> Self {
        Self { list }
    }

    pub fn selector_list(&self) -> &SelectorList {
        &self.list
    }
}

impl fmt::Debug for BySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BySelector({})", self.list)
    }
}

impl FromStr for BySelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        by_selector(s)
    }
}

/// Parse `selector` into a reusable matcher.
pub fn by_selector(selector: &str) -> Result<BySelector, SelectorError> {
    parse_selector_list(selector).map(BySelector::new)
}

impl Lookup<Scene> for BySelector {
    fn lookup(&self, scene: &Scene, root: NodeId) -> Vec<NodeId> {
        scene
            .descendants(root)
            .into_iter()
            .filter(|&node| matches_selector_list(scene, node, &self.list))
            .collect()
    }
}

impl Predicate<Scene> for BySelector {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        matches_selector_list(scene, node, &self.list)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Predicate lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Lookup of every descendant that satisfies a predicate.
#[derive(Clone, Debug)]
pub struct ByPredicate<P>(P);

pub fn by_predicate<P>(predicate: P) -> ByPredicate<P> {
    ByPredicate(predicate)
}

impl<T: SceneTree, P: Predicate<T>> Lookup<T> for ByPredicate<P> {
    fn lookup(&self, tree: &T, root: T::Node) -> Vec<T::Node> {
        tree.descendants(root)
            .into_iter()
            .filter(|&node| self.0.test(tree, node))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node predicates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HasId(String);

/// Node whose `id` equals `id`.
pub fn has_id(id: &str) -> HasId {
    HasId(id.to_string())
}

impl Predicate<Scene> for HasId {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        scene
            .node(node)
            .is_some_and(|n| n.id.as_deref() == Some(self.0.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HasStyleClass(String);

pub fn has_style_class(class: &str) -> HasStyleClass {
    HasStyleClass(class.to_string())
}

impl Predicate<Scene> for HasStyleClass {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        scene.node(node).is_some_and(|n| n.has_style_class(&self.0))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HasText(String);

/// Node whose text is exactly `text`. Nodes without text never match.
pub fn has_text(text: &str) -> HasText {
    HasText(text.to_string())
}

impl Predicate<Scene> for HasText {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        scene
            .node(node)
            .is_some_and(|n| n.text.as_deref() == Some(self.0.as_str()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsVisible;

pub fn is_visible() -> IsVisible {
    IsVisible
}

impl Predicate<Scene> for IsVisible {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        scene.node(node).is_some_and(|n| n.visible)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsDescendantOf(NodeId);

/// Node strictly below `ancestor`.
pub fn is_descendant_of(ancestor: NodeId) -> IsDescendantOf {
    IsDescendantOf(ancestor)
}

impl Predicate<Scene> for IsDescendantOf {
    fn test(&self, scene: &Scene, node: NodeId) -> bool {
        scene.is_descendant_of(node, self.0)
    }
}

/// The root node of `scene`, if one is set.
pub fn root_of_scene(scene: &Scene) -> Option<NodeId> {
    scene.root()
}
