//! Scene graph operations.
//!
//! The [`Scene`] struct owns every [`Node`] and provides tree-manipulation
//! methods that keep the intrusive parent/child/sibling links consistent.

use tracing::trace;

use crate::node::{Attr, Node, NodeId};

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A scene graph: a set of nodes plus an optional root.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Scene {
    /// Create an empty scene (no root yet).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// The scene root, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Make `node` the scene root. It is detached from any parent first.
    pub fn set_root(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        trace!(?node, "scene root set");
        self.root = Some(node);
    }

    // =======================================================================
    // Node creation
    // =======================================================================

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached node of the given type.
    ///
    /// `id`, `styleClass`, `text` and `visible` are extracted from `attrs`.
    pub fn create_node(&mut self, type_name: &str, attrs: Vec<Attr>) -> NodeId {
        self.allocate(Node::from_attrs(type_name, attrs))
    }

    /// Convenience: create a node with no attributes.
    pub fn create_control(&mut self, type_name: &str) -> NodeId {
        self.allocate(Node::new(type_name))
    }

    // =======================================================================
    // Tree mutation
    // =======================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent it is first removed from its current
    /// position. Appending a node below its own subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_descendant_of(parent, child) {
            return;
        }
        if self.nodes[child.index()].parent.is_some() {
            self.detach(child);
        }

        let old_last = self.nodes[parent.index()].last_child;

        if let Some(old_last_id) = old_last {
            self.nodes[old_last_id.index()].next_sibling = Some(child);
        }

        let child_node = &mut self.nodes[child.index()];
        child_node.parent = Some(parent);
        child_node.prev_sibling = old_last;
        child_node.next_sibling = None;

        let parent_node = &mut self.nodes[parent.index()];
        if parent_node.first_child.is_none() {
            parent_node.first_child = Some(child);
        }
        parent_node.last_child = Some(child);
    }

    /// Remove `child` from `parent`'s child list.
    ///
    /// The child becomes a detached subtree root. Does nothing if `child`
    /// does not belong to `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let belongs = self
            .node(child)
            .map(|n| n.parent == Some(parent))
            .unwrap_or(false);
        if !belongs {
            return;
        }
        self.detach(child);
    }

    /// Insert `child` into `parent`'s child list immediately before `reference`.
    ///
    /// If `reference` is `None` this behaves like `append_child`. Inserting a
    /// node into itself or below its own subtree is ignored.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let reference = match reference {
            Some(r) if r != child => r,
            _ => {
                self.append_child(parent, child);
                return;
            }
        };
        let ref_belongs = self
            .node(reference)
            .map(|n| n.parent == Some(parent))
            .unwrap_or(false);
        if parent == child
            || !ref_belongs
            || !self.contains(child)
            || self.is_descendant_of(parent, child)
        {
            return;
        }

        if self.nodes[child.index()].parent.is_some() {
            self.detach(child);
        }

        let prev_of_ref = self.nodes[reference.index()].prev_sibling;

        let child_node = &mut self.nodes[child.index()];
        child_node.parent = Some(parent);
        child_node.prev_sibling = prev_of_ref;
        child_node.next_sibling = Some(reference);

        self.nodes[reference.index()].prev_sibling = Some(child);

        match prev_of_ref {
            Some(prev_id) => self.nodes[prev_id.index()].next_sibling = Some(child),
            None => self.nodes[parent.index()].first_child = Some(child),
        }
    }

    /// Detach a node from its parent. The node and its subtree stay alive.
    fn detach(&mut self, node_id: NodeId) {
        let (parent_id, prev, next) = match self.node(node_id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(prev_id) = prev {
            self.nodes[prev_id.index()].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.index()].prev_sibling = prev;
        }

        if let Some(pid) = parent_id {
            let parent_node = &mut self.nodes[pid.index()];
            if parent_node.first_child == Some(node_id) {
                parent_node.first_child = next;
            }
            if parent_node.last_child == Some(node_id) {
                parent_node.last_child = prev;
            }
        }

        let node = &mut self.nodes[node_id.index()];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    // =======================================================================
    // Property mutation
    // =======================================================================

    pub fn add_style_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.add_style_class(class);
        }
    }

    pub fn remove_style_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.remove_style_class(class);
        }
    }

    pub fn set_pseudo_class(&mut self, node: NodeId, state: &str, active: bool) {
        if let Some(n) = self.node_mut(node) {
            n.set_pseudo_class(state, active);
        }
    }

    pub fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = Some(text.to_string());
        }
    }

    // =======================================================================
    // Traversal
    // =======================================================================

    /// Return the immediate children of `parent` in child order.
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.node(parent).and_then(|n| n.first_child);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.node(id).and_then(|n| n.next_sibling);
        }
        out
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Return the chain of ancestors from `node` up to (and including) the
    /// topmost one. The first element is the direct parent.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.parent(id);
        }
        out
    }

    /// Return all descendants of `node` in pre-order DFS (not including `node` itself).
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node);
        stack.reverse();

        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// The topmost ancestor of `node`, or `node` itself when detached.
    pub fn root_of(&self, node: NodeId) -> Option<NodeId> {
        if !self.contains(node) {
            return None;
        }
        Some(self.ancestors(node).last().copied().unwrap_or(node))
    }

    /// Is `node` a strict descendant of `ancestor`?
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    // =======================================================================
    // Queries
    // =======================================================================

    /// Find the first node with the given `id` in the subtree rooted at
    /// `root` (pre-order DFS, `root` included).
    pub fn get_node_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|&n| self.node(n).and_then(|n| n.id.as_deref()) == Some(id))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a small scene and return the relevant node ids.
    ///
    /// ```text
    /// VBox (root)
    /// ├── Pane#labels
    /// │   ├── Label.label#label0
    /// │   └── Label.label#label1
    /// └── Pane#buttons
    ///     └── Button.button#button0
    /// ```
    fn build_sample_scene() -> (Scene, NodeId, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene.create_control("VBox");
        let labels = scene.create_node("Pane", vec![Attr::new("id", "labels")]);
        let label0 = scene.create_node(
            "Label",
            vec![Attr::new("id", "label0"), Attr::new("styleClass", "label")],
        );
        let label1 = scene.create_node(
            "Label",
            vec![Attr::new("id", "label1"), Attr::new("styleClass", "label")],
        );
        let buttons = scene.create_node("Pane", vec![Attr::new("id", "buttons")]);
        let button0 = scene.create_node(
            "Button",
            vec![Attr::new("id", "button0"), Attr::new("styleClass", "button")],
        );

        scene.set_root(root);
        scene.append_child(root, labels);
        scene.append_child(labels, label0);
        scene.append_child(labels, label1);
        scene.append_child(root, buttons);
        scene.append_child(buttons, button0);

        (scene, root, labels, label0, label1, buttons, button0)
    }

    // -- append_child -------------------------------------------------------

    #[test]
    fn append_child_sets_links() {
        let mut scene = Scene::new();
        let parent = scene.create_control("HBox");
        let c1 = scene.create_control("Label");
        let c2 = scene.create_control("Button");

        scene.append_child(parent, c1);
        scene.append_child(parent, c2);

        let p = scene.node(parent).unwrap();
        assert_eq!(p.first_child, Some(c1));
        assert_eq!(p.last_child, Some(c2));

        let n1 = scene.node(c1).unwrap();
        assert_eq!(n1.parent, Some(parent));
        assert_eq!(n1.prev_sibling, None);
        assert_eq!(n1.next_sibling, Some(c2));

        let n2 = scene.node(c2).unwrap();
        assert_eq!(n2.prev_sibling, Some(c1));
        assert_eq!(n2.next_sibling, None);
    }

    #[test]
    fn append_child_moves_from_old_parent() {
        let mut scene = Scene::new();
        let p1 = scene.create_control("Pane");
        let p2 = scene.create_control("Pane");
        let child = scene.create_control("Label");

        scene.append_child(p1, child);
        scene.append_child(p2, child);
        assert!(scene.children(p1).is_empty());
        assert_eq!(scene.children(p2), vec![child]);
    }

    #[test]
    fn append_child_to_itself_is_noop() {
        let mut scene = Scene::new();
        let pane = scene.create_control("Pane");
        scene.append_child(pane, pane);
        assert!(scene.children(pane).is_empty());
        assert_eq!(scene.parent(pane), None);
    }

    #[test]
    fn append_ancestor_below_descendant_is_noop() {
        let (mut scene, root, labels, label0, ..) = build_sample_scene();
        scene.append_child(label0, labels);
        assert_eq!(scene.parent(labels), Some(root));
        assert!(scene.children(label0).is_empty());
    }

    #[test]
    fn insert_before_self_is_noop() {
        let mut scene = Scene::new();
        let pane = scene.create_control("Pane");
        let label = scene.create_control("Label");
        scene.append_child(pane, label);

        scene.insert_before(pane, pane, Some(label));
        assert_eq!(scene.parent(pane), None);
        assert_eq!(scene.children(pane), vec![label]);
        assert_eq!(scene.descendants(pane), vec![label]);
    }

    #[test]
    fn insert_ancestor_below_descendant_is_noop() {
        let (mut scene, root, labels, label0, label1, ..) = build_sample_scene();
        scene.insert_before(labels, root, Some(label1));
        assert_eq!(scene.parent(root), None);
        assert_eq!(scene.children(labels), vec![label0, label1]);
    }

    // -- remove_child -------------------------------------------------------

    #[test]
    fn remove_child_detaches() {
        let mut scene = Scene::new();
        let parent = scene.create_control("VBox");
        let a = scene.create_control("Label");
        let b = scene.create_control("Label");
        let c = scene.create_control("Label");
        scene.append_child(parent, a);
        scene.append_child(parent, b);
        scene.append_child(parent, c);

        scene.remove_child(parent, b);
        assert_eq!(scene.children(parent), vec![a, c]);
        assert_eq!(scene.node(a).unwrap().next_sibling, Some(c));
        assert_eq!(scene.node(c).unwrap().prev_sibling, Some(a));

        let nb = scene.node(b).unwrap();
        assert_eq!(nb.parent, None);
        assert_eq!(nb.prev_sibling, None);
        assert_eq!(nb.next_sibling, None);
    }

    #[test]
    fn remove_child_wrong_parent_is_noop() {
        let mut scene = Scene::new();
        let p1 = scene.create_control("Pane");
        let p2 = scene.create_control("Pane");
        let child = scene.create_control("Label");
        scene.append_child(p1, child);
        scene.remove_child(p2, child);
        assert_eq!(scene.children(p1), vec![child]);
    }

    // -- insert_before ------------------------------------------------------

    #[test]
    fn insert_before_first_and_middle() {
        let mut scene = Scene::new();
        let parent = scene.create_control("VBox");
        let a = scene.create_control("Label");
        let b = scene.create_control("Label");
        let c = scene.create_control("Label");

        scene.append_child(parent, c);
        scene.insert_before(parent, a, Some(c));
        scene.insert_before(parent, b, Some(c));

        assert_eq!(scene.children(parent), vec![a, b, c]);
        let p = scene.node(parent).unwrap();
        assert_eq!(p.first_child, Some(a));
        assert_eq!(p.last_child, Some(c));
    }

    #[test]
    fn insert_before_none_appends() {
        let mut scene = Scene::new();
        let parent = scene.create_control("VBox");
        let a = scene.create_control("Label");
        let b = scene.create_control("Label");
        scene.append_child(parent, a);
        scene.insert_before(parent, b, None);
        assert_eq!(scene.children(parent), vec![a, b]);
    }

    #[test]
    fn remove_and_reinsert() {
        let mut scene = Scene::new();
        let parent = scene.create_control("VBox");
        let a = scene.create_control("Label");
        let b = scene.create_control("Label");
        let c = scene.create_control("Label");
        scene.append_child(parent, a);
        scene.append_child(parent, b);
        scene.append_child(parent, c);

        scene.remove_child(parent, b);
        scene.insert_before(parent, b, Some(a));
        assert_eq!(scene.children(parent), vec![b, a, c]);
    }

    // -- traversal ----------------------------------------------------------

    #[test]
    fn descendants_preorder() {
        let (scene, root, labels, label0, label1, buttons, button0) = build_sample_scene();
        assert_eq!(
            scene.descendants(root),
            vec![labels, label0, label1, buttons, button0]
        );
        assert!(scene.descendants(label0).is_empty());
    }

    #[test]
    fn ancestors_chain() {
        let (scene, root, labels, label0, ..) = build_sample_scene();
        assert_eq!(scene.ancestors(label0), vec![labels, root]);
        assert!(scene.ancestors(root).is_empty());
    }

    #[test]
    fn root_of_walks_to_top() {
        let (mut scene, root, labels, label0, ..) = build_sample_scene();
        assert_eq!(scene.root_of(label0), Some(root));
        scene.remove_child(root, labels);
        assert_eq!(scene.root_of(label0), Some(labels));
    }

    #[test]
    fn is_descendant_of_is_strict() {
        let (scene, root, labels, label0, _, buttons, _) = build_sample_scene();
        assert!(scene.is_descendant_of(label0, root));
        assert!(scene.is_descendant_of(label0, labels));
        assert!(!scene.is_descendant_of(label0, buttons));
        assert!(!scene.is_descendant_of(root, root));
    }

    #[test]
    fn set_root_detaches() {
        let (mut scene, root, labels, ..) = build_sample_scene();
        scene.set_root(labels);
        assert_eq!(scene.root(), Some(labels));
        assert_eq!(scene.parent(labels), None);
        assert_eq!(scene.children(root).len(), 1);
    }

    // -- queries ------------------------------------------------------------

    #[test]
    fn get_node_by_id_found_and_missing() {
        let (scene, root, _, _, label1, _, button0) = build_sample_scene();
        assert_eq!(scene.get_node_by_id(root, "label1"), Some(label1));
        assert_eq!(scene.get_node_by_id(root, "button0"), Some(button0));
        assert_eq!(scene.get_node_by_id(root, "nope"), None);
    }

    #[test]
    fn unknown_handle_is_absent() {
        let (scene, ..) = build_sample_scene();
        let bogus = NodeId(999);
        assert!(scene.node(bogus).is_none());
        assert!(scene.children(bogus).is_empty());
        assert_eq!(scene.root_of(bogus), None);
    }
}
