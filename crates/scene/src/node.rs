//! Scene node model.
//!
//! All nodes live in a `Vec<Node>` owned by the [`Scene`](crate::Scene) and are
//! referenced by [`NodeId`]. The tree structure is encoded via parent/child/sibling
//! links stored directly on each node.

use std::fmt;

/// A handle that uniquely identifies a node within its scene.
///
/// Nodes are never deallocated, so a handle stays valid for the lifetime of
/// the scene that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// A single declarative attribute on a node (e.g. `styleClass="label"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single node in the scene graph.
///
/// Tree links (`parent`, `first_child`, …) form an intrusive doubly-linked
/// child list so that insertions and removals are O(1).
#[derive(Clone, Debug)]
pub struct Node {
    /// Control type, matched by type selectors (`Label`, `Pane`, ...).
    pub type_name: String,
    /// Identifier matched by `#id` selectors and `has_id`.
    pub id: Option<String>,
    /// Style classes in declaration order, duplicates removed.
    pub style_classes: Vec<String>,
    /// Active pseudo-class states (`hover`, `disabled`, ...).
    pub pseudo_classes: Vec<String>,
    /// Text content for labeled controls.
    pub text: Option<String>,
    pub visible: bool,
    /// Attributes not folded into one of the fields above.
    pub attrs: Vec<Attr>,

    // -- tree links ----------------------------------------------------------
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    /// Create a new detached, visible node with no properties set.
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            id: None,
            style_classes: Vec::new(),
            pseudo_classes: Vec::new(),
            text: None,
            visible: true,
            attrs: Vec::new(),
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Build a node from declarative attributes.
    ///
    /// `id`, `styleClass`, `text` and `visible` are extracted into their
    /// fields; everything else lands in `attrs`.
    pub fn from_attrs(type_name: &str, attrs: Vec<Attr>) -> Self {
        let mut node = Self::new(type_name);
        for attr in attrs {
            match attr.name.as_str() {
                "id" => node.id = Some(attr.value),
                "styleClass" => {
                    for class in attr.value.split_whitespace() {
                        node.add_style_class(class);
                    }
                }
                "text" => node.text = Some(attr.value),
                "visible" => node.visible = attr.value != "false",
                _ => node.attrs.push(attr),
            }
        }
        node
    }

    pub fn has_style_class(&self, class: &str) -> bool {
        self.style_classes.iter().any(|c| c == class)
    }

    pub fn has_pseudo_class(&self, state: &str) -> bool {
        self.pseudo_classes.iter().any(|p| p == state)
    }

    /// Add a style class unless it is already present.
    pub fn add_style_class(&mut self, class: &str) {
        if !self.has_style_class(class) {
            self.style_classes.push(class.to_string());
        }
    }

    pub fn remove_style_class(&mut self, class: &str) {
        self.style_classes.retain(|c| c != class);
    }

    /// Turn a pseudo-class state on or off.
    pub fn set_pseudo_class(&mut self, state: &str, active: bool) {
        if active {
            if !self.has_pseudo_class(state) {
                self.pseudo_classes.push(state.to_string());
            }
        } else {
            self.pseudo_classes.retain(|p| p != state);
        }
    }

    /// Look up a raw attribute that was not folded into a field.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attrs_extracts_known_fields() {
        let node = Node::from_attrs(
            "Label",
            vec![
                Attr::new("id", "label0"),
                Attr::new("styleClass", "label  big label"),
                Attr::new("text", "first"),
                Attr::new("visible", "false"),
                Attr::new("userData", "x"),
            ],
        );
        assert_eq!(node.id.as_deref(), Some("label0"));
        assert_eq!(node.style_classes, vec!["label", "big"]);
        assert_eq!(node.text.as_deref(), Some("first"));
        assert!(!node.visible);
        assert_eq!(node.attr("userData"), Some("x"));
        assert_eq!(node.attr("id"), None);
    }

    #[test]
    fn pseudo_class_toggle() {
        let mut node = Node::new("Button");
        node.set_pseudo_class("hover", true);
        node.set_pseudo_class("hover", true);
        assert_eq!(node.pseudo_classes, vec!["hover"]);
        node.set_pseudo_class("hover", false);
        assert!(!node.has_pseudo_class("hover"));
    }

    #[test]
    fn style_class_remove() {
        let mut node = Node::new("Pane");
        node.add_style_class("pane");
        node.add_style_class("root");
        node.remove_style_class("pane");
        assert_eq!(node.style_classes, vec!["root"]);
    }
}
