//! Selector matching: decide whether a scene node matches a selector.
//!
//! Complex selectors are matched **right-to-left**: we start with the rightmost
//! (subject) compound selector, then walk up the scene following each
//! combinator. Ancestors above the node a lookup started from are visible to
//! the walk.

use scene::{Node, NodeId, Scene};
use selector::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList, SimpleSelector,
};

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Test whether `node_id` matches any selector in the list.
pub fn matches_selector_list(scene: &Scene, node_id: NodeId, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_selector(scene, node_id, selector))
}

/// Test whether `node_id` matches a full complex selector.
pub fn matches_selector(scene: &Scene, node_id: NodeId, selector: &ComplexSelector) -> bool {
    let Some((subject, combinator_to_left)) = selector.parts.first() else {
        return false;
    };

    if !matches_compound(scene, node_id, subject) {
        return false;
    }

    let mut current = node_id;
    let mut combinator = *combinator_to_left;

    for (compound, next_combinator) in &selector.parts[1..] {
        match combinator {
            Some(Combinator::Descendant) => {
                let mut ancestor = scene.parent(current);
                let mut found = false;
                while let Some(anc_id) = ancestor {
                    if matches_compound(scene, anc_id, compound) {
                        current = anc_id;
                        found = true;
                        break;
                    }
                    ancestor = scene.parent(anc_id);
                }
                if !found {
                    return false;
                }
            }
            Some(Combinator::Child) => match scene.parent(current) {
                Some(parent_id) if matches_compound(scene, parent_id, compound) => {
                    current = parent_id;
                }
                _ => return false,
            },
            // Only the leftmost part has no combinator.
            None => return false,
        }
        combinator = *next_combinator;
    }

    true
}

/// Test whether `node_id` matches a compound selector (all simples must match).
pub fn matches_compound(scene: &Scene, node_id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(node) = scene.node(node_id) else {
        return false;
    };
    compound
        .simples
        .iter()
        .all(|simple| matches_simple(scene, node_id, node, simple))
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────────────────────

fn matches_simple(scene: &Scene, node_id: NodeId, node: &Node, simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => node.type_name == *name,
        SimpleSelector::Id(id) => node.id.as_deref() == Some(id.as_str()),
        SimpleSelector::Class(class) => node.has_style_class(class),
        SimpleSelector::PseudoClass(pc) => matches_pseudo_class(scene, node_id, node, pc),
    }
}

fn matches_pseudo_class(scene: &Scene, node_id: NodeId, node: &Node, pc: &PseudoClass) -> bool {
    match pc {
        PseudoClass::FirstChild => node.parent.is_some() && node.prev_sibling.is_none(),
        PseudoClass::LastChild => node.parent.is_some() && node.next_sibling.is_none(),
        PseudoClass::OnlyChild => {
            node.parent.is_some() && node.prev_sibling.is_none() && node.next_sibling.is_none()
        }
        PseudoClass::Root => node.parent.is_none(),
        PseudoClass::Empty => node.first_child.is_none(),
        PseudoClass::Not(inner) => !matches_compound(scene, node_id, inner),
        PseudoClass::State(state) => node.has_pseudo_class(state),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
