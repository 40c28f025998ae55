//! Read-only traversal capability the query engine needs from a host tree.

use std::fmt::Debug;
use std::hash::Hash;

use scene::{NodeId, Scene};

/// A tree the engine can walk. Nodes are compared by identity (`Eq`/`Hash`).
pub trait SceneTree {
    type Node: Copy + Eq + Hash + Debug;

    /// Immediate children of `node` in child order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// All descendants of `node` in pre-order, excluding `node` itself.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node);
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }
}

impl SceneTree for Scene {
    type Node = NodeId;

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        Scene::children(self, node)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        Scene::descendants(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary heap layout over `0..len`: children of `n` are `2n+1` and `2n+2`.
    struct HeapTree {
        len: u32,
    }

    impl SceneTree for HeapTree {
        type Node = u32;

        fn children(&self, node: u32) -> Vec<u32> {
            [2 * node + 1, 2 * node + 2]
                .into_iter()
                .filter(|&c| c < self.len)
                .collect()
        }
    }

    #[test]
    fn default_descendants_are_preorder() {
        let tree = HeapTree { len: 7 };
        assert_eq!(tree.descendants(0), vec![1, 3, 4, 2, 5, 6]);
        assert_eq!(tree.descendants(2), vec![5, 6]);
        assert!(tree.descendants(6).is_empty());
    }
}
