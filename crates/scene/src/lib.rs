//! Scene crate: a retained-mode UI scene graph
//!
//! Index-based node tree with style classes, ids and pseudo-class state.
//! Nodes are referenced by [`NodeId`] handles instead of Rc/RefCell.

pub mod node;
pub mod tree;

pub use node::*;
pub use tree::Scene;
