//! Fluent queries over a retained-mode scene graph.
//!
//! ```text
//! let buttons = NodeQuery::new(&scene)
//!     .from(root_of_scene(&scene))
//!     .lookup_selector(".button")?
//!     .matching(&has_id("button1"))
//!     .query_all();
//! ```
//!
//! The scene model lives in [`scene`], the selector language in [`selector`]
//! and the query engine with its matchers in [`query`].

pub use query;
pub use scene;
pub use selector;

pub use query::{
    Lookup, NodeQuery, Predicate, SceneTree, WorkingSet, by_predicate, by_selector, has_id,
    has_style_class, has_text, is_descendant_of, is_visible, root_of_scene,
};
pub use scene::{Attr, Node, NodeId, Scene};
pub use selector::{SelectorError, SelectorList, parse_selector_list};
