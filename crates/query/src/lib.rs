//! # Query Crate
//!
//! Fluent node queries over a scene tree: seed a working set, narrow it with
//! lookups and predicates, then read the result.

pub mod matchers;
pub mod matching;
pub mod node_query;
pub mod tree;
pub mod working_set;

pub use matchers::{
    ByPredicate, BySelector, HasId, HasStyleClass, HasText, IsDescendantOf, IsVisible, Lookup,
    Predicate, by_predicate, by_selector, has_id, has_style_class, has_text, is_descendant_of,
    is_visible, root_of_scene,
};
pub use matching::{matches_compound, matches_selector, matches_selector_list};
pub use node_query::NodeQuery;
pub use selector::SelectorError;
pub use tree::SceneTree;
pub use working_set::WorkingSet;
