//! # Selector Crate
//!
//! Tokenizer and parser for the scene selector language: type, `#id`,
//! `.style-class` and pseudo-class selectors joined by descendant and child
//! combinators.

pub mod error;
pub mod parser;
pub mod selector;
pub mod token;

pub use error::SelectorError;
pub use parser::parse_selector_list;
pub use selector::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList, SimpleSelector,
};
pub use token::{SelectorToken, SelectorTokenizer};
