use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;
use crate::parser::parse_selector_list;

/// Combinator between compound selectors in a complex selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: ancestor descendant
    Descendant,
    /// `>`: parent > child
    Child,
}

/// Pseudo-class selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    /// Node without a parent.
    Root,
    /// Node without children.
    Empty,
    /// `:not(...)` containing a compound selector.
    Not(Box<CompoundSelector>),
    /// Any other name: an interaction state such as `hover` or `disabled`.
    State(String),
}

impl PseudoClass {
    /// Map an identifier after `:` to a pseudo-class.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "root" => Self::Root,
            "empty" => Self::Empty,
            _ => Self::State(name.to_string()),
        }
    }
}

/// A single simple selector component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Type selector, e.g. `Label`, `Pane`. Case-sensitive.
    Type(String),
    /// Universal selector `*`.
    Universal,
    /// ID selector `#foo`.
    Id(String),
    /// Style class selector `.bar`.
    Class(String),
    PseudoClass(PseudoClass),
}

/// A compound selector is a sequence of simple selectors
/// without any combinator between them (e.g. `Label.label#label0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// A complex selector is a chain of compound selectors separated by combinators.
/// Stored right-to-left for efficient matching: `parts[0]` is the rightmost
/// (subject) compound selector.
///
/// Each element is `(compound_selector, combinator_to_the_left)`.
/// The last element's combinator is always `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<(CompoundSelector, Option<Combinator>)>,
}

impl ComplexSelector {
    /// The subject (rightmost) compound selector.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.parts.first().map(|(compound, _)| compound)
    }
}

/// A comma-separated list of complex selectors. Matches when any member does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        parse_selector_list(input)
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization back to selector syntax
// ─────────────────────────────────────────────────────────────────────────────

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{name}"),
            Self::Universal => write!(f, "*"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::PseudoClass(pc) => match pc {
                PseudoClass::FirstChild => write!(f, ":first-child"),
                PseudoClass::LastChild => write!(f, ":last-child"),
                PseudoClass::OnlyChild => write!(f, ":only-child"),
                PseudoClass::Root => write!(f, ":root"),
                PseudoClass::Empty => write!(f, ":empty"),
                PseudoClass::Not(inner) => write!(f, ":not({inner})"),
                PseudoClass::State(name) => write!(f, ":{name}"),
            },
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simples {
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parts are right-to-left; print them left-to-right.
        for (i, (compound, _)) in self.parts.iter().enumerate().rev() {
            write!(f, "{compound}")?;
            if i > 0 {
                match self.parts[i - 1].1 {
                    Some(Combinator::Child) => write!(f, " > ")?,
                    _ => write!(f, " ")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
