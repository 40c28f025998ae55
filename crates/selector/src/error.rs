use thiserror::Error;

/// Reasons a selector string is rejected.
///
/// Positions are character offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found} at offset {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("combinator at offset {position} is not followed by a selector")]
    DanglingCombinator { position: usize },

    #[error("parenthesis opened at offset {position} is never closed")]
    UnclosedParen { position: usize },
}
