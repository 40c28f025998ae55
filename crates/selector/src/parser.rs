//! Selector parser.
//!
//! Grammar, whitespace aside:
//!
//! ```text
//! list      := complex ( ',' complex )*
//! complex   := compound ( ( ' ' | '>' ) compound )*
//! compound  := ( type | '*' )? ( '#' id | '.' class | ':' pseudo )*
//! pseudo    := ident | 'not(' compound ')'
//! ```
//!
//! Unlike a stylesheet parser, nothing is skipped: any token that does not fit
//! the grammar rejects the whole selector.

use tracing::debug;

use crate::error::SelectorError;
use crate::selector::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList, SimpleSelector,
};
use crate::token::{SelectorToken, SelectorTokenizer};

/// Parse a comma-separated selector list.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = SelectorTokenizer::new(input).tokenize_all();
    let result = Parser {
        tokens,
        pos: 0,
        in_negation: false,
    }
    .parse_list();
    if let Err(err) = &result {
        debug!(input, %err, "selector rejected");
    }
    result
}

struct Parser {
    tokens: Vec<(SelectorToken, usize)>,
    pos: usize,
    /// Inside `:not(...)`, where another `:not` is not allowed.
    in_negation: bool,
}

impl Parser {
    fn peek(&self) -> Option<&SelectorToken> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, at)| *at).unwrap_or(0)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Skip whitespace, reporting whether any was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek() == Some(&SelectorToken::Whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Error for the current token, or for running out of input.
    fn unexpected(&self) -> SelectorError {
        match self.tokens.get(self.pos) {
            Some((tok, at)) => SelectorError::UnexpectedToken {
                found: tok.describe(),
                position: *at,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn at_selector_end(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(SelectorToken::Comma) | Some(SelectorToken::RParen)
        )
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selectors = vec![self.parse_complex()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(SelectorToken::Comma) => {
                    self.bump();
                    self.skip_whitespace();
                    selectors.push(self.parse_complex()?);
                }
                Some(_) => return Err(self.unexpected()),
            }
        }

        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts_ltr: Vec<(CompoundSelector, Option<Combinator>)> =
            vec![(self.parse_compound()?, None)];

        loop {
            let had_whitespace = self.skip_whitespace();
            if self.at_selector_end() {
                break;
            }

            let at = self.offset();
            let combinator = match self.peek() {
                Some(SelectorToken::Delim('>')) => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
                None => break,
            };

            if self.at_selector_end() {
                return Err(SelectorError::DanglingCombinator { position: at });
            }
            parts_ltr.push((self.parse_compound()?, Some(combinator)));
        }

        // Each element's combinator links it to the element on its left;
        // after reversing it links to the next element in right-to-left order.
        parts_ltr.reverse();
        Ok(ComplexSelector { parts: parts_ltr })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut simples = Vec::new();

        match self.peek() {
            Some(SelectorToken::Ident(name)) => {
                simples.push(SimpleSelector::Type(name.clone()));
                self.bump();
            }
            Some(SelectorToken::Delim('*')) => {
                simples.push(SimpleSelector::Universal);
                self.bump();
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some(SelectorToken::Hash(id)) => {
                    simples.push(SimpleSelector::Id(id.clone()));
                    self.bump();
                }
                Some(SelectorToken::Delim('.')) => {
                    self.bump();
                    match self.peek() {
                        Some(SelectorToken::Ident(class)) => {
                            simples.push(SimpleSelector::Class(class.clone()));
                            self.bump();
                        }
                        _ => return Err(self.unexpected()),
                    }
                }
                Some(SelectorToken::Colon) => {
                    self.bump();
                    simples.push(SimpleSelector::PseudoClass(self.parse_pseudo_class()?));
                }
                // A type selector may only lead the compound.
                Some(SelectorToken::Ident(_)) | Some(SelectorToken::Delim('*')) => {
                    return Err(self.unexpected());
                }
                _ => break,
            }
        }

        if simples.is_empty() {
            return Err(self.unexpected());
        }
        Ok(CompoundSelector { simples })
    }

    fn parse_pseudo_class(&mut self) -> Result<PseudoClass, SelectorError> {
        match self.peek() {
            Some(SelectorToken::Ident(name)) => {
                let pc = PseudoClass::from_name(name);
                self.bump();
                Ok(pc)
            }
            Some(SelectorToken::Function(name)) if name.eq_ignore_ascii_case("not") => {
                if self.in_negation {
                    return Err(self.unexpected());
                }
                let opened_at = self.offset();
                self.bump();
                self.skip_whitespace();
                self.in_negation = true;
                let inner = self.parse_compound();
                self.in_negation = false;
                let inner = inner?;
                self.skip_whitespace();
                match self.peek() {
                    Some(SelectorToken::RParen) => {
                        self.bump();
                        Ok(PseudoClass::Not(Box::new(inner)))
                    }
                    None => Err(SelectorError::UnclosedParen { position: opened_at }),
                    Some(_) => Err(self.unexpected()),
                }
            }
            _ => Err(self.unexpected()),
        }
    }
}
