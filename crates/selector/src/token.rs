//! Selector tokenizer.

/// Selector token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorToken {
    Ident(String),
    /// `name(`: an identifier immediately followed by an open paren.
    Function(String),
    /// `#name`
    Hash(String),
    Whitespace,
    Colon,
    Comma,
    LParen,
    RParen,
    Delim(char),
}

impl SelectorToken {
    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Function(name) => format!("function `{name}(`"),
            Self::Hash(name) => format!("`#{name}`"),
            Self::Whitespace => "whitespace".to_string(),
            Self::Colon => "`:`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::Delim(c) => format!("`{c}`"),
        }
    }
}

/// Splits a selector string into [`SelectorToken`]s, each tagged with the
/// character offset it starts at.
pub struct SelectorTokenizer {
    input: Vec<char>,
    pos: usize,
}

impl SelectorTokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize_all(&mut self) -> Vec<(SelectorToken, usize)> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    /// Consume and return the next token with its starting offset.
    pub fn next_token(&mut self) -> Option<(SelectorToken, usize)> {
        let start = self.pos;
        let ch = *self.input.get(self.pos)?;

        if ch.is_whitespace() {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            return Some((SelectorToken::Whitespace, start));
        }

        if ch == '#' {
            self.pos += 1;
            if self.peek().is_some_and(is_name_char) || self.peek() == Some('\\') {
                let name = self.consume_name();
                return Some((SelectorToken::Hash(name), start));
            }
            return Some((SelectorToken::Delim('#'), start));
        }

        if self.would_start_ident() {
            let name = self.consume_name();
            if self.peek() == Some('(') {
                self.pos += 1;
                return Some((SelectorToken::Function(name), start));
            }
            return Some((SelectorToken::Ident(name), start));
        }

        self.pos += 1;
        let tok = match ch {
            ':' => SelectorToken::Colon,
            ',' => SelectorToken::Comma,
            '(' => SelectorToken::LParen,
            ')' => SelectorToken::RParen,
            other => SelectorToken::Delim(other),
        };
        Some((tok, start))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_at(1) {
                Some(c) => is_name_start(c) || c == '-' || c == '\\',
                None => false,
            },
            Some('\\') => self.peek_at(1).is_some(),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// Consume a run of name characters, resolving `\x` escapes to `x`.
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                match self.peek_at(1) {
                    Some(escaped) => {
                        name.push(escaped);
                        self.pos += 2;
                    }
                    None => break,
                }
            } else if is_name_char(c) {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        name
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SelectorToken> {
        SelectorTokenizer::new(input)
            .tokenize_all()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn class_and_id() {
        assert_eq!(
            kinds("Label.label#label0"),
            vec![
                SelectorToken::Ident("Label".into()),
                SelectorToken::Delim('.'),
                SelectorToken::Ident("label".into()),
                SelectorToken::Hash("label0".into()),
            ]
        );
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(
            kinds(".a  \t> .b"),
            vec![
                SelectorToken::Delim('.'),
                SelectorToken::Ident("a".into()),
                SelectorToken::Whitespace,
                SelectorToken::Delim('>'),
                SelectorToken::Whitespace,
                SelectorToken::Delim('.'),
                SelectorToken::Ident("b".into()),
            ]
        );
    }

    #[test]
    fn function_token() {
        assert_eq!(
            kinds(":not(.a)"),
            vec![
                SelectorToken::Colon,
                SelectorToken::Function("not".into()),
                SelectorToken::Delim('.'),
                SelectorToken::Ident("a".into()),
                SelectorToken::RParen,
            ]
        );
    }

    #[test]
    fn dashed_ident_and_escape() {
        assert_eq!(kinds("-fx-pane"), vec![SelectorToken::Ident("-fx-pane".into())]);
        assert_eq!(kinds("a\\.b"), vec![SelectorToken::Ident("a.b".into())]);
    }

    #[test]
    fn offsets_track_chars() {
        let tokens = SelectorTokenizer::new("a , #b").tokenize_all();
        let offsets: Vec<usize> = tokens.iter().map(|(_, at)| *at).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn lone_hash_is_delim() {
        assert_eq!(kinds("#"), vec![SelectorToken::Delim('#')]);
    }
}
