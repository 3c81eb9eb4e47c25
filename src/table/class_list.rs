//! Class-token lists attached to cells.
//!
//! A class list behaves like an HTML `class` attribute: an ordered set of
//! whitespace-free tokens. Sortable header cells are recognized by a token of
//! the form `<prefix><method>`, and the current direction is rendered as a
//! `<prefix>asc` / `<prefix>desc` token.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, duplicate-free list of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated class attribute.
    ///
    /// Repeated tokens are kept once, at their first position.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::new();
        for token in attr.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Add a token. Returns false if it was already present or is not a
    /// valid token (empty or containing whitespace).
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || token.contains(char::is_whitespace) || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns true if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Check whether the token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Iterate over the suffixes of every token starting with `prefix`.
    ///
    /// Tokens equal to the bare prefix are skipped.
    pub fn suffixes<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter_map(move |t| t.strip_prefix(prefix))
            .filter(|rest| !rest.is_empty())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the list has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

impl From<&str> for ClassList {
    fn from(attr: &str) -> Self {
        Self::parse(attr)
    }
}

impl Serialize for ClassList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attr = String::deserialize(deserializer)?;
        Ok(Self::parse(&attr))
    }
}
