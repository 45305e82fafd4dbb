//! Ordered token trees.
//!
//! A tree maps names to nodes. A node is a [`Token`] (any JSON object with a
//! `value` key) or a nested group. Entry order is the order keys appear in the
//! source document and is preserved through every stage of the pipeline.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::path::TokenPath;
use crate::value::TokenValue;
use crate::TokenError;

/// A single design token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    /// The document's `type` field; empty when absent.
    pub token_type: String,
    /// Every other key of the token object (`description`, ...), in source order.
    pub metadata: IndexMap<String, Value>,
}

impl Token {
    pub fn new(value: TokenValue, token_type: impl Into<String>) -> Self {
        Self {
            value,
            token_type: token_type.into(),
            metadata: IndexMap::new(),
        }
    }

    /// Parse a token object. `object` must contain a `value` key.
    pub fn from_json(path: &TokenPath, object: &Map<String, Value>) -> Result<Self, TokenError> {
        let mut token_type = String::new();
        let mut metadata = IndexMap::new();
        let mut value = TokenValue::Opaque(Value::Null);

        for (key, raw) in object {
            match (key.as_str(), raw) {
                ("value", raw) => value = TokenValue::from_json(path, raw)?,
                ("type", Value::String(t)) => token_type = t.clone(),
                _ => {
                    metadata.insert(key.clone(), raw.clone());
                }
            }
        }

        Ok(Self {
            value,
            token_type,
            metadata,
        })
    }
}

/// A node in a [`TokenTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Token(Token),
    Group(TokenTree),
}

impl TokenNode {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            TokenNode::Group(group) => Some(group),
            TokenNode::Token(_) => None,
        }
    }
}

/// Insertion-ordered mapping of name → node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTree {
    entries: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a JSON object whose entries live under `prefix`.
    ///
    /// Objects with a `value` key are tokens, other objects are groups.
    /// Non-object entries carry no token and are skipped.
    pub fn from_json(
        prefix: Option<&TokenPath>,
        object: &Map<String, Value>,
    ) -> Result<Self, TokenError> {
        let mut tree = TokenTree::new();

        for (name, raw) in object {
            let path = match prefix {
                Some(prefix) => prefix.child(name),
                None => TokenPath::new([name.as_str()]),
            };
            let Value::Object(child) = raw else {
                tracing::warn!(path = %path, "skipping non-object entry in token group");
                continue;
            };
            let node = if child.contains_key("value") {
                TokenNode::Token(Token::from_json(&path, child)?)
            } else {
                TokenNode::Group(TokenTree::from_json(Some(&path), child)?)
            };
            tree.entries.insert(name.clone(), node);
        }

        Ok(tree)
    }

    /// Insert or replace an entry. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, node: TokenNode) -> Option<TokenNode> {
        self.entries.insert(name.into(), node)
    }

    pub fn get(&self, name: &str) -> Option<&TokenNode> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.entries.iter()
    }

    /// Resolve a path to a node.
    pub fn lookup(&self, path: &TokenPath) -> Option<&TokenNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.entries.get(first)?;
        for segment in rest {
            node = node.as_group()?.entries.get(segment)?;
        }
        Some(node)
    }

    /// Resolve a path to a token (not a group).
    pub fn token(&self, path: &TokenPath) -> Option<&Token> {
        self.lookup(path)?.as_token()
    }

    /// Every token with its full path, depth-first in entry order.
    pub fn tokens(&self) -> Vec<(TokenPath, &Token)> {
        let mut out = Vec::new();
        self.collect_tokens(None, &mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, prefix: Option<&TokenPath>, out: &mut Vec<(TokenPath, &'a Token)>) {
        for (name, node) in &self.entries {
            let path = match prefix {
                Some(prefix) => prefix.child(name),
                None => TokenPath::new([name.as_str()]),
            };
            match node {
                TokenNode::Token(token) => out.push((path, token)),
                TokenNode::Group(group) => group.collect_tokens(Some(&path), out),
            }
        }
    }
}

impl IntoIterator for TokenTree {
    type Item = (String, TokenNode);
    type IntoIter = indexmap::map::IntoIter<String, TokenNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, TokenNode)> for TokenTree {
    fn from_iter<I: IntoIterator<Item = (String, TokenNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
