//! Token Loader.
//!
//! Reads one JSON document per category from the tokens directory. Nothing is
//! cached: every build invocation loads the documents fresh.

use std::path::Path;

use serde_json::Value;

use crate::tree::TokenTree;
use crate::TokenError;

/// Category documents, in merge order.
pub const CATEGORIES: [&str; 7] = [
    "color",
    "dimension",
    "spacing",
    "typography",
    "shadow",
    "borderRadius",
    "border",
];

/// Document that carries the typography styles group.
pub const TYPOGRAPHY_DOCUMENT: &str = "typography";

/// Top-level group holding composite typography styles.
pub const STYLES_GROUP: &str = "styles";

/// One parsed category document.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    pub name: String,
    pub tree: TokenTree,
}

impl TokenDocument {
    /// Parse JSON source text.
    pub fn parse(name: &str, source: &str) -> Result<Self, TokenError> {
        let value: Value = serde_json::from_str(source).map_err(|e| TokenError::Json {
            document: name.to_string(),
            source: e,
        })?;
        Self::from_value(name, &value)
    }

    /// Build a document from an already-decoded JSON value.
    pub fn from_value(name: &str, value: &Value) -> Result<Self, TokenError> {
        let Value::Object(map) = value else {
            return Err(TokenError::NotAnObject {
                document: name.to_string(),
            });
        };
        let tree = TokenTree::from_json(None, map)?;
        tracing::debug!(document = name, tokens = tree.tokens().len(), "parsed token document");
        Ok(Self {
            name: name.to_string(),
            tree,
        })
    }

    /// Read `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, TokenError> {
        let path = dir.join(format!("{name}.json"));
        let source = std::fs::read_to_string(&path).map_err(|e| TokenError::Io {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(name, &source)
    }
}

/// All category documents for one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    pub documents: Vec<TokenDocument>,
}

impl TokenSet {
    pub fn new(documents: Vec<TokenDocument>) -> Self {
        Self { documents }
    }

    /// Load every document in [`CATEGORIES`] from `dir`.
    ///
    /// Any missing or unreadable document aborts the load.
    pub fn load(dir: &Path) -> Result<Self, TokenError> {
        Self::load_categories(dir, &CATEGORIES)
    }

    pub fn load_categories(dir: &Path, categories: &[&str]) -> Result<Self, TokenError> {
        let documents = categories
            .iter()
            .map(|name| TokenDocument::load(dir, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { documents })
    }

    pub fn document(&self, name: &str) -> Option<&TokenDocument> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// Copy of the pre-flatten typography styles group.
    ///
    /// Taken before flattening so the utility-class generator still sees the
    /// composite shape of each style.
    pub fn typography_styles(&self) -> Option<TokenTree> {
        let document = self.document(TYPOGRAPHY_DOCUMENT)?;
        document.tree.get(STYLES_GROUP)?.as_group().cloned()
    }
}
