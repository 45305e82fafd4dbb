//! Ribbon Tokens
//!
//! Data model and loader for design-token documents.
//! Each category file (`color.json`, `typography.json`, ...) is parsed into an
//! ordered [`TokenTree`]. Token values are classified once, at parse time, into
//! the [`TokenValue`] union, so later stages never have to sniff object shapes.
//!
//! ```text
//! tokens/*.json → TokenDocument::load() → TokenSet { documents: [TokenTree] }
//! ```
//!
//! # Example
//!
//! ```
//! use ribbon_tokens::{TokenDocument, TokenPath, TokenValue};
//!
//! let doc = TokenDocument::parse(
//!     "shadow",
//!     r##"{ "shadow": { "sm": { "value": { "x": 0, "y": 1, "blur": 2, "spread": 0, "color": "#000" }, "type": "boxShadow" } } }"##,
//! ).unwrap();
//! let path = TokenPath::parse("shadow.sm").unwrap();
//! assert!(matches!(doc.tree.token(&path).unwrap().value, TokenValue::Shadow(_)));
//! ```

pub mod loader;
pub mod path;
pub mod tree;
pub mod value;

use std::path::PathBuf;

pub use loader::{TokenDocument, TokenSet, CATEGORIES, STYLES_GROUP, TYPOGRAPHY_DOCUMENT};
pub use path::{fragments, kebab_case, parse_reference, Fragment, TokenPath};
pub use tree::{Token, TokenNode, TokenTree};
pub use value::{
    format_number, Atom, CompositeKind, LocaleLineHeight, Scalar, ShadowComposite,
    TokenValue, TypographyStyleComposite, CANONICAL_LOCALE,
};

/// Error raised while reading or classifying token documents.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in token document '{document}': {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token document '{document}' must be a JSON object")]
    NotAnObject { document: String },

    #[error("Malformed {kind} at '{path}': {problem}")]
    MalformedComposite {
        path: TokenPath,
        kind: CompositeKind,
        problem: String,
    },

    #[error("Invalid token path: {input:?}")]
    InvalidPath { input: String },
}
