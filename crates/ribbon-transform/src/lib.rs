//! Ribbon Transform
//!
//! Turns the raw category documents into the single flat token tree the CSS
//! generators consume.
//!
//! ```text
//! TokenSet → keep pre-flatten styles → flatten each document → merge → Transformed
//! ```
//!
//! The typography styles group is copied *before* flattening: the utility-class
//! generator needs the composite shape to know which three variables each
//! style maps to.

pub mod flatten;
pub mod merge;
pub mod validate;

pub use flatten::{decompose_typography_style, flatten, flatten_line_height, flatten_shadow};
pub use merge::{merge, MergeConflict, Merged};
pub use validate::{dangling_references, ensure_clean, validate, Diagnostic, ValidationError};

use ribbon_tokens::{TokenDocument, TokenSet, TokenTree};

/// Output of the transform stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Merged, fully flattened tree.
    pub merged: Merged,
    /// Pre-flatten typography styles group, if present.
    pub styles: Option<TokenTree>,
}

impl Transformed {
    pub fn tree(&self) -> &TokenTree {
        &self.merged.tree
    }

    /// Run the pre-flight checks over the merged tree.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        validate(&self.merged)
    }
}

/// Flatten every document, then merge them in order.
pub fn transform(set: TokenSet) -> Transformed {
    let styles = set.typography_styles();

    let documents = set.documents.into_iter().map(|document| TokenDocument {
        tree: flatten(document.tree),
        name: document.name,
    });
    let merged = merge(documents);

    tracing::debug!(
        tokens = merged.tree.tokens().len(),
        conflicts = merged.conflicts.len(),
        "merged token tree"
    );

    Transformed { merged, styles }
}
