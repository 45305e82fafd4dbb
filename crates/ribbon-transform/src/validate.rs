//! Pre-flight validation.
//!
//! Inspects the merged tree without changing it. Diagnostics are advisory:
//! callers decide whether they fail the build (see [`ensure_clean`]).

use std::fmt;

use ribbon_tokens::{TokenPath, TokenTree};

use crate::merge::{MergeConflict, Merged};

/// A problem found in the merged token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// `path` refers to `reference`, which is not a token in the tree.
    DanglingReference {
        path: TokenPath,
        reference: TokenPath,
    },
    /// Two documents defined the same top-level key.
    MergeConflict(MergeConflict),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingReference { path, reference } => {
                write!(f, "{path}: reference {{{reference}}} does not resolve to a token")
            }
            Diagnostic::MergeConflict(conflict) => write!(f, "merge conflict: {conflict}"),
        }
    }
}

/// Diagnostics promoted to a hard failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Validation failed with {} problem(s):\n{}", .diagnostics.len(), render(.diagnostics))]
pub struct ValidationError {
    pub diagnostics: Vec<Diagnostic>,
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  - {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// References (whole-value or embedded) that name no token in `tree`.
pub fn dangling_references(tree: &TokenTree) -> Vec<Diagnostic> {
    tree.tokens()
        .into_iter()
        .flat_map(|(path, token)| {
            token
                .value
                .references()
                .into_iter()
                .filter(move |reference| tree.token(reference).is_none())
                .map(move |reference| Diagnostic::DanglingReference {
                    path: path.clone(),
                    reference,
                })
        })
        .collect()
}

/// All diagnostics for a merge result: conflicts first, then dangling references.
pub fn validate(merged: &Merged) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = merged
        .conflicts
        .iter()
        .cloned()
        .map(Diagnostic::MergeConflict)
        .collect();
    diagnostics.extend(dangling_references(&merged.tree));
    diagnostics
}

/// Fail if there is at least one diagnostic.
pub fn ensure_clean(diagnostics: Vec<Diagnostic>) -> Result<(), ValidationError> {
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { diagnostics })
    }
}
