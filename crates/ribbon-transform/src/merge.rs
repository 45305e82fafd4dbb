//! Token Merger.
//!
//! Unions the per-category trees into one. Top-level keys are merged
//! shallowly: a later document that redefines a key replaces the whole
//! earlier subtree, keeping the earlier key's position. Categories are
//! expected to be disjoint, so replacements are reported, not rejected.

use std::fmt;

use indexmap::IndexMap;
use ribbon_tokens::{TokenDocument, TokenTree};

/// A top-level key defined by more than one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub key: String,
    /// Document whose definition was discarded.
    pub replaced: String,
    /// Document whose definition won.
    pub winner: String,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' from document '{}' is replaced by document '{}'",
            self.key, self.replaced, self.winner
        )
    }
}

/// The merged tree plus every replacement that happened on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Merged {
    pub tree: TokenTree,
    pub conflicts: Vec<MergeConflict>,
}

/// Merge documents in order. Last write wins.
pub fn merge(documents: impl IntoIterator<Item = TokenDocument>) -> Merged {
    let mut merged = Merged::default();
    let mut origin: IndexMap<String, String> = IndexMap::new();

    for document in documents {
        for (key, node) in document.tree {
            if let Some(previous) = origin.insert(key.clone(), document.name.clone()) {
                let conflict = MergeConflict {
                    key: key.clone(),
                    replaced: previous,
                    winner: document.name.clone(),
                };
                tracing::warn!("token merge conflict: {conflict}");
                merged.conflicts.push(conflict);
            }
            merged.tree.insert(key, node);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ribbon_tokens::{Scalar, TokenPath, TokenValue};

    fn doc(name: &str, source: &str) -> TokenDocument {
        TokenDocument::parse(name, source).unwrap()
    }

    #[test]
    fn test_disjoint_union_keeps_document_order() {
        let merged = merge(vec![
            doc("color", r##"{ "color": { "white": { "value": "#fff" } } }"##),
            doc("spacing", r#"{ "spacing": { "m": { "value": "12px" } }, "button": { "gap": { "m": { "value": "4px" } } } }"#),
        ]);
        let keys: Vec<&String> = merged.tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "spacing", "button"]);
        assert!(merged.conflicts.is_empty());
    }

    #[test]
    fn test_last_write_wins_in_first_position() {
        let merged = merge(vec![
            doc("a", r#"{ "size": { "s": { "value": 1 } }, "other": { "x": { "value": 0 } } }"#),
            doc("b", r#"{ "size": { "l": { "value": 2 } } }"#),
        ]);

        let keys: Vec<&String> = merged.tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["size", "other"]);
        assert!(merged.tree.token(&TokenPath::parse("size.s").unwrap()).is_none());
        assert_eq!(
            merged.tree.token(&TokenPath::parse("size.l").unwrap()).unwrap().value,
            TokenValue::Scalar(Scalar::Number(2.0))
        );
        assert_eq!(
            merged.conflicts,
            vec![MergeConflict {
                key: "size".into(),
                replaced: "a".into(),
                winner: "b".into(),
            }]
        );
    }

    #[test]
    fn test_conflict_display() {
        let conflict = MergeConflict {
            key: "border".into(),
            replaced: "dimension".into(),
            winner: "border".into(),
        };
        assert_eq!(
            conflict.to_string(),
            "'border' from document 'dimension' is replaced by document 'border'"
        );
    }
}
