//! Variable Emitter.
//!
//! Walks the merged, flattened token tree and emits one CSS custom property
//! per token inside a single `:root` block. References are emitted as `var()`
//! expressions, never as the referenced literal, so a change to the referenced
//! token cascades at render time.

use indexmap::IndexMap;
use ribbon_tokens::{Atom, TokenTree, TokenValue};

use crate::css::{decl, Stylesheet};
use crate::CodegenError;

/// Banner at the top of `variables.css`.
pub const HEADER: &str = "/**\n * Do not edit directly, this file was auto-generated.\n */\n\n";

/// Generate `variables.css` for a flattened tree.
///
/// Fails if a composite value is still present: flatten the tree first.
pub fn generate(tree: &TokenTree) -> Result<String, CodegenError> {
    let mut properties: IndexMap<String, String> = IndexMap::new();

    for (path, token) in tree.tokens() {
        let value = match &token.value {
            TokenValue::Scalar(scalar) => Atom::Scalar(scalar.clone()).to_css(),
            TokenValue::Reference(target) => target.css_var(),
            TokenValue::Opaque(raw) => {
                tracing::warn!(path = %path, "emitting unrecognised token value as JSON");
                raw.to_string()
            }
            TokenValue::Shadow(_)
            | TokenValue::LocaleLineHeight(_)
            | TokenValue::TypographyStyle(_) => {
                return Err(CodegenError::UnflattenedComposite { path });
            }
        };

        let name = path.css_property();
        if let Some(previous) = properties.insert(name.clone(), value) {
            tracing::warn!(
                property = %name,
                path = %path,
                replaced = %previous,
                "custom property defined twice, keeping the later value"
            );
        }
    }

    let declarations: Vec<_> = properties
        .into_iter()
        .map(|(name, value)| decl(name, value))
        .collect();

    let mut css = Stylesheet::new();
    css.raw(HEADER).rule(":root", &declarations);
    Ok(css.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ribbon_tokens::{TokenDocument, TokenPath};
    use ribbon_transform::flatten;

    fn flat(source: &str) -> TokenTree {
        flatten(TokenDocument::parse("test", source).unwrap().tree)
    }

    fn body(css: &str) -> &str {
        css.strip_prefix(HEADER).unwrap()
    }

    #[test]
    fn test_scalars_and_references() {
        let css = generate(&flat(
            r##"{
                "color": {
                    "white": { "value": "#ffffff" },
                    "button": { "brandSolid": { "fg": { "value": "{color.white}" } } }
                },
                "fontWeight": { "bold": { "value": 700 } }
            }"##,
        ))
        .unwrap();

        assert_eq!(
            body(&css),
            ":root {\n  --color-white: #ffffff;\n  --color-button-brand-solid-fg: var(--color-white);\n  --font-weight-bold: 700;\n}\n"
        );
    }

    #[test]
    fn test_flattened_composites() {
        let css = generate(&flat(
            r##"{
                "shadow": { "sm": { "value": { "x": 0, "y": 1, "blur": 2, "spread": 0, "color": "{color.black}" } } },
                "lineHeight": { "t14": { "value": { "en": "1.4", "ko": "1.6" } } },
                "styles": { "title": { "xs-bold": { "value": { "fontSize": "{fontSize.t16}", "lineHeight": "{lineHeight.t16}", "fontWeight": "{fontWeight.bold}" } } } }
            }"##,
        ))
        .unwrap();

        assert_eq!(
            body(&css),
            concat!(
                ":root {\n",
                "  --shadow-sm: 0px 1px 2px 0px var(--color-black);\n",
                "  --line-height-t14: 1.4;\n",
                "  --styles-title-xs-bold-font-size: var(--font-size-t16);\n",
                "  --styles-title-xs-bold-line-height: var(--line-height-t16);\n",
                "  --styles-title-xs-bold-font-weight: var(--font-weight-bold);\n",
                "}\n",
            )
        );
        assert!(!css.contains("1.6"));
    }

    #[test]
    fn test_header() {
        let css = generate(&TokenTree::new()).unwrap();
        assert_eq!(css, format!("{HEADER}:root {{\n}}\n"));
    }

    #[test]
    fn test_no_duplicate_declarations() {
        let css = generate(&flat(
            r#"{
                "fontSize": { "m": { "value": "14px" } },
                "font-size": { "m": { "value": "16px" } },
                "other": { "value": "1" }
            }"#,
        ))
        .unwrap();

        assert_eq!(css.matches("--font-size-m:").count(), 1);
        assert_eq!(
            body(&css),
            ":root {\n  --font-size-m: 16px;\n  --other: 1;\n}\n"
        );
    }

    #[test]
    fn test_opaque_value_is_json() {
        let css = generate(&flat(r#"{ "fontFamily": { "base": { "value": ["Inter", "sans-serif"] } } }"#)).unwrap();
        assert!(css.contains("  --font-family-base: [\"Inter\",\"sans-serif\"];\n"));
    }

    #[test]
    fn test_unflattened_composite_is_an_error() {
        let tree = TokenDocument::parse(
            "shadow",
            r##"{ "shadow": { "sm": { "value": { "x": 0, "y": 1, "blur": 2, "spread": 0, "color": "#000" } } } }"##,
        )
        .unwrap()
        .tree;
        let err = generate(&tree).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnflattenedComposite {
                path: TokenPath::parse("shadow.sm").unwrap()
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let source = r##"{ "a": { "x": { "value": "{a.y}" }, "y": { "value": "#123" } } }"##;
        assert_eq!(generate(&flat(source)).unwrap(), generate(&flat(source)).unwrap());
    }
}
