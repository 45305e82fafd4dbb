//! Typography utility classes.
//!
//! One class per composite typography style, read from the *pre-flatten*
//! styles group. Each declaration is derived from the reference string inside
//! the composite (`{fontSize.t10}` → `var(--font-size-t10)`), not from the
//! flattened value.

use ribbon_tokens::{TokenTree, TokenValue};

use crate::css::{decl, Stylesheet};

pub const HEADER: &str = "Typography Utility Classes - Auto-generated from typography.json";

/// Generate `typography.css` from the pre-flatten styles group.
///
/// The class name is the style's path relative to the group, joined with `-`
/// (`title.2xs-bold` → `.title-2xs-bold`). Entries that are not typography
/// composites produce no class.
pub fn generate(styles: &TokenTree) -> String {
    let mut css = Stylesheet::new();
    css.comment(HEADER).blank();

    for (path, token) in styles.tokens() {
        let TokenValue::TypographyStyle(style) = &token.value else {
            continue;
        };
        let class = format!(".{}", path.segments().join("-"));
        css.rule(
            &class,
            &[
                decl("font-size", style.font_size.to_css()),
                decl("line-height", style.line_height.to_css()),
                decl("font-weight", style.font_weight.to_css()),
            ],
        )
        .blank();
    }

    css.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ribbon_tokens::{TokenDocument, TokenSet};

    fn styles(source: &str) -> TokenTree {
        TokenSet::new(vec![TokenDocument::parse("typography", source).unwrap()])
            .typography_styles()
            .unwrap()
    }

    #[test]
    fn test_one_class_per_style() {
        let css = generate(&styles(
            r#"{ "styles": {
                "title": {
                    "2xs-bold": { "value": { "fontSize": "{fontSize.t14}", "lineHeight": "{lineHeight.title.t14}", "fontWeight": "{fontWeight.bold}" } }
                },
                "body": {
                    "m-regular": { "value": { "fontSize": "{fontSize.t16}", "lineHeight": "{lineHeight.body.t16}", "fontWeight": "{fontWeight.regular}" } }
                }
            } }"#,
        ));

        assert_eq!(
            css,
            concat!(
                "/* Typography Utility Classes - Auto-generated from typography.json */\n\n",
                ".title-2xs-bold {\n",
                "  font-size: var(--font-size-t14);\n",
                "  line-height: var(--line-height-title-t14);\n",
                "  font-weight: var(--font-weight-bold);\n",
                "}\n\n",
                ".body-m-regular {\n",
                "  font-size: var(--font-size-t16);\n",
                "  line-height: var(--line-height-body-t16);\n",
                "  font-weight: var(--font-weight-regular);\n",
                "}\n\n",
            )
        );
    }

    #[test]
    fn test_non_composite_entries_are_skipped() {
        let css = generate(&styles(
            r#"{ "styles": { "title": {
                "note": { "value": "see design doc" },
                "xs": { "value": { "fontSize": "{fontSize.t12}", "lineHeight": "{lineHeight.t12}", "fontWeight": "{fontWeight.medium}" } }
            } } }"#,
        ));
        assert!(!css.contains(".title-note"));
        assert!(css.contains(".title-xs {\n"));
    }

    #[test]
    fn test_literal_values_pass_through() {
        let css = generate(&styles(
            r#"{ "styles": { "caption": { "s": { "value": { "fontSize": "11px", "lineHeight": 1.3, "fontWeight": 500 } } } } }"#,
        ));
        assert!(css.contains("  font-size: 11px;\n  line-height: 1.3;\n  font-weight: 500;\n"));
    }

    #[test]
    fn test_empty_group_has_header_only() {
        assert_eq!(
            generate(&TokenTree::new()),
            "/* Typography Utility Classes - Auto-generated from typography.json */\n\n"
        );
    }
}
