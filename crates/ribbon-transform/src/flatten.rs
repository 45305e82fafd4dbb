//! Composite Flattener.
//!
//! Rewrites composite token values into scalar tokens the variable emitter can
//! print directly. Three independent rules:
//!
//! - shadow → `"{x}px {y}px {blur}px {spread}px {color}"`
//! - locale line-height → the `en` value
//! - typography style → three sibling tokens (`-fontSize`, `-lineHeight`, `-fontWeight`)
//!
//! Flattening is idempotent: flat input comes back unchanged.

use ribbon_tokens::{Scalar, Token, TokenNode, TokenTree, TokenValue};

/// Suffix and `type` tag of each token produced from a typography style.
pub const TYPOGRAPHY_PARTS: [(&str, &str); 3] = [
    ("-fontSize", "fontSizes"),
    ("-lineHeight", "lineHeights"),
    ("-fontWeight", "fontWeights"),
];

/// Replace a shadow composite with its CSS shorthand string.
///
/// References inside the shadow (typically the color) stay in `{a.b}` form
/// and are turned into `var()` by the emitter. Type and metadata are kept.
pub fn flatten_shadow(token: Token) -> Token {
    match token.value {
        TokenValue::Shadow(shadow) => Token {
            value: TokenValue::Scalar(Scalar::String(shadow.shorthand())),
            ..token
        },
        _ => token,
    }
}

/// Replace a multi-locale line-height with its `en` value.
///
/// Every other locale is discarded and cannot be recovered from the output:
/// the generated CSS is single-locale.
pub fn flatten_line_height(token: Token) -> Token {
    match token.value {
        TokenValue::LocaleLineHeight(lh) => Token {
            value: lh.canonical().clone().into(),
            ..token
        },
        _ => token,
    }
}

/// Split a typography style named `name` into three sibling entries.
///
/// The sub-tokens carry only a value and a type tag; the original entry's
/// metadata is not copied. Any other token comes back as the single entry
/// `(name, token)`.
pub fn decompose_typography_style(name: &str, token: Token) -> Vec<(String, Token)> {
    let style = match token.value {
        TokenValue::TypographyStyle(style) => style,
        _ => return vec![(name.to_string(), token)],
    };

    let parts = [style.font_size, style.line_height, style.font_weight];
    TYPOGRAPHY_PARTS
        .iter()
        .zip(parts)
        .map(|((suffix, token_type), atom)| {
            (format!("{name}{suffix}"), Token::new(atom.into(), *token_type))
        })
        .collect()
}

/// Apply all three rules to every token in `tree`, recursing into groups.
///
/// Entry order is preserved; a decomposed typography style's three parts take
/// the position of the original entry.
pub fn flatten(tree: TokenTree) -> TokenTree {
    let mut stats = FlattenStats::default();
    let flat = flatten_group(tree, &mut stats);
    tracing::debug!(
        shadows = stats.shadows,
        line_heights = stats.line_heights,
        typography_styles = stats.typography_styles,
        "flattened composite tokens"
    );
    flat
}

#[derive(Default)]
struct FlattenStats {
    shadows: usize,
    line_heights: usize,
    typography_styles: usize,
}

fn flatten_group(tree: TokenTree, stats: &mut FlattenStats) -> TokenTree {
    let mut out = TokenTree::new();

    for (name, node) in tree {
        match node {
            TokenNode::Group(group) => {
                out.insert(name, TokenNode::Group(flatten_group(group, stats)));
            }
            TokenNode::Token(token) => {
                match token.value {
                    TokenValue::Shadow(_) => stats.shadows += 1,
                    TokenValue::LocaleLineHeight(_) => stats.line_heights += 1,
                    TokenValue::TypographyStyle(_) => stats.typography_styles += 1,
                    _ => {}
                }
                let token = flatten_line_height(flatten_shadow(token));
                for (entry, part) in decompose_typography_style(&name, token) {
                    out.insert(entry, TokenNode::Token(part));
                }
            }
        }
    }

    out
}
