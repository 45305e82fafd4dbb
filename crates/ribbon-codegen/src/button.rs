//! Button component stylesheet.
//!
//! Expands a declarative [`ButtonTable`] (sizes and solid-type variants) into
//! the full `components/button.css`. Every size- or variant-dependent group is
//! generated from the table, so adding a row requires no other change.
//!
//! Group order is fixed:
//!
//! ```text
//! icon container → base (+:active) → sizes → solid variants → outline/ghost
//!   → disabled → icon-only → svg sizes → loading → flex-grow
//! ```

use ribbon_tokens::TokenPath;
use serde::{Deserialize, Serialize};

use crate::css::{decl, Declaration, Stylesheet};
use crate::CodegenError;

pub const HEADER: &str = "Ribbon Button Component - Auto-generated from design tokens";

/// Padding tokens for icon-left / icon-right layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPadding {
    /// Padding on the side that holds the icon.
    pub icon_side: TokenPath,
    /// Padding on the side that holds the label.
    pub text_side: TokenPath,
}

/// One row of the size table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSize {
    /// Modifier name (`xsmall` → `.ribbon-button--xsmall`).
    pub name: String,
    /// Suffix of the `button.{height,padding,radius,gap}.*` tokens.
    pub size_token: String,
    /// Typography style providing font size, line height and weight.
    pub typography_style: TokenPath,
    /// Suffix of the `icon.size.*` token.
    pub icon_size_token: String,
    pub icon_padding: IconPadding,
}

/// Declarative input of the button generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTable {
    /// Block class name, without the leading dot.
    pub class_name: String,
    pub sizes: Vec<ButtonSize>,
    /// Variants sharing the solid color scheme and the combined disabled rule.
    pub solid_variants: Vec<String>,
    /// Size used by the base rule.
    pub default_size: String,
    /// Variant used by the base rule.
    pub default_variant: String,
}

impl ButtonTable {
    pub fn size(&self, name: &str) -> Option<&ButtonSize> {
        self.sizes.iter().find(|s| s.name == name)
    }
}

fn path(dotted: &str) -> TokenPath {
    TokenPath::new(dotted.split('.'))
}

fn size_row(name: &str, size: &str, style: &str, icon: &str, icon_side: &str, text_side: &str) -> ButtonSize {
    ButtonSize {
        name: name.to_string(),
        size_token: size.to_string(),
        typography_style: path(style),
        icon_size_token: icon.to_string(),
        icon_padding: IconPadding {
            icon_side: path(icon_side),
            text_side: path(text_side),
        },
    }
}

impl Default for ButtonTable {
    fn default() -> Self {
        Self {
            class_name: "ribbon-button".to_string(),
            sizes: vec![
                size_row("xsmall", "xs", "styles.title.4xs-bold", "xs", "button.padding.xs", "spacing.m-plus"),
                size_row("small", "s", "styles.title.2xs-bold", "s", "button.padding.s", "button.padding.xl"),
                size_row("medium", "m", "styles.title.2xs-bold", "s", "button.padding.m", "button.padding.l"),
                size_row("large", "l", "styles.title.xs-bold", "m", "button.padding.m", "button.padding.l"),
                size_row("xlarge", "xl", "styles.title.xs-bold", "l", "button.padding.m", "button.padding.l"),
            ],
            solid_variants: [
                "brand-solid",
                "brand-weak",
                "neutral-solid",
                "neutral-weak",
                "critical-solid",
                "critical-weak",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            default_size: "medium".to_string(),
            default_variant: "brand-solid".to_string(),
        }
    }
}

// =========================================================================
// Token naming
// =========================================================================

fn var(dotted: &str) -> String {
    path(dotted).css_var()
}

fn height(size: &ButtonSize) -> String {
    var(&format!("button.height.{}", size.size_token))
}

fn padding(size: &ButtonSize) -> String {
    var(&format!("button.padding.{}", size.size_token))
}

fn radius(size: &ButtonSize) -> String {
    var(&format!("button.radius.{}", size.size_token))
}

fn gap(size: &ButtonSize) -> String {
    var(&format!("button.gap.{}", size.size_token))
}

fn icon_size(size: &ButtonSize) -> String {
    var(&format!("icon.size.{}", size.icon_size_token))
}

fn button_color(variant: &str, role: &str) -> String {
    var(&format!("color.button.{variant}.{role}"))
}

fn typography(size: &ButtonSize) -> [Declaration; 3] {
    let style = &size.typography_style;
    [
        decl("font-size", style.with_suffix("-fontSize").css_var()),
        decl("line-height", style.with_suffix("-lineHeight").css_var()),
        decl("font-weight", style.with_suffix("-fontWeight").css_var()),
    ]
}

fn icon_dimensions(size: &ButtonSize) -> [Declaration; 2] {
    [decl("width", icon_size(size)), decl("height", icon_size(size))]
}

// =========================================================================
// Generator
// =========================================================================

/// Generate the button stylesheet for `table`.
pub fn generate(table: &ButtonTable) -> Result<String, CodegenError> {
    let default_size = table
        .size(&table.default_size)
        .ok_or_else(|| CodegenError::UnknownDefaultSize {
            name: table.default_size.clone(),
        })?;
    let b = format!(".{}", table.class_name);

    let mut css = Stylesheet::new();
    css.comment(HEADER).blank();

    icon_container(&mut css, &b);
    base(&mut css, &b, default_size, &table.default_variant);
    for size in &table.sizes {
        size_rules(&mut css, &b, size);
    }
    for variant in &table.solid_variants {
        solid_variant(&mut css, &b, variant);
    }
    outline_and_ghost(&mut css, &b);
    disabled(&mut css, &b, &table.solid_variants);
    icon_only(&mut css, &b, &table.sizes);
    svg_sizes(&mut css, &b, &table.sizes);

    css.rule(
        &format!("{b}--loading"),
        &[decl("pointer-events", "none"), decl("opacity", "0.6")],
    )
    .blank();
    css.rule(&format!("{b}--flex-grow"), &[decl("flex-grow", "1")]);

    Ok(css.finish())
}

fn icon_container(css: &mut Stylesheet, b: &str) {
    css.rule(
        &format!("{b}__icon"),
        &[
            decl("display", "flex"),
            decl("align-items", "center"),
            decl("justify-content", "center"),
            decl("flex-shrink", "0"),
        ],
    )
    .blank();
}

fn base(css: &mut Stylesheet, b: &str, size: &ButtonSize, variant: &str) {
    let [font_size, line_height, font_weight] = typography(size);
    css.rule(
        b,
        &[
            decl("display", "inline-flex"),
            decl("align-items", "center"),
            decl("justify-content", "center"),
            decl("box-sizing", "border-box"),
            decl("height", height(size)),
            decl("padding", format!("0 {}", padding(size))),
            font_size,
            line_height,
            font_weight,
            decl("border-radius", radius(size)),
            decl("border", "none"),
            decl("cursor", "pointer"),
            decl("transition", "all 0.2s ease"),
            decl("gap", gap(size)),
            decl("color", button_color(variant, "fg")),
            decl("background", button_color(variant, "bg")),
        ],
    );
    css.rule(
        &format!("{b}:active"),
        &[decl("background", button_color(variant, "bg-pressed"))],
    )
    .blank();
}

fn size_rules(css: &mut Stylesheet, b: &str, size: &ButtonSize) {
    let modifier = format!("{b}--{}", size.name);
    let [font_size, line_height, font_weight] = typography(size);
    let icon_side = size.icon_padding.icon_side.css_var();
    let text_side = size.icon_padding.text_side.css_var();

    css.comment(&format!("── Size: {} ──", size.name));
    css.rule(
        &modifier,
        &[
            decl("height", height(size)),
            decl("padding", format!("0 {}", padding(size))),
            font_size,
            line_height,
            font_weight,
            decl("border-radius", radius(size)),
            decl("gap", gap(size)),
        ],
    );
    css.inline_rule(&format!("{modifier} {b}__icon"), &icon_dimensions(size));
    css.inline_rule(&format!("{modifier} {b}__icon svg"), &icon_dimensions(size));
    css.inline_rule(
        &format!("{modifier}{b}--icon-left"),
        &[decl("padding", format!("0 {text_side} 0 {icon_side}"))],
    );
    css.inline_rule(
        &format!("{modifier}{b}--icon-right"),
        &[decl("padding", format!("0 {icon_side} 0 {text_side}"))],
    )
    .blank();
}

fn solid_variant(css: &mut Stylesheet, b: &str, variant: &str) {
    css.rule(
        &format!("{b}--{variant}"),
        &[
            decl("color", button_color(variant, "fg")),
            decl("background", button_color(variant, "bg")),
        ],
    );
    css.inline_rule(
        &format!("{b}--{variant}:active"),
        &[decl("background", button_color(variant, "bg-pressed"))],
    )
    .blank();
}

fn outline_and_ghost(css: &mut Stylesheet, b: &str) {
    css.rule(
        &format!("{b}--outline"),
        &[
            decl("color", button_color("outline", "fg")),
            decl("background", "transparent"),
            decl(
                "border",
                format!("{} solid {}", var("border.thin"), button_color("outline", "border")),
            ),
        ],
    );
    css.inline_rule(
        &format!("{b}--outline:active"),
        &[decl("background", button_color("outline", "bg-pressed"))],
    )
    .blank();

    css.rule(
        &format!("{b}--ghost"),
        &[
            decl("color", button_color("ghost", "fg")),
            decl("background", "transparent"),
        ],
    );
    css.inline_rule(
        &format!("{b}--ghost:active"),
        &[decl("background", button_color("ghost", "bg-pressed"))],
    )
    .blank();
}

fn disabled(css: &mut Stylesheet, b: &str, solid_variants: &[String]) {
    css.rule(
        &format!("{b}:disabled"),
        &[decl("cursor", "not-allowed"), decl("opacity", "0.6")],
    );

    let selectors: Vec<String> = solid_variants
        .iter()
        .map(|v| format!("{b}--{v}:disabled"))
        .collect();
    css.rule_list(
        &selectors,
        &[
            decl("color", button_color("disabled", "fg")),
            decl("background", button_color("disabled", "bg")),
        ],
    );

    css.rule(
        &format!("{b}--outline:disabled"),
        &[
            decl("color", button_color("outline", "fg-disabled")),
            decl("border-color", button_color("outline", "border-disabled")),
            decl("background", "transparent"),
        ],
    );
    css.rule(
        &format!("{b}--ghost:disabled"),
        &[
            decl("color", button_color("ghost", "fg-disabled")),
            decl("background", "transparent"),
        ],
    )
    .blank();
}

fn icon_only(css: &mut Stylesheet, b: &str, sizes: &[ButtonSize]) {
    css.inline_rule(&format!("{b}--icon-only"), &[decl("padding", "0")]);
    for size in sizes {
        css.inline_rule(
            &format!("{b}--icon-only{b}--{}", size.name),
            &[decl("width", height(size))],
        );
    }
    css.blank();
}

fn svg_sizes(css: &mut Stylesheet, b: &str, sizes: &[ButtonSize]) {
    for size in sizes {
        css.inline_rule(&format!("{b}--{} svg", size.name), &icon_dimensions(size));
    }
    css.blank();
}
