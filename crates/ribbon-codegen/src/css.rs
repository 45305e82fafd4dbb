//! CSS writer.
//!
//! A small append-only builder used by every generator, so that all output
//! shares one byte layout:
//!
//! ```text
//! block rule      .a {\n  prop: value;\n}\n
//! inline rule     .a { prop: value; prop: value; }\n
//! selector list   .a,\n.b {\n  prop: value;\n}\n
//! ```

use std::collections::BTreeSet;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Shorthand constructor for a [`Declaration`].
pub fn decl(property: impl Into<String>, value: impl Into<String>) -> Declaration {
    Declaration {
        property: property.into(),
        value: value.into(),
    }
}

/// Append-only stylesheet builder.
#[derive(Debug, Default)]
pub struct Stylesheet {
    out: String,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    /// `/* text */` on its own line.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.out.push_str(&format!("/* {text} */\n"));
        self
    }

    /// An empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Multi-line rule, one declaration per line.
    pub fn rule(&mut self, selector: &str, declarations: &[Declaration]) -> &mut Self {
        self.out.push_str(selector);
        self.out.push_str(" {\n");
        for d in declarations {
            self.out.push_str(&format!("  {}: {};\n", d.property, d.value));
        }
        self.out.push_str("}\n");
        self
    }

    /// Single-line rule.
    pub fn inline_rule(&mut self, selector: &str, declarations: &[Declaration]) -> &mut Self {
        self.out.push_str(selector);
        self.out.push_str(" {");
        for d in declarations {
            self.out.push_str(&format!(" {}: {};", d.property, d.value));
        }
        self.out.push_str(" }\n");
        self
    }

    /// Multi-line rule shared by several selectors, one selector per line.
    pub fn rule_list(&mut self, selectors: &[String], declarations: &[Declaration]) -> &mut Self {
        self.rule(&selectors.join(",\n"), declarations)
    }

    pub fn finish(self) -> String {
        self.out
    }
}

// =========================================================================
// Custom property scanning
// =========================================================================

/// Custom property names declared in `css` (`--name: value;`), without the `--`.
pub fn declared_properties(css: &str) -> BTreeSet<String> {
    css.lines()
        .filter_map(|line| line.trim_start().strip_prefix("--"))
        .filter_map(|rest| rest.split_once(':'))
        .map(|(name, _)| name.trim().to_string())
        .collect()
}

/// Custom property names referenced by `var(--name)` in `css`, without the `--`.
pub fn referenced_properties(css: &str) -> BTreeSet<String> {
    css.split("var(--")
        .skip(1)
        .filter_map(|rest| {
            let end = rest.find([')', ','])?;
            Some(rest[..end].trim().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(Stylesheet::new().finish(), "");
    }

    #[test]
    fn test_block_rule() {
        let mut css = Stylesheet::new();
        css.rule(".a", &[decl("display", "flex"), decl("gap", "var(--gap)")]);
        assert_eq!(css.finish(), ".a {\n  display: flex;\n  gap: var(--gap);\n}\n");
    }

    #[test]
    fn test_inline_rule() {
        let mut css = Stylesheet::new();
        css.inline_rule(".a svg", &[decl("width", "1px"), decl("height", "2px")]);
        assert_eq!(css.finish(), ".a svg { width: 1px; height: 2px; }\n");
    }

    #[test]
    fn test_rule_list() {
        let mut css = Stylesheet::new();
        css.rule_list(
            &[".a:disabled".to_string(), ".b:disabled".to_string()],
            &[decl("opacity", "0.6")],
        );
        assert_eq!(css.finish(), ".a:disabled,\n.b:disabled {\n  opacity: 0.6;\n}\n");
    }

    #[test]
    fn test_comment_and_blank_chain() {
        let mut css = Stylesheet::new();
        css.comment("header").blank().raw("x");
        assert_eq!(css.finish(), "/* header */\n\nx");
    }

    #[test]
    fn test_declared_properties() {
        let names = declared_properties(":root {\n  --color-white: #fff;\n  --gap-m: var(--spacing-m);\n}\n");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["color-white".to_string(), "gap-m".to_string()]
        );
    }

    #[test]
    fn test_referenced_properties() {
        let names = referenced_properties(".a { padding: 0 var(--x) 0 var(--y, 4px); color: var(--x); }");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string()]
        );
    }
}
