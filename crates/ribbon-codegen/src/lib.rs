//! Ribbon Code Generator
//!
//! Compiles the transformed token tree into three stylesheets: the custom
//! property sheet, the typography utility classes and the button component.
//!
//! ```text
//! Transformed + ButtonTable → compile() → BuildOutput { variables, typography, button }
//! ```
//!
//! Generators only ever emit `var()` references to token paths; they never
//! inline the referenced value.

pub mod button;
pub mod css;
pub mod typography;
pub mod variables;

pub use button::{ButtonSize, ButtonTable, IconPadding};

use ribbon_tokens::TokenPath;
use ribbon_transform::Transformed;

/// The generated stylesheets for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    /// `variables.css`
    pub variables: String,
    /// `typography.css`, absent when the typography document has no styles group.
    pub typography: Option<String>,
    /// `components/button.css`
    pub button: String,
}

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("Codegen error: composite value at '{path}' was not flattened")]
    UnflattenedComposite { path: TokenPath },

    #[error("Codegen error: default size '{name}' is not in the button table")]
    UnknownDefaultSize { name: String },
}

/// Generate every stylesheet for a transformed token set.
pub fn compile(transformed: &Transformed, table: &ButtonTable) -> Result<BuildOutput, CodegenError> {
    let variables = variables::generate(transformed.tree())?;
    let typography = transformed.styles.as_ref().map(typography::generate);
    let button = button::generate(table)?;

    tracing::debug!(
        variables = variables.len(),
        typography = typography.as_ref().map_or(0, String::len),
        button = button.len(),
        "generated stylesheets"
    );

    Ok(BuildOutput {
        variables,
        typography,
        button,
    })
}

impl BuildOutput {
    /// Custom properties used by the typography and button sheets that
    /// `variables.css` never declares, sorted by name.
    pub fn undeclared_references(&self) -> Vec<String> {
        let declared = css::declared_properties(&self.variables);
        let mut referenced = css::referenced_properties(&self.button);
        if let Some(typography) = &self.typography {
            referenced.extend(css::referenced_properties(typography));
        }
        referenced
            .into_iter()
            .filter(|name| !declared.contains(name))
            .collect()
    }
}
