//! Build and check runs.
//!
//! ```text
//! tokens/*.json → load → transform → validate → compile → <out>/{variables,typography}.css
//!                                                         <out>/components/button.css
//! ```

use anyhow::{Context, Result};
use ribbon_codegen::BuildOutput;
use ribbon_tokens::TokenSet;
use ribbon_transform::{ensure_clean, transform, Diagnostic};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RibbonConfig;

pub const VARIABLES_FILE: &str = "variables.css";
pub const TYPOGRAPHY_FILE: &str = "typography.css";
pub const BUTTON_FILE: &str = "components/button.css";

/// Load, transform and generate without touching the output directory.
pub fn compile(config: &RibbonConfig) -> Result<(BuildOutput, Vec<Diagnostic>)> {
    let tokens_dir = &config.build.tokens_dir;
    let set = TokenSet::load(tokens_dir)
        .with_context(|| format!("Failed to load tokens from {}", tokens_dir.display()))?;

    let transformed = transform(set);
    let diagnostics = transformed.diagnostics();
    let output = ribbon_codegen::compile(&transformed, &config.button)?;
    Ok((output, diagnostics))
}

/// Full build: generate every stylesheet and write it under `out_dir`.
///
/// Returns the written paths. In strict mode any diagnostic aborts the build
/// before anything is written.
pub fn build(config: &RibbonConfig) -> Result<Vec<PathBuf>> {
    tracing::info!("Building design tokens...");

    let (output, diagnostics) = compile(config)?;
    for diagnostic in &diagnostics {
        tracing::warn!("{diagnostic}");
    }
    if config.build.strict {
        ensure_clean(diagnostics)?;
    }

    let written = write_outputs(&config.build.out_dir, &output)?;
    for path in &written {
        tracing::info!("Done! Output: {}", path.display());
    }
    Ok(written)
}

/// Every problem a build would run into, one message per problem.
///
/// Besides the validator's diagnostics this reports custom properties the
/// typography and button sheets use but `variables.css` never declares.
pub fn check(config: &RibbonConfig) -> Result<Vec<String>> {
    let (output, diagnostics) = compile(config)?;

    let mut problems: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    problems.extend(
        output
            .undeclared_references()
            .into_iter()
            .map(|name| format!("var(--{name}) is used but never declared")),
    );
    Ok(problems)
}

/// Write the generated sheets, creating directories as needed. Existing
/// files are overwritten. Without a typography sheet any `typography.css`
/// left by an earlier build is removed.
pub fn write_outputs(out_dir: &Path, output: &BuildOutput) -> Result<Vec<PathBuf>> {
    if output.typography.is_none() {
        remove_stale(&out_dir.join(TYPOGRAPHY_FILE))?;
    }

    let mut files: Vec<(&str, &str)> = vec![(VARIABLES_FILE, output.variables.as_str())];
    if let Some(typography) = &output.typography {
        files.push((TYPOGRAPHY_FILE, typography.as_str()));
    }
    files.push((BUTTON_FILE, output.button.as_str()));

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = out_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        tracing::debug!(path = %path.display(), "removed stale output");
    }
    Ok(())
}
