//! Ribbon configuration file handling

use anyhow::{Context, Result};
use ribbon_codegen::ButtonTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "ribbon.toml";

/// Top-level Ribbon configuration (ribbon.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RibbonConfig {
    #[serde(default)]
    pub build: BuildConfig,
    /// Button component table; omitted fields keep the ribbon defaults.
    #[serde(default)]
    pub button: ButtonTable,
}

/// Build configuration
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Directory holding the category documents
    #[serde(default = "default_tokens_dir")]
    pub tokens_dir: PathBuf,
    /// Output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Treat validation diagnostics as fatal
    #[serde(default)]
    pub strict: bool,
}

fn default_tokens_dir() -> PathBuf {
    PathBuf::from("tokens")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tokens_dir: default_tokens_dir(),
            out_dir: default_out_dir(),
            strict: false,
        }
    }
}

/// Command-line overrides applied on top of the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub tokens: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub strict: bool,
}

impl RibbonConfig {
    /// Load the configuration for a run.
    ///
    /// An explicit `--config` path must exist. Otherwise `ribbon.toml` in
    /// `dir` is used when present, and the defaults when it is not.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = dir.join(CONFIG_FILE);
                if path.is_file() {
                    Self::load_file(&path)
                } else {
                    tracing::debug!(dir = %dir.display(), "no {CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load a configuration file. Relative directories in `[build]` are
    /// resolved against the file's own directory.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.build.tokens_dir = base.join(&config.build.tokens_dir);
            config.build.out_dir = base.join(&config.build.out_dir);
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides. Flags win over the file.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(tokens) = overrides.tokens {
            self.build.tokens_dir = tokens;
        }
        if let Some(out) = overrides.out {
            self.build.out_dir = out;
        }
        self.build.strict |= overrides.strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ribbon_tokens::TokenPath;

    #[test]
    fn test_defaults() {
        let config = RibbonConfig::from_toml("").unwrap();
        assert_eq!(config, RibbonConfig::default());
        assert_eq!(config.build.tokens_dir, PathBuf::from("tokens"));
        assert_eq!(config.build.out_dir, PathBuf::from("build"));
        assert!(!config.build.strict);
        assert_eq!(config.button, ButtonTable::default());
    }

    #[test]
    fn test_build_section() {
        let config = RibbonConfig::from_toml(
            "[build]\ntokens_dir = \"design/tokens\"\nstrict = true\n",
        )
        .unwrap();
        assert_eq!(config.build.tokens_dir, PathBuf::from("design/tokens"));
        assert_eq!(config.build.out_dir, PathBuf::from("build"));
        assert!(config.build.strict);
    }

    #[test]
    fn test_button_section_overrides_table() {
        let config = RibbonConfig::from_toml(
            r#"
[button]
class_name = "btn"
solid_variants = ["primary", "danger"]
default_variant = "primary"

[[button.sizes]]
name = "medium"
size_token = "m"
typography_style = "styles.label.m"
icon_size_token = "s"
icon_padding = { icon_side = "spacing.s", text_side = "spacing.m" }
"#,
        )
        .unwrap();

        assert_eq!(config.button.class_name, "btn");
        assert_eq!(config.button.solid_variants, vec!["primary", "danger"]);
        assert_eq!(config.button.default_size, "medium");
        assert_eq!(config.button.sizes.len(), 1);
        assert_eq!(
            config.button.sizes[0].typography_style,
            TokenPath::parse("styles.label.m").unwrap()
        );
    }

    #[test]
    fn test_invalid_token_path_is_rejected() {
        let err = RibbonConfig::from_toml(
            r#"
[[button.sizes]]
name = "m"
size_token = "m"
typography_style = "styles..m"
icon_size_token = "s"
icon_padding = { icon_side = "a", text_side = "b" }
"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = RibbonConfig::default().with_overrides(Overrides {
            tokens: Some(PathBuf::from("in")),
            out: None,
            strict: true,
        });
        assert_eq!(config.build.tokens_dir, PathBuf::from("in"));
        assert_eq!(config.build.out_dir, PathBuf::from("build"));
        assert!(config.build.strict);
    }

    #[test]
    fn test_strict_flag_does_not_clear_file_setting() {
        let mut config = RibbonConfig::default();
        config.build.strict = true;
        let config = config.with_overrides(Overrides::default());
        assert!(config.build.strict);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RibbonConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, RibbonConfig::default());
    }

    #[test]
    fn test_load_resolves_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[build]\nout_dir = \"dist\"\n").unwrap();

        let config = RibbonConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.build.out_dir, dir.path().join("dist"));
        assert_eq!(config.build.tokens_dir, dir.path().join("tokens"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = RibbonConfig::load(Some(&missing), dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[build\n").unwrap();
        let err = RibbonConfig::load_file(&path).unwrap_err();
        assert_eq!(err.to_string(), format!("Failed to parse {}", path.display()));
    }
}
