mod config;
mod pipeline;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use config::{Overrides, RibbonConfig};

#[derive(Parser)]
#[command(name = "ribbon")]
#[command(about = "Ribbon design tokens: JSON token documents to CSS")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate variables.css, typography.css and components/button.css
    Build(RunArgs),

    /// Run the pipeline and report problems without writing output
    Check(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Directory holding the token documents
    #[arg(long, value_name = "DIR")]
    tokens: Option<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Configuration file (defaults to ./ribbon.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat dangling references and merge conflicts as errors
    #[arg(long)]
    strict: bool,
}

impl RunArgs {
    fn load_config(self) -> Result<RibbonConfig> {
        let config = RibbonConfig::load(self.config.as_deref(), Path::new("."))?;
        Ok(config.with_overrides(Overrides {
            tokens: self.tokens,
            out: self.out,
            strict: self.strict,
        }))
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Build(args) => cmd_build(args),
        Command::Check(args) => cmd_check(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_build(args: RunArgs) -> Result<ExitCode> {
    let config = args.load_config()?;
    pipeline::build(&config)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(args: RunArgs) -> Result<ExitCode> {
    let config = args.load_config()?;
    let problems = pipeline::check(&config)?;

    if problems.is_empty() {
        tracing::info!("OK: {}", config.build.tokens_dir.display());
        return Ok(ExitCode::SUCCESS);
    }
    for problem in &problems {
        tracing::error!("{problem}");
    }
    tracing::error!("{} problem(s) found", problems.len());
    Ok(ExitCode::FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from([
            "ribbon", "build", "--tokens", "design", "--out", "dist", "--strict", "-v",
        ]);
        assert!(cli.verbose);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.tokens, Some(PathBuf::from("design")));
        assert_eq!(args.out, Some(PathBuf::from("dist")));
        assert!(args.strict);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::parse_from(["ribbon", "check"]);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Command::Check(RunArgs { strict: false, .. })));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(&file, "[build]\ntokens_dir = \"t\"\nout_dir = \"o\"\n").unwrap();

        let args = RunArgs {
            tokens: None,
            out: Some(PathBuf::from("elsewhere")),
            config: Some(file),
            strict: true,
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.build.tokens_dir, dir.path().join("t"));
        assert_eq!(config.build.out_dir, PathBuf::from("elsewhere"));
        assert!(config.build.strict);
    }
}
