//! CLI argument definitions and command dispatch
//!
//! A scriptable shell over the merger core: the same extract/merge/validate
//! operations the GUI exposes, reading files or stdin and writing files or
//! stdout. No JSON logic lives here.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::controls;

/// Krunker Keybinds Merger
#[derive(Parser, Debug)]
#[command(name = "krunker-merger")]
#[command(version, about = "Extract and merge Krunker keybinds between settings JSON files")]
pub struct Cli {
    /// Launches the GUI when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the controls section from a settings JSON
    Extract(ExtractArgs),

    /// Merge controls from a source JSON into a target settings JSON
    Merge(MergeArgs),

    /// Validate a settings JSON and pretty-print it
    Validate(ValidateArgs),
}

/// Arguments for the extract subcommand
#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Settings JSON to read ('-' or omitted reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the controls-only JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit minified JSON instead of pretty-printed
    #[arg(long)]
    pub minify: bool,
}

/// Arguments for the merge subcommand
#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Settings or controls-only JSON holding the desired keybinds
    #[arg(short, long)]
    pub source: PathBuf,

    /// Settings JSON to receive the keybinds
    #[arg(short, long)]
    pub target: PathBuf,

    /// Write the merged JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit minified JSON instead of pretty-printed
    #[arg(long)]
    pub minify: bool,
}

/// Arguments for the validate subcommand
#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Settings JSON to read ('-' or omitted reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Extract(args) => run_extract(&args),
        Commands::Merge(args) => run_merge(&args),
        Commands::Validate(args) => run_validate(&args),
    }
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let doc = controls::load(&text)?;
    let extracted = controls::extract_controls(&doc)?;
    info!("Extracted controls section");
    write_output(args.output.as_deref(), &controls::stringify(&extracted, !args.minify))
}

fn run_merge(args: &MergeArgs) -> Result<()> {
    let source = controls::load(&read_input(Some(&args.source))?)?;
    let target = controls::load(&read_input(Some(&args.target))?)?;
    let merged = controls::merge_controls(&source, &target)?;
    info!(source = ?args.source, target = ?args.target, "Merged controls into target");
    write_output(args.output.as_deref(), &controls::stringify(&merged, !args.minify))
}

fn run_validate(args: &ValidateArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let doc = controls::load(&text)?;
    println!("{}", controls::stringify(&doc, true));
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote result to {:?}", path);
            Ok(())
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from(["krunker-merger", "extract", "-i", "in.json", "--minify"])
            .unwrap();
        match cli.command {
            Some(Commands::Extract(args)) => {
                assert_eq!(args.input, Some(PathBuf::from("in.json")));
                assert_eq!(args.output, None);
                assert!(args.minify);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_merge_requires_source_and_target() {
        assert!(Cli::try_parse_from(["krunker-merger", "merge", "--source", "a.json"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_gui() {
        let cli = Cli::try_parse_from(["krunker-merger"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_extract_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_temp(&dir, "settings.json", r#"{"controls":{"forward":"w"},"volume":5}"#);
        let output = dir.path().join("controls.json");

        run_extract(&ExtractArgs {
            input: Some(input),
            output: Some(output.clone()),
            minify: false,
        })
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, json!({"controls": {"forward": "w"}}));
    }

    #[test]
    fn test_run_merge_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_temp(&dir, "source.json", r#"{"controls":{"forward":"w"}}"#);
        let target =
            write_temp(&dir, "target.json", r#"{"controls":{"forward":"up"},"volume":5}"#);
        let output = dir.path().join("merged.json");

        run_merge(&MergeArgs {
            source,
            target,
            output: Some(output.clone()),
            minify: true,
        })
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        // Minified output carries no whitespace
        assert!(!written.contains('\n'));
        let merged: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(merged, json!({"controls": {"forward": "w"}, "volume": 5}));
    }

    #[test]
    fn test_run_merge_source_without_controls_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_temp(&dir, "source.json", r#"{"volume":1}"#);
        let target = write_temp(&dir, "target.json", r#"{"controls":{"x":1}}"#);

        let err = run_merge(&MergeArgs {
            source,
            target,
            output: None,
            minify: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("'controls'"));
    }

    #[test]
    fn test_run_extract_invalid_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_temp(&dir, "bad.json", "{invalid");

        let err = run_extract(&ExtractArgs {
            input: Some(input),
            output: None,
            minify: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_read_input_missing_file_has_context() {
        let err = read_input(Some(Path::new("/nonexistent/settings.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read"));
    }
}
