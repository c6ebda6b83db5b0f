// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Werkbank: asset and source maintenance for the journey web app
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// to the requested job. Diagnostics go to stderr; job output goes to stdout.

mod cli;
mod render;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use werkbank_core::{Result, WerkbankConfig};
use werkbank_document::{AssetCopier, GridCropper, PdfReader, probe_image, render_pages};
use werkbank_source::{CompactionPass, StripPass};

use cli::{Cli, Command};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "Job failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = WerkbankConfig::resolve(cli.config.as_deref())?;
    cli.command.apply(&mut config);
    config.validate()?;

    match cli.command {
        Command::Compact(args) => {
            let report = CompactionPass::from_config(&config.compact)?.run()?;
            emit(args.json, &report, render::compact)
        }
        Command::Strip(args) => {
            let report = StripPass::from_config(&config.strip)?.run()?;
            emit(args.json, &report, render::strip)
        }
        Command::Crop(args) => {
            let cropper = GridCropper::from_config(&config.crop)?;
            let report = cropper.run()?;
            emit(args.json, &report, |r| render::crop(r, cropper.output_dir()))
        }
        Command::PdfText(args) => {
            // Extraction errors are reported, not fatal.
            let reader = match PdfReader::open(&config.pdf.path) {
                Ok(reader) => reader,
                Err(err) => {
                    println!("Error: {err}");
                    return Ok(());
                }
            };
            let (pages, failure) = reader.pages_until_error();
            emit(args.json, &pages, |p| render_pages(p))?;
            if let Some(err) = failure {
                if args.json {
                    eprintln!("Error: {err}");
                } else {
                    println!("Error: {err}");
                }
            }
            Ok(())
        }
        Command::Probe(args) => {
            let report = probe_image(&config.probe.path);
            emit(args.json, &report, render::probe)
        }
        Command::CopyAssets(args) => {
            let report = AssetCopier::from_config(&config.assets).run()?;
            emit(args.json, &report, render::copy_assets)
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Print `report` as pretty JSON or through its text renderer.
fn emit<T>(json: bool, report: &T, text: impl FnOnce(&T) -> String) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", text(report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Write a config rooted in `dir` and return its path.
    fn write_config(dir: &Path) -> std::path::PathBuf {
        let mut config = WerkbankConfig::default();
        config.compact.pages_dir = dir.join("pages");
        config.compact.files = vec!["Journey.tsx".into(), "Missing.tsx".into()];
        config.strip.pages_dir = dir.join("pages");
        config.strip.files = vec!["Journey.tsx".into()];
        config.pdf.path = dir.join("task.pdf");
        config.assets.source_dir = dir.join("uploads");
        config.assets.dest_dir = dir.join("public");
        config.assets.mappings.truncate(1);

        let path = dir.join("werkbank.toml");
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        path
    }

    fn run_args(config: &Path, args: &[&str]) -> Result<()> {
        let config = config.display().to_string();
        let mut argv = vec!["werkbank", "--config", config.as_str()];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn compact_then_strip_rewrite_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let pages = dir.path().join("pages");
        std::fs::create_dir(&pages).unwrap();
        std::fs::write(
            pages.join("Journey.tsx"),
            "import BottomNav from '../components/BottomNav';\n\
             <div className=\"p-6 mb-6\">\n  <BottomNav />\n</div>\n",
        )
        .unwrap();

        run_args(&config, &["compact"]).unwrap();
        let text = std::fs::read_to_string(pages.join("Journey.tsx")).unwrap();
        assert!(text.contains("p-4 mb-3"));

        run_args(&config, &["strip", "--json"]).unwrap();
        let text = std::fs::read_to_string(pages.join("Journey.tsx")).unwrap();
        assert!(!text.contains("BottomNav"));
    }

    #[test]
    fn pdf_errors_do_not_fail_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        run_args(&config, &["pdf-text"]).unwrap();

        std::fs::write(dir.path().join("task.pdf"), b"not a pdf").unwrap();
        run_args(&config, &["pdf-text"]).unwrap();
    }

    #[test]
    fn copy_assets_and_probe_report_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        run_args(&config, &["copy-assets"]).unwrap();
        assert!(dir.path().join("public").is_dir());

        let missing = dir.path().join("nope.png").display().to_string();
        run_args(&config, &["probe", missing.as_str()]).unwrap();
    }

    #[test]
    fn empty_overrides_are_rejected_before_any_job_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let out = dir.path().join("tasks");
        let out_arg = out.display().to_string();

        assert!(run_args(&config, &["crop", "--prefix", "", "-o", out_arg.as_str()]).is_err());
        assert!(!out.exists());
        assert!(run_args(&config, &["strip", "--component", ""]).is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_args(&dir.path().join("absent.toml"), &["show-config"]).is_err());
    }
}
