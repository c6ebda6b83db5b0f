// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface. Every subcommand starts from the loaded
// `WerkbankConfig` and overrides only the values given on the command line.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use werkbank_core::WerkbankConfig;

#[derive(Parser, Debug)]
#[command(name = "werkbank", version)]
#[command(about = "Maintenance jobs for the journey web app's pages and task illustrations")]
pub struct Cli {
    /// Configuration file (defaults to ./werkbank.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite spacing and sizing utility classes to their compact forms
    Compact(CompactArgs),
    /// Remove a component's import and usage tag from page sources
    Strip(StripArgs),
    /// Cut task-card sheets into enhanced per-day images
    Crop(CropArgs),
    /// Print the text of every page of a PDF
    PdfText(PdfTextArgs),
    /// Check that an image exists and can be decoded
    Probe(ProbeArgs),
    /// Copy uploaded illustrations into the public asset directory
    CopyAssets(CopyAssetsArgs),
    /// Print the effective configuration as TOML
    ShowConfig,
}

impl Command {
    /// Apply this subcommand's overrides to `config`.
    pub fn apply(&self, config: &mut WerkbankConfig) {
        match self {
            Command::Compact(args) => args.apply(config),
            Command::Strip(args) => args.apply(config),
            Command::Crop(args) => args.apply(config),
            Command::PdfText(args) => args.apply(config),
            Command::Probe(args) => args.apply(config),
            Command::CopyAssets(args) => args.apply(config),
            Command::ShowConfig => {}
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CompactArgs {
    /// Page files to process (replaces the configured list)
    pub files: Vec<String>,
    /// Directory holding the page sources
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
    /// TOML file with `[[rule]]` entries replacing the built-in table
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CompactArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        let compact = &mut config.compact;
        if !self.files.is_empty() {
            compact.files = self.files.clone();
        }
        if let Some(dir) = &self.dir {
            compact.pages_dir = dir.clone();
        }
        if let Some(rules) = &self.rules {
            compact.rules_file = Some(rules.clone());
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct StripArgs {
    /// Page files to process (replaces the configured list)
    pub files: Vec<String>,
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
    /// Component name, e.g. `BottomNav`
    #[arg(long)]
    pub component: Option<String>,
    /// Module the component is imported from
    #[arg(long)]
    pub import_source: Option<String>,
    #[arg(long)]
    pub json: bool,
}

impl StripArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        let strip = &mut config.strip;
        if !self.files.is_empty() {
            strip.files = self.files.clone();
        }
        if let Some(dir) = &self.dir {
            strip.pages_dir = dir.clone();
        }
        if let Some(component) = &self.component {
            strip.component = component.clone();
        }
        if let Some(source) = &self.import_source {
            strip.import_source = source.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CropArgs {
    /// Directory holding the source sheets
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,
    /// Directory the per-day images are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Append-only run log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Output file prefix (`day` gives `day-01.png`)
    #[arg(long)]
    pub prefix: Option<String>,
    #[arg(long)]
    pub json: bool,
}

impl CropArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        let crop = &mut config.crop;
        if let Some(dir) = &self.source_dir {
            crop.source_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            crop.output_dir = dir.clone();
        }
        if let Some(log) = &self.log_file {
            crop.log_file = log.clone();
        }
        if let Some(prefix) = &self.prefix {
            crop.file_prefix = prefix.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PdfTextArgs {
    /// PDF to read (defaults to the configured path)
    pub path: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

impl PdfTextArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        if let Some(path) = &self.path {
            config.pdf.path = path.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ProbeArgs {
    /// Image to probe (defaults to the configured path)
    pub path: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

impl ProbeArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        if let Some(path) = &self.path {
            config.probe.path = path.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CopyAssetsArgs {
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,
    #[arg(short, long)]
    pub dest_dir: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

impl CopyAssetsArgs {
    pub fn apply(&self, config: &mut WerkbankConfig) {
        if let Some(dir) = &self.source_dir {
            config.assets.source_dir = dir.clone();
        }
        if let Some(dir) = &self.dest_dir {
            config.assets.dest_dir = dir.clone();
        }
    }
}
