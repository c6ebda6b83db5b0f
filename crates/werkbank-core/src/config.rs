// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job configuration, loaded from `werkbank.toml`.
//
// Every section is optional; missing keys fall back to the defaults below, which
// describe the front-end project layout the jobs were written for.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, WerkbankError};
use crate::types::{AssetMapping, EnhanceSpec, GridSpec, ImageJob, RewriteRule};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "werkbank.toml";

/// Largest accepted crop upscale factor.
pub const MAX_UPSCALE: u32 = 16;

/// Settings for every job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WerkbankConfig {
    pub compact: CompactConfig,
    pub strip: StripConfig,
    pub crop: CropConfig,
    pub pdf: PdfConfig,
    pub probe: ProbeConfig,
    pub assets: AssetsConfig,
}

/// Stylesheet-class compaction over page sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    pub pages_dir: PathBuf,
    pub files: Vec<String>,
    /// External `[[rule]]` list; replaces the built-in table when set.
    pub rules_file: Option<PathBuf>,
    /// Inline rules; replace the built-in table when non-empty.
    pub rules: Vec<RewriteRule>,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            files: names(&[
                "Dashboard.tsx",
                "Journey.tsx",
                "ProfilePage.tsx",
                "Player.tsx",
                "Library.tsx",
                "Programs.tsx",
                "Reflection.tsx",
                "Pricing.tsx",
                "Task.tsx",
                "DayView.tsx",
            ]),
            rules_file: None,
            rules: Vec::new(),
        }
    }
}

/// Removal of a component's import and usage tag from page sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub pages_dir: PathBuf,
    pub files: Vec<String>,
    /// Component whose `<Name />` tag and default import are removed.
    pub component: String,
    /// Module specifier the component is imported from.
    pub import_source: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            files: names(&[
                "Home.tsx",
                "Journey.tsx",
                "Dashboard.tsx",
                "ProfilePage.tsx",
                "Library.tsx",
                "Programs.tsx",
                "Reflection.tsx",
            ]),
            component: "BottomNav".into(),
            import_source: "../components/BottomNav".into(),
        }
    }
}

/// Grid cropping of task-card sheets into per-day images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Append-only run log.
    pub log_file: PathBuf,
    /// Output names are `<prefix>-<day:02>.png`.
    pub file_prefix: String,
    pub images: Vec<ImageJob>,
    pub grid: GridSpec,
    pub enhance: EnhanceSpec,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("public/assets/images/tasks"),
            log_file: PathBuf::from("assets_log.txt"),
            file_prefix: "day".into(),
            images: vec![
                ImageJob {
                    file: "uploaded_image_0.png".into(),
                    start_day: 1,
                },
                ImageJob {
                    file: "uploaded_image_1.png".into(),
                    start_day: 11,
                },
                ImageJob {
                    file: "uploaded_image_2.png".into(),
                    start_day: 21,
                },
            ],
            grid: GridSpec::default(),
            enhance: EnhanceSpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub path: PathBuf,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("task.pdf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub path: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("uploads/uploaded_image_0.png"),
        }
    }
}

/// Copying of uploaded illustrations under their task names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub mappings: Vec<AssetMapping>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let pairs = [
            ("uploaded_image_0.png", "day01-digital-sunset.png"),
            ("uploaded_image_1.png", "day02-mindful-tea.png"),
            ("uploaded_image_2.png", "day03-phone-free-morning.png"),
            ("uploaded_image_3.png", "day04-stretch-break.png"),
            ("uploaded_image_4.png", "day05-mindful-walking.png"),
            ("uploaded_image_5.png", "day06-quiet-moment.png"),
            ("uploaded_image_6.png", "day07-nature-pause.png"),
            ("uploaded_image_7.png", "day08-slow-task.png"),
            ("uploaded_image_8.png", "day09-gratitude-list.png"),
            ("uploaded_image_9.png", "day10-weekly-review.png"),
        ];
        Self {
            source_dir: PathBuf::from("uploads"),
            dest_dir: PathBuf::from("public/assets/images/tasks"),
            mappings: pairs
                .iter()
                .map(|(src, dest)| AssetMapping {
                    src: (*src).into(),
                    dest: (*dest).into(),
                })
                .collect(),
        }
    }
}

impl WerkbankConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WerkbankError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load `explicit` if given, else `werkbank.toml` from the working
    /// directory if present, else the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::load(fallback);
        }
        debug!("No configuration file, using defaults");
        Ok(Self::default())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| WerkbankError::Config(err.to_string()))
    }

    /// Reject values the jobs cannot work with.
    pub fn validate(&self) -> Result<()> {
        let grid = &self.crop.grid;
        if grid.columns == 0 || grid.rows == 0 {
            return Err(WerkbankError::Config(format!(
                "crop grid must have at least one column and row, got {}x{}",
                grid.columns, grid.rows
            )));
        }
        if grid.margin_percent >= 50 {
            return Err(WerkbankError::Config(format!(
                "crop margin must be below 50%, got {}%",
                grid.margin_percent
            )));
        }
        let upscale = self.crop.enhance.upscale;
        if upscale == 0 || upscale > MAX_UPSCALE {
            return Err(WerkbankError::Config(format!(
                "crop upscale factor must be between 1 and {MAX_UPSCALE}, got {upscale}"
            )));
        }
        if self.crop.file_prefix.is_empty() {
            return Err(WerkbankError::Config("crop file prefix must not be empty".into()));
        }
        if self.strip.component.is_empty() {
            return Err(WerkbankError::Config("strip component name must not be empty".into()));
        }
        Ok(())
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| (*name).to_string()).collect()
}
