// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the Werkbank jobs: rule and job descriptions
// coming in, per-item reports going out.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Job inputs
// ---------------------------------------------------------------------------

/// A single pattern/replacement pair applied over a file's full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Regular expression to search for.
    pub pattern: String,
    /// Replacement text; `$1`, `${name}` group references are expanded.
    pub replacement: String,
    /// Optional expression that must not match directly after a candidate
    /// match. Stands in for a negative look-ahead such as `p-6(?!\d)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_followed_by: Option<String>,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            not_followed_by: None,
        }
    }

    /// Only replace matches that are not immediately followed by `guard`.
    pub fn not_followed_by(mut self, guard: impl Into<String>) -> Self {
        self.not_followed_by = Some(guard.into());
        self
    }
}

/// One source image of the crop batch and the day number its first cell gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageJob {
    /// File name relative to the crop source directory.
    pub file: String,
    /// Day number assigned to the first cell.
    pub start_day: u32,
}

/// Grid laid over a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    /// Margin on each side, as a percentage of the image dimension.
    pub margin_percent: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 2,
            margin_percent: 2,
        }
    }
}

impl GridSpec {
    /// Number of cells the grid yields.
    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Per-cell enhancement applied after cropping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceSpec {
    /// Sharpness factor; 1.0 leaves the cell untouched.
    pub sharpness: f32,
    /// Contrast factor; 1.0 leaves the cell untouched.
    pub contrast: f32,
    /// Integer upscale factor applied last.
    pub upscale: u32,
}

impl Default for EnhanceSpec {
    fn default() -> Self {
        Self {
            sharpness: 1.5,
            contrast: 1.1,
            upscale: 2,
        }
    }
}

/// A source file copied under a new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMapping {
    pub src: String,
    pub dest: String,
}

// ---------------------------------------------------------------------------
// Source pass reports
// ---------------------------------------------------------------------------

/// What a source pass did to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file was written back.
    Updated,
    /// The rewritten text equalled the original; nothing was written.
    Unchanged,
    /// The file does not exist and was skipped.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of running a source pass over a list of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub files: Vec<FileReport>,
}

impl PassReport {
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// True when no file was written back.
    pub fn is_noop(&self) -> bool {
        self.count(FileOutcome::Updated) == 0
    }
}

// ---------------------------------------------------------------------------
// Crop reports
// ---------------------------------------------------------------------------

/// Result of cropping one source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CropOutcome {
    Cropped {
        files: Vec<PathBuf>,
        cell_width: u32,
        cell_height: u32,
    },
    Missing,
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReport {
    pub source: PathBuf,
    pub start_day: u32,
    pub outcome: CropOutcome,
}

/// Aggregated outcome of a crop batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropReport {
    pub images: Vec<ImageReport>,
}

impl CropReport {
    pub fn succeeded(&self) -> usize {
        self.images
            .iter()
            .filter(|i| matches!(i.outcome, CropOutcome::Cropped { .. }))
            .count()
    }

    /// Images that were missing or failed.
    pub fn failed(&self) -> usize {
        self.images.len() - self.succeeded()
    }

    /// Every file written across the batch, in order.
    pub fn written_files(&self) -> Vec<&PathBuf> {
        self.images
            .iter()
            .flat_map(|i| match &i.outcome {
                CropOutcome::Cropped { files, .. } => files.iter().collect(),
                _ => Vec::new(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Probe, PDF, and copy reports
// ---------------------------------------------------------------------------

/// Result of probing a single image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeReport {
    NotFound { path: PathBuf },
    Opened { path: PathBuf, width: u32, height: u32 },
    Failed { path: PathBuf, error: String },
}

/// Text extracted from one PDF page (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied { bytes: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyEntry {
    pub src: PathBuf,
    pub dest: PathBuf,
    pub outcome: CopyOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReport {
    pub entries: Vec<CopyEntry>,
}

impl CopyReport {
    pub fn copied(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, CopyOutcome::Copied { .. }))
            .count()
    }
}
