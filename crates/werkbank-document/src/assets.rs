// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Asset copy: copy uploaded illustrations into the public asset directory
// under their task names.

use std::path::PathBuf;

use tracing::{info, instrument, warn};
use werkbank_core::config::AssetsConfig;
use werkbank_core::error::Result;
use werkbank_core::{AssetMapping, CopyEntry, CopyOutcome, CopyReport};

/// Copies each mapping's `src` (under `source_dir`) to `dest` (under `dest_dir`).
pub struct AssetCopier {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    mappings: Vec<AssetMapping>,
}

impl AssetCopier {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        mappings: Vec<AssetMapping>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            mappings,
        }
    }

    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(&config.source_dir, &config.dest_dir, config.mappings.clone())
    }

    /// Copy every mapping in order.
    ///
    /// Creating the destination directory is the only fatal step; individual
    /// copy failures are recorded and the batch carries on.
    #[instrument(skip(self), fields(mappings = self.mappings.len(), dest = %self.dest_dir.display()))]
    pub fn run(&self) -> Result<CopyReport> {
        std::fs::create_dir_all(&self.dest_dir)?;

        let mut report = CopyReport::default();
        for mapping in &self.mappings {
            let src = self.source_dir.join(&mapping.src);
            let dest = self.dest_dir.join(&mapping.dest);
            let outcome = match std::fs::copy(&src, &dest) {
                Ok(bytes) => CopyOutcome::Copied { bytes },
                Err(err) => {
                    warn!(src = %src.display(), %err, "Copy failed");
                    CopyOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            report.entries.push(CopyEntry { src, dest, outcome });
        }

        info!(
            copied = report.copied(),
            total = report.entries.len(),
            "Asset copy finished"
        );
        Ok(report)
    }
}
