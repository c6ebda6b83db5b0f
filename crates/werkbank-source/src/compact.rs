// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compaction pass: apply a rule set to a fixed list of page sources, writing a
// file back only when its text changed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use werkbank_core::config::CompactConfig;
use werkbank_core::error::Result;
use werkbank_core::{FileOutcome, FileReport, PassReport};

use crate::rules::RuleSet;

/// Rewrites utility classes in place across a set of page sources.
///
/// Missing files are reported and skipped. Read and write failures are not
/// caught: they end the pass with an error.
pub struct CompactionPass {
    pages_dir: PathBuf,
    files: Vec<String>,
    rules: RuleSet,
}

impl CompactionPass {
    pub fn new(pages_dir: impl Into<PathBuf>, files: Vec<String>, rules: RuleSet) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            files,
            rules,
        }
    }

    /// Build the pass from configuration.
    ///
    /// Rule precedence: `rules_file`, then inline `rules`, then the built-in
    /// compaction table.
    pub fn from_config(config: &CompactConfig) -> Result<Self> {
        let rules = if let Some(path) = &config.rules_file {
            RuleSet::load(path)?
        } else if !config.rules.is_empty() {
            RuleSet::compile(config.rules.iter().cloned())?
        } else {
            RuleSet::compaction_defaults()?
        };
        Ok(Self::new(&config.pages_dir, config.files.clone(), rules))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run the pass over every configured file, in order.
    #[instrument(skip(self), fields(dir = %self.pages_dir.display(), files = self.files.len()))]
    pub fn run(&self) -> Result<PassReport> {
        let mut report = PassReport::default();
        for name in &self.files {
            let path = self.pages_dir.join(name);
            let outcome = self.compact_file(&path)?;
            report.files.push(FileReport {
                name: name.clone(),
                path,
                outcome,
            });
        }
        info!(
            updated = report.count(FileOutcome::Updated),
            unchanged = report.count(FileOutcome::Unchanged),
            missing = report.count(FileOutcome::NotFound),
            "Compaction pass finished"
        );
        Ok(report)
    }

    /// Rewrite a single file.
    pub fn compact_file(&self, path: &Path) -> Result<FileOutcome> {
        if !path.exists() {
            debug!(path = %path.display(), "Skipping missing file");
            return Ok(FileOutcome::NotFound);
        }

        let original = std::fs::read_to_string(path)?;
        let rewritten = self.rules.apply(&original);
        if rewritten == original {
            return Ok(FileOutcome::Unchanged);
        }

        std::fs::write(path, rewritten)?;
        debug!(path = %path.display(), "File rewritten");
        Ok(FileOutcome::Updated)
    }
}
