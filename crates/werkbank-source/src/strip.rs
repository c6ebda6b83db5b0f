// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strip pass: remove a component's default import and its self-closing usage
// tag from a fixed list of page sources.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, instrument};
use werkbank_core::config::StripConfig;
use werkbank_core::error::{Result, WerkbankError};
use werkbank_core::{FileOutcome, FileReport, PassReport};

/// Removes `import Name from '<source>'` and `<Name />` from page sources.
///
/// Every existing file is written back, whether or not anything was removed.
pub struct StripPass {
    pages_dir: PathBuf,
    files: Vec<String>,
    import: Regex,
    usage: Regex,
}

impl StripPass {
    pub fn new(
        pages_dir: impl Into<PathBuf>,
        files: Vec<String>,
        component: &str,
        import_source: &str,
    ) -> Result<Self> {
        let name = regex::escape(component);
        let source = regex::escape(import_source);
        let import = compile(&format!(
            r#"import {name} from ['"]{source}['"];?\s*\n?"#
        ))?;
        let usage = compile(&format!(r"\s*<{name} />\s*\n?"))?;
        Ok(Self {
            pages_dir: pages_dir.into(),
            files,
            import,
            usage,
        })
    }

    pub fn from_config(config: &StripConfig) -> Result<Self> {
        Self::new(
            &config.pages_dir,
            config.files.clone(),
            &config.component,
            &config.import_source,
        )
    }

    /// Remove the import and every usage tag from `text`.
    pub fn strip(&self, text: &str) -> String {
        let without_import = self.import.replace_all(text, "");
        self.usage.replace_all(&without_import, "").into_owned()
    }

    #[instrument(skip(self), fields(dir = %self.pages_dir.display(), files = self.files.len()))]
    pub fn run(&self) -> Result<PassReport> {
        let mut report = PassReport::default();
        for name in &self.files {
            let path = self.pages_dir.join(name);
            let outcome = self.strip_file(&path)?;
            report.files.push(FileReport {
                name: name.clone(),
                path,
                outcome,
            });
        }
        info!(
            updated = report.count(FileOutcome::Updated),
            missing = report.count(FileOutcome::NotFound),
            "Strip pass finished"
        );
        Ok(report)
    }

    pub fn strip_file(&self, path: &Path) -> Result<FileOutcome> {
        if !path.exists() {
            debug!(path = %path.display(), "Skipping missing file");
            return Ok(FileOutcome::NotFound);
        }
        let content = std::fs::read_to_string(path)?;
        std::fs::write(path, self.strip(&content))?;
        Ok(FileOutcome::Updated)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| WerkbankError::InvalidRule {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    const PAGE: &str = "import React from 'react';\n\
import BottomNav from '../components/BottomNav';\n\
import Header from \"../components/Header\";\n\
\n\
export default function Home() {\n\
  return (\n\
    <div>\n\
      <Header />\n\
      <BottomNav />\n\
    </div>\n\
  );\n\
}\n";

    fn bottom_nav(dir: &Path, files: &[&str]) -> StripPass {
        StripPass::new(
            dir,
            files.iter().map(|f| f.to_string()).collect(),
            "BottomNav",
            "../components/BottomNav",
        )
        .unwrap()
    }

    #[test]
    fn import_and_usage_are_removed() {
        let pass = bottom_nav(Path::new("."), &[]);
        let out = pass.strip(PAGE);
        assert!(!out.contains("BottomNav"));
        assert!(out.contains("import React from 'react';\n"));
        assert!(out.contains("import Header from \"../components/Header\";"));
        assert!(out.contains("<Header />"));
    }

    #[test]
    fn double_quoted_import_without_semicolon_is_removed() {
        let pass = bottom_nav(Path::new("."), &[]);
        let out = pass.strip("import BottomNav from \"../components/BottomNav\"\nconst x = 1;\n");
        assert_eq!(out, "const x = 1;\n");
    }

    #[test]
    fn other_components_are_kept() {
        let pass = bottom_nav(Path::new("."), &[]);
        let text = "<BottomNavItem />\n<Footer />\n";
        assert_eq!(pass.strip(text), text);
    }

    #[test]
    fn every_existing_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Home.tsx"), PAGE).unwrap();
        std::fs::write(dir.path().join("Library.tsx"), "export const Library = 1;\n").unwrap();

        let report = bottom_nav(dir.path(), &["Home.tsx", "Library.tsx", "Journey.tsx"])
            .run()
            .unwrap();

        let outcomes: Vec<FileOutcome> = report.files.iter().map(|f| f.outcome).collect();
        assert_eq!(
            outcomes,
            vec![FileOutcome::Updated, FileOutcome::Updated, FileOutcome::NotFound]
        );
        let home = std::fs::read_to_string(dir.path().join("Home.tsx")).unwrap();
        assert!(!home.contains("BottomNav"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Library.tsx")).unwrap(),
            "export const Library = 1;\n"
        );
        assert!(!dir.path().join("Journey.tsx").exists());
    }

    #[test]
    fn file_without_the_component_is_still_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Library.tsx");
        std::fs::write(&path, "export const Library = 1;\n").unwrap();

        let backdated = UNIX_EPOCH + Duration::from_secs(1_000_000);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(backdated)
            .unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), backdated);

        let report = bottom_nav(dir.path(), &["Library.tsx"]).run().unwrap();

        assert_eq!(report.files[0].outcome, FileOutcome::Updated);
        assert!(std::fs::metadata(&path).unwrap().modified().unwrap() > backdated);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export const Library = 1;\n"
        );
    }

    #[test]
    fn component_name_is_matched_literally() {
        let pass = StripPass::new(".", Vec::new(), "Nav.Bar", "./nav").unwrap();
        assert_eq!(pass.strip("<NavXBar />"), "<NavXBar />");
        assert_eq!(pass.strip("a\n<Nav.Bar />\n"), "a");
    }
}
