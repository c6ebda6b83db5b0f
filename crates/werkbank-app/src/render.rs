// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console text for job reports.

use std::fmt::Write as _;
use std::path::Path;

use werkbank_core::{
    CopyOutcome, CopyReport, CropOutcome, CropReport, FileOutcome, PassReport, ProbeReport,
};

fn pass_lines(report: &PassReport) -> String {
    let mut out = String::new();
    for file in &report.files {
        let _ = match file.outcome {
            FileOutcome::Updated => writeln!(out, "Updated {}", file.name),
            FileOutcome::Unchanged => writeln!(out, "No changes needed for {}", file.name),
            FileOutcome::NotFound => writeln!(out, "File not found: {}", file.name),
        };
    }
    out
}

pub fn compact(report: &PassReport) -> String {
    let mut out = pass_lines(report);
    out.push_str("\nDone! All pages updated with compact styling.\n");
    out
}

pub fn strip(report: &PassReport) -> String {
    let mut out = pass_lines(report);
    out.push_str("Done!\n");
    out
}

pub fn crop(report: &CropReport, output_dir: &Path) -> String {
    let mut out = String::new();
    for image in &report.images {
        let source = image.source.display();
        let _ = match &image.outcome {
            CropOutcome::Cropped {
                files,
                cell_width,
                cell_height,
            } => writeln!(
                out,
                "Cropped {source} -> {} files from Day {} ({cell_width}x{cell_height} cells)",
                files.len(),
                image.start_day
            ),
            CropOutcome::Missing => writeln!(out, "Image not found: {source}"),
            CropOutcome::Failed { error } => writeln!(out, "Error processing {source}: {error}"),
        };
    }
    let _ = writeln!(
        out,
        "Done! {} of {} images cropped, {} files written to {}",
        report.succeeded(),
        report.images.len(),
        report.written_files().len(),
        output_dir.display()
    );
    out
}

pub fn probe(report: &ProbeReport) -> String {
    match report {
        ProbeReport::NotFound { path } => format!("File NOT found: {}\n", path.display()),
        ProbeReport::Opened {
            path,
            width,
            height,
        } => format!(
            "File exists: {}\nImage opened. Size: ({width}, {height})\n",
            path.display()
        ),
        ProbeReport::Failed { path, error } => {
            format!("File exists: {}\nError: {error}\n", path.display())
        }
    }
}

pub fn copy_assets(report: &CopyReport) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        let dest = entry.dest.display();
        let _ = match &entry.outcome {
            CopyOutcome::Copied { .. } => writeln!(out, "Copied {dest}"),
            CopyOutcome::Failed { error } => writeln!(out, "Failed to copy {dest}: {error}"),
        };
    }
    out
}
