// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grid cropper: cut task-card sheets into numbered per-day images.
//
// Each source sheet is split into a margin-inset grid; every cell is sharpened,
// contrast-boosted, upscaled, and saved as `<prefix>-<day:02>.png`. Progress
// and per-image failures go to an append-only run log, and every image gets an
// entry in the returned `CropReport`. A failing image never stops the batch.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};
use werkbank_core::config::CropConfig;
use werkbank_core::error::{Result, WerkbankError};
use werkbank_core::{CropOutcome, CropReport, EnhanceSpec, GridSpec, ImageJob, ImageReport, RunLog};

use super::grid::{GridCell, GridLayout};
use super::processor::ImageProcessor;

/// Batch job cropping every configured sheet into per-day cells.
pub struct GridCropper {
    source_dir: PathBuf,
    output_dir: PathBuf,
    file_prefix: String,
    images: Vec<ImageJob>,
    grid: GridSpec,
    enhance: EnhanceSpec,
    log: RunLog,
}

impl GridCropper {
    /// A cropper with the default grid, enhancement, and `day` prefix, no
    /// images, and no run log.
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            file_prefix: "day".into(),
            images: Vec::new(),
            grid: GridSpec::default(),
            enhance: EnhanceSpec::default(),
            log: RunLog::disabled(),
        }
    }

    /// Build from configuration, logging to `config.log_file`.
    pub fn from_config(config: &CropConfig) -> Result<Self> {
        Ok(Self::new(&config.source_dir, &config.output_dir)
            .with_images(config.images.clone())
            .with_grid(config.grid)
            .with_enhance(config.enhance)
            .with_prefix(config.file_prefix.clone())
            .with_log(RunLog::open(&config.log_file)?))
    }

    pub fn with_images(mut self, images: Vec<ImageJob>) -> Self {
        self.images = images;
        self
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_enhance(mut self, enhance: EnhanceSpec) -> Self {
        self.enhance = enhance;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_log(mut self, log: RunLog) -> Self {
        self.log = log;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // -- Batch ----------------------------------------------------------------

    /// Crop every configured image.
    ///
    /// Only a failure to create the output directory is returned as an error;
    /// per-image problems are logged and reported in the result.
    #[instrument(skip(self), fields(images = self.images.len(), out = %self.output_dir.display()))]
    pub fn run(&self) -> Result<CropReport> {
        self.log.log("Script started");
        std::fs::create_dir_all(&self.output_dir)?;

        let mut report = CropReport::default();
        for job in &self.images {
            report.images.push(self.process_image(job));
        }

        self.log.log("Script finished");
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            written = report.written_files().len(),
            "Crop batch finished"
        );
        Ok(report)
    }

    /// Crop one sheet, never failing: errors become a `Failed` outcome.
    pub fn process_image(&self, job: &ImageJob) -> ImageReport {
        let source = self.source_dir.join(&job.file);
        let outcome = if !source.exists() {
            warn!(path = %source.display(), "Source image not found");
            self.log.log(format!("Image not found: {}", source.display()));
            CropOutcome::Missing
        } else {
            self.log.log(format!(
                "Processing: {} -> Day {}",
                source.display(),
                job.start_day
            ));
            match self.crop_cells(&source, job.start_day) {
                Ok((files, layout)) => CropOutcome::Cropped {
                    files,
                    cell_width: layout.cell_width,
                    cell_height: layout.cell_height,
                },
                Err(err) => {
                    error!(path = %source.display(), %err, "Failed to crop image");
                    self.log
                        .log(format!("Error processing {}: {}", source.display(), err));
                    CropOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            }
        };
        ImageReport {
            source,
            start_day: job.start_day,
            outcome,
        }
    }

    fn crop_cells(&self, source: &Path, start_day: u32) -> Result<(Vec<PathBuf>, GridLayout)> {
        let sheet = ImageProcessor::open(source)?;
        self.log
            .log(format!("Image size: {}x{}", sheet.width(), sheet.height()));

        let layout = GridLayout::compute(sheet.width(), sheet.height(), &self.grid)?;
        let mut written = Vec::with_capacity(self.grid.cell_count() as usize);

        for (offset, cell) in layout.cells().enumerate() {
            let day = u32::try_from(offset)
                .ok()
                .and_then(|offset| start_day.checked_add(offset))
                .ok_or_else(|| {
                    WerkbankError::ImageError(format!(
                        "day number overflows starting from Day {start_day}"
                    ))
                })?;
            let name = output_name(&self.file_prefix, day);
            let path = self.output_dir.join(&name);
            enhance_cell(&sheet, &cell, &self.enhance)?.save(&path)?;
            self.log.log(format!("Saved {}", name));
            written.push(path);
        }

        Ok((written, layout))
    }
}

/// Crop `cell` out of `sheet` and run the enhancement chain on it.
pub fn enhance_cell(
    sheet: &ImageProcessor,
    cell: &GridCell,
    enhance: &EnhanceSpec,
) -> Result<ImageProcessor> {
    sheet
        .crop(cell.x, cell.y, cell.width, cell.height)
        .sharpen(enhance.sharpness)
        .adjust_contrast(enhance.contrast)
        .upscale(enhance.upscale)
}

/// `day`, 7 -> `day-07.png`.
pub fn output_name(prefix: &str, day: u32) -> String {
    format!("{prefix}-{day:02}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_sheet(path: &Path, width: u32, height: u32) {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        })
        .save(path)
        .unwrap();
    }

    fn job(file: &str, start_day: u32) -> ImageJob {
        ImageJob {
            file: file.into(),
            start_day,
        }
    }

    #[test]
    fn output_names_are_zero_padded() {
        assert_eq!(output_name("day", 1), "day-01.png");
        assert_eq!(output_name("day", 30), "day-30.png");
        assert_eq!(output_name("card", 123), "card-123.png");
    }

    #[test]
    fn wide_sheet_produces_ten_doubled_cells() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tasks");
        write_sheet(&dir.path().join("sheet.png"), 1000, 400);

        let report = GridCropper::new(dir.path(), &out)
            .with_images(vec![job("sheet.png", 1)])
            .run()
            .unwrap();

        assert_eq!(report.succeeded(), 1);
        match &report.images[0].outcome {
            CropOutcome::Cropped {
                files,
                cell_width,
                cell_height,
            } => {
                assert_eq!((*cell_width, *cell_height), (192, 192));
                let names: Vec<String> = files
                    .iter()
                    .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
                    .collect();
                let expected: Vec<String> = (1..=10).map(|d| format!("day-{d:02}.png")).collect();
                assert_eq!(names, expected);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        for day in 1..=10 {
            let (w, h) = image::image_dimensions(out.join(format!("day-{day:02}.png"))).unwrap();
            assert_eq!((w, h), (384, 384));
        }
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 10);
    }

    #[test]
    fn failures_are_logged_and_the_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let log_path = dir.path().join("assets_log.txt");
        write_sheet(&dir.path().join("first.png"), 250, 100);
        std::fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();
        write_sheet(&dir.path().join("third.png"), 250, 100);

        let report = GridCropper::new(dir.path(), &out)
            .with_images(vec![
                job("first.png", 1),
                job("missing.png", 11),
                job("broken.png", 11),
                job("third.png", 21),
            ])
            .with_log(RunLog::open(&log_path).unwrap())
            .run()
            .unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.images[1].outcome, CropOutcome::Missing);
        assert!(matches!(report.images[2].outcome, CropOutcome::Failed { .. }));
        assert_eq!(report.written_files().len(), 20);
        assert!(out.join("day-10.png").exists());
        assert!(out.join("day-21.png").exists());
        assert!(out.join("day-30.png").exists());
        assert!(!out.join("day-11.png").exists());

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.lines().next().unwrap().ends_with("Script started"));
        assert!(log.contains("Image size: 250x100"));
        assert!(log.contains("Saved day-01.png"));
        assert!(log.contains("Image not found:"));
        assert!(log.contains("Error processing"));
        assert!(log.lines().last().unwrap().ends_with("Script finished"));
    }

    #[test]
    fn too_small_sheet_is_a_failure_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(&dir.path().join("tiny.png"), 3, 3);
        let report = GridCropper::new(dir.path(), dir.path().join("out"))
            .with_images(vec![job("tiny.png", 1)])
            .run()
            .unwrap();
        assert!(matches!(report.images[0].outcome, CropOutcome::Failed { .. }));
    }

    #[test]
    fn overflowing_day_numbers_fail_one_image_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        write_sheet(&dir.path().join("sheet.png"), 250, 100);

        let report = GridCropper::new(dir.path(), &out)
            .with_images(vec![job("sheet.png", u32::MAX), job("sheet.png", 1)])
            .run()
            .unwrap();

        assert!(matches!(report.images[0].outcome, CropOutcome::Failed { .. }));
        assert!(matches!(report.images[1].outcome, CropOutcome::Cropped { .. }));
        assert!(out.join("day-10.png").exists());
    }

    #[test]
    fn oversized_upscale_fails_each_image_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(&dir.path().join("a.png"), 250, 100);
        write_sheet(&dir.path().join("b.png"), 250, 100);

        let report = GridCropper::new(dir.path(), dir.path().join("out"))
            .with_images(vec![job("a.png", 1), job("b.png", 11)])
            .with_enhance(EnhanceSpec {
                upscale: u32::MAX,
                ..EnhanceSpec::default()
            })
            .run()
            .unwrap();

        assert_eq!(report.images.len(), 2);
        assert_eq!(report.failed(), 2);
        assert!(report.written_files().is_empty());
    }

    #[test]
    fn custom_grid_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        write_sheet(&dir.path().join("sheet.png"), 60, 30);

        let report = GridCropper::new(dir.path(), &out)
            .with_images(vec![job("sheet.png", 5)])
            .with_grid(GridSpec {
                columns: 2,
                rows: 1,
                margin_percent: 0,
            })
            .with_enhance(EnhanceSpec {
                sharpness: 1.0,
                contrast: 1.0,
                upscale: 3,
            })
            .with_prefix("card")
            .run()
            .unwrap();

        assert_eq!(report.written_files().len(), 2);
        let (w, h) = image::image_dimensions(out.join("card-06.png")).unwrap();
        assert_eq!((w, h), (90, 90));
    }
}
