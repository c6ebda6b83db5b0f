// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image probe: check that an image file exists and can be decoded.

use std::path::Path;

use tracing::{debug, instrument};
use werkbank_core::ProbeReport;

/// Report whether `path` exists and, if so, its pixel dimensions.
///
/// Never returns an error: decode failures become [`ProbeReport::Failed`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn probe_image(path: impl AsRef<Path>) -> ProbeReport {
    let path = path.as_ref().to_path_buf();
    if !path.exists() {
        debug!("Probe target missing");
        return ProbeReport::NotFound { path };
    }
    match image::image_dimensions(&path) {
        Ok((width, height)) => {
            debug!(width, height, "Probe succeeded");
            ProbeReport::Opened {
                path,
                width,
                height,
            }
        }
        Err(err) => ProbeReport::Failed {
            path,
            error: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploaded_image_0.png");
        assert_eq!(probe_image(&path), ProbeReport::NotFound { path });
    }

    #[test]
    fn existing_image_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        GrayImage::from_pixel(31, 17, Luma([9u8])).save(&path).unwrap();
        assert_eq!(
            probe_image(&path),
            ProbeReport::Opened {
                path,
                width: 31,
                height: 17
            }
        );
    }

    #[test]
    fn undecodable_file_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        std::fs::write(&path, b"\x89PNG broken").unwrap();
        assert!(matches!(probe_image(&path), ProbeReport::Failed { .. }));
    }
}
