// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// werkbank-document: Image and PDF jobs for Werkbank.
//
// Provides image processing (crop, sharpen, contrast, upscale), grid layout and
// batch cropping of card sheets into per-day images, image probing, PDF text
// extraction, and copying of uploaded assets.

pub mod assets;
pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `werkbank_document::PdfReader` etc.
pub use self::assets::AssetCopier;
pub use self::image::cropper::GridCropper;
pub use self::image::grid::{GridCell, GridLayout};
pub use self::image::probe::probe_image;
pub use self::image::processor::ImageProcessor;
pub use self::pdf::reader::{PdfReader, render_pages};
