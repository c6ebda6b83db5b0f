// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: processing chain, grid layout, batch cropping, and probing.

pub mod cropper;
pub mod grid;
pub mod probe;
pub mod processor;

pub use cropper::GridCropper;
pub use grid::{GridCell, GridLayout};
pub use probe::probe_image;
pub use processor::ImageProcessor;
