// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document processing in the werkbank-document crate.
// Currently benchmarks the per-cell crop/enhance chain on a synthetic card sheet.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use werkbank_core::{EnhanceSpec, GridSpec};
use werkbank_document::image::cropper::enhance_cell;
use werkbank_document::{GridLayout, ImageProcessor};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark cropping and enhancing one cell of a 1000x400 sheet.
///
/// The sheet is a gradient so sharpening and contrast have real work to do.
/// One cell covers the full crop, sharpen, contrast, and 2x Lanczos upscale
/// chain that the batch cropper runs ten times per sheet.
fn bench_enhance_cell(c: &mut Criterion) {
    let sheet = RgbaImage::from_fn(1000, 400, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
    });
    let sheet = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(sheet));
    let layout = GridLayout::compute(sheet.width(), sheet.height(), &GridSpec::default())
        .expect("sheet fits the default grid");
    let cell = layout.cells().next().expect("grid has cells");
    let enhance = EnhanceSpec::default();

    c.bench_function("enhance_cell (192x192 -> 384x384)", |b| {
        b.iter(|| {
            let out = enhance_cell(black_box(&sheet), black_box(&cell), &enhance)
                .expect("default upscale fits");
            black_box(out.into_dynamic());
        });
    });
}

criterion_group!(benches, bench_enhance_cell);
criterion_main!(benches);
