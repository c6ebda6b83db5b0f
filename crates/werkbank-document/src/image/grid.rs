// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grid layout: partition an image into equal cells inside a fixed margin.

use werkbank_core::GridSpec;
use werkbank_core::error::WerkbankError;

/// One rectangular cell of a [`GridLayout`], in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cell geometry for one image.
///
/// Margins are `ceil(margin_percent * dimension / 100)` on each side; cells
/// split the remaining area evenly with integer division, so a few pixels on
/// the right and bottom edges may be left unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub margin_x: u32,
    pub margin_y: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl GridLayout {
    /// Lay `spec` over an image of `width` x `height`.
    pub fn compute(width: u32, height: u32, spec: &GridSpec) -> Result<Self, WerkbankError> {
        if spec.columns == 0 || spec.rows == 0 {
            return Err(WerkbankError::ImageError(format!(
                "grid needs at least one column and row, got {}x{}",
                spec.columns, spec.rows
            )));
        }

        let margin_x = margin(width, spec.margin_percent);
        let margin_y = margin(height, spec.margin_percent);
        let content_w = width.saturating_sub(2 * margin_x);
        let content_h = height.saturating_sub(2 * margin_y);
        let cell_width = content_w / spec.columns;
        let cell_height = content_h / spec.rows;

        if cell_width == 0 || cell_height == 0 {
            return Err(WerkbankError::ImageError(format!(
                "image of {}x{} is too small for a {}x{} grid",
                width, height, spec.columns, spec.rows
            )));
        }

        Ok(Self {
            margin_x,
            margin_y,
            cell_width,
            cell_height,
            columns: spec.columns,
            rows: spec.rows,
        })
    }

    /// All cells, row by row, left to right.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| GridCell {
                row,
                column,
                x: self.margin_x + column * self.cell_width,
                y: self.margin_y + row * self.cell_height,
                width: self.cell_width,
                height: self.cell_height,
            })
        })
    }
}

fn margin(dimension: u32, percent: u32) -> u32 {
    (u64::from(dimension) * u64::from(percent)).div_ceil(100) as u32
}
