// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Werkbank.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Werkbank operations.
#[derive(Debug, Error)]
pub enum WerkbankError {
    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid rewrite rule `{pattern}`: {reason}")]
    InvalidRule { pattern: String, reason: String },

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Filesystem --
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WerkbankError>;
