// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open existing PDF documents and extract their text page by page
// using the `lopdf` crate.

use std::fmt::Write as _;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, info, instrument};
use werkbank_core::PageText;
use werkbank_core::error::WerkbankError;

/// Reads text out of existing PDF files.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WerkbankError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        if !path_ref.exists() {
            return Err(WerkbankError::NotFound(path_ref.to_path_buf()));
        }

        let document = Document::load(path_ref).map_err(|err| {
            WerkbankError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, WerkbankError> {
        let document = Document::load_mem(data).map_err(|err| {
            WerkbankError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract the text of a single page (1-indexed).
    #[instrument(skip(self), fields(page_number))]
    pub fn page_text(&self, page_number: u32) -> Result<String, WerkbankError> {
        let total = self.page_count();
        if page_number == 0 || page_number as usize > total {
            return Err(WerkbankError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number, total
            )));
        }

        self.document.extract_text(&[page_number]).map_err(|err| {
            WerkbankError::PdfError(format!(
                "failed to extract text from page {}: {}",
                page_number, err
            ))
        })
    }

    /// Extract the text of every page, in page order.
    pub fn pages(&self) -> Result<Vec<PageText>, WerkbankError> {
        match self.pages_until_error() {
            (pages, None) => Ok(pages),
            (_, Some(err)) => Err(err),
        }
    }

    /// Extract pages in order, stopping at the first page that fails.
    ///
    /// The pages read before the failure are returned together with the error.
    #[instrument(skip(self))]
    pub fn pages_until_error(&self) -> (Vec<PageText>, Option<WerkbankError>) {
        let mut numbers: Vec<u32> = self.document.get_pages().keys().copied().collect();
        numbers.sort_unstable();

        let (pages, failure) = collect_until_error(numbers.into_iter().map(|number| {
            self.page_text(number)
                .map(|text| PageText { number, text })
        }));

        info!(pages = pages.len(), failed = failure.is_some(), "Text extracted");
        (pages, failure)
    }
}

fn collect_until_error<T, E>(items: impl IntoIterator<Item = Result<T, E>>) -> (Vec<T>, Option<E>) {
    let mut ok = Vec::new();
    for item in items {
        match item {
            Ok(value) => ok.push(value),
            Err(err) => return (ok, Some(err)),
        }
    }
    (ok, None)
}

/// Render pages as plain text, each preceded by a `--- Page N ---` header.
pub fn render_pages(pages: &[PageText]) -> String {
    let mut out = String::new();
    for page in pages {
        let _ = writeln!(out, "--- Page {} ---", page.number);
        let _ = writeln!(out, "{}", page.text);
    }
    out
}
