// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Werkbank: Core types, configuration, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod run_log;
pub mod types;

pub use config::WerkbankConfig;
pub use error::{Result, WerkbankError};
pub use run_log::RunLog;
pub use types::*;
