// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// werkbank-source: In-place passes over front-end page sources.
//
// Provides ordered regex rewrite rules (built-in compaction table or a
// declarative rule file), the compaction pass that writes a file back only when
// it changed, and the strip pass that removes a component's import and tag.

pub mod compact;
pub mod rules;
pub mod strip;

pub use compact::CompactionPass;
pub use rules::RuleSet;
pub use strip::StripPass;
