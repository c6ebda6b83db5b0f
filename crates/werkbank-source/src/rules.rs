// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rewrite rules: ordered regex pattern/replacement pairs applied over a file's
// full text. Rules come from the built-in compaction table, from inline
// configuration, or from a declarative `[[rule]]` TOML file.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use werkbank_core::error::{Result, WerkbankError};
use werkbank_core::RewriteRule;

/// A rule with its expressions compiled.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: RewriteRule,
    regex: Regex,
    /// Anchored form of `rule.not_followed_by`.
    guard: Option<Regex>,
}

/// Ordered, compiled rewrite rules.
///
/// Rules run in declaration order and each one sees the previous rule's
/// output, so `text-3xl -> text-2xl` followed by `text-2xl -> text-xl`
/// rewrites `text-3xl` all the way to `text-xl`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

/// On-disk shape of a rule file.
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    // -- Construction ---------------------------------------------------------

    /// Compile `rules`, keeping their order.
    pub fn compile(rules: impl IntoIterator<Item = RewriteRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = rules.len(), "Rewrite rules compiled");
        Ok(Self { rules })
    }

    /// The built-in table that tightens padding, radii, spacing, margins, font
    /// sizes, icon containers, and heights of utility-class markup.
    pub fn compaction_defaults() -> Result<Self> {
        Self::compile(default_compaction_rules())
    }

    /// Parse a declarative rule list:
    ///
    /// ```toml
    /// [[rule]]
    /// pattern = "p-6"
    /// replacement = "p-4"
    /// not_followed_by = "[0-9]"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(text)?;
        Self::compile(file.rules)
    }

    /// Load a rule file from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WerkbankError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let set = Self::from_toml_str(&text)?;
        info!(count = set.len(), "Rule file loaded");
        Ok(set)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The source rules, in application order.
    pub fn rules(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    // -- Application ----------------------------------------------------------

    /// Apply every rule in order to `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for compiled in &self.rules {
            let next = apply_rule(compiled, &current);
            if next != current {
                debug!(pattern = %compiled.rule.pattern, "Rule matched");
                current = next;
            }
        }
        current
    }
}

fn compile_rule(rule: RewriteRule) -> Result<CompiledRule> {
    let regex = Regex::new(&rule.pattern).map_err(|err| WerkbankError::InvalidRule {
        pattern: rule.pattern.clone(),
        reason: err.to_string(),
    })?;
    let guard = match &rule.not_followed_by {
        Some(guard) => Some(Regex::new(&format!("^(?:{guard})")).map_err(|err| {
            WerkbankError::InvalidRule {
                pattern: guard.clone(),
                reason: err.to_string(),
            }
        })?),
        None => None,
    };
    Ok(CompiledRule { rule, regex, guard })
}

fn apply_rule(compiled: &CompiledRule, text: &str) -> String {
    let replacement = compiled.rule.replacement.as_str();
    let Some(guard) = &compiled.guard else {
        return compiled.regex.replace_all(text, replacement).into_owned();
    };

    // A rejected match does not consume its span: the search resumes one
    // character after its start, as a real look-ahead would.
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut at = 0;
    while at <= text.len() {
        let Some(caps) = compiled.regex.captures_at(text, at) else {
            break;
        };
        let Some(m) = caps.get(0) else {
            break;
        };
        if guard.is_match(&text[m.end()..]) {
            at = next_char(text, m.start());
            continue;
        }
        out.push_str(&text[copied..m.start()]);
        caps.expand(replacement, &mut out);
        copied = m.end();
        at = if m.is_empty() { next_char(text, m.end()) } else { m.end() };
    }
    out.push_str(&text[copied..]);
    out
}

/// Byte offset just past the character at `at`, or past the end.
fn next_char(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// The compaction table, in application order.
pub fn default_compaction_rules() -> Vec<RewriteRule> {
    vec![
        // Padding
        RewriteRule::new("px-6", "px-4"),
        RewriteRule::new("pt-12", "pt-4"),
        RewriteRule::new("pt-8", "pt-4"),
        RewriteRule::new("pb-24", "pb-16"),
        RewriteRule::new("pb-20", "pb-16"),
        // Card padding
        RewriteRule::new("p-6", "p-4").not_followed_by("[0-9]"),
        RewriteRule::new("p-5", "p-3").not_followed_by("[0-9]"),
        // Radii
        RewriteRule::new("rounded-3xl", "rounded-xl"),
        RewriteRule::new("rounded-2xl", "rounded-lg"),
        // Spacing
        RewriteRule::new("space-y-6", "space-y-3"),
        RewriteRule::new("space-y-4", "space-y-2"),
        RewriteRule::new("gap-6", "gap-3"),
        RewriteRule::new("gap-4", "gap-2"),
        // Margins
        RewriteRule::new("mt-8", "mt-4"),
        RewriteRule::new("mt-6", "mt-3"),
        RewriteRule::new("mb-6", "mb-3"),
        RewriteRule::new("mb-4", "mb-2"),
        // Font sizes
        RewriteRule::new("text-3xl", "text-2xl"),
        RewriteRule::new("text-2xl", "text-xl"),
        // Icon containers
        RewriteRule::new("w-14 h-14", "w-10 h-10"),
        RewriteRule::new("w-12 h-12", "w-10 h-10"),
        // Heights
        RewriteRule::new("h-32", "h-24"),
        RewriteRule::new("h-24", "h-20"),
    ]
}
