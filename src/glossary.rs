/*!
 * Glossary substitution rules.
 *
 * A glossary is an ordered list of substitution rules applied to text before
 * it is sent to the translation API and, for exact rules, to translator
 * output afterwards. Rule order is significant: rules run in file order and
 * overlapping patterns interact in document order.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;

/// How a rule's source pattern is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlossaryMode {
    /// Literal substring replacement of every occurrence (do-not-translate terms)
    Exact,
    /// The source pattern is a regular expression
    Regex,
}

impl GlossaryMode {
    /// Parse the mode column of a glossary row
    ///
    /// `dt` and `exact` both select exact mode. Unknown modes are rejected so
    /// the caller can skip the row.
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim() {
            "dt" | "exact" => Some(Self::Exact),
            "regex" => Some(Self::Regex),
            _ => None,
        }
    }
}

/// One ordered substitution rule
#[derive(Debug, Clone)]
pub struct GlossaryRule {
    /// Pattern to look for in the source text
    pub source: String,
    /// Replacement text (the canonical target-language spelling)
    pub target: String,
    /// Matching mode
    pub mode: GlossaryMode,
}

/// Ordered collection of substitution rules
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    rules: Vec<GlossaryRule>,
}

impl Glossary {
    /// Create a glossary from an already ordered rule list
    pub fn new(rules: Vec<GlossaryRule>) -> Self {
        Self { rules }
    }

    /// Create an empty glossary
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from a CSV file with columns (source, target, mode).
    ///
    /// The first row is a header and is skipped. Rows with fewer than three
    /// fields or an unknown mode are ignored. A missing file yields an empty
    /// glossary.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("No glossary file at {:?}, continuing without one", path);
            return Ok(Self::empty());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open glossary file: {:?}", path))?;

        let mut rules = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Failed to read glossary row in {:?}", path))?;
            if record.len() < 3 {
                continue;
            }
            let Some(mode) = GlossaryMode::parse(&record[2]) else {
                warn!("Skipping glossary row with unknown mode '{}'", &record[2]);
                continue;
            };
            rules.push(GlossaryRule {
                source: record[0].to_string(),
                target: record[1].to_string(),
                mode,
            });
        }

        debug!("Loaded {} glossary rule(s) from {:?}", rules.len(), path);
        Ok(Self::new(rules))
    }

    /// Apply every rule in order to text headed for the translator.
    ///
    /// An exact rule replaces every occurrence of its source literally; a
    /// regex rule substitutes matches of its compiled pattern. A pattern that
    /// fails to compile leaves the text unchanged for that rule and the run
    /// continues.
    pub fn apply_pre(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            match rule.mode {
                GlossaryMode::Exact => {
                    out = out.replace(&rule.source, &rule.target);
                }
                GlossaryMode::Regex => match Regex::new(&rule.source) {
                    Ok(re) => {
                        out = re.replace_all(&out, rule.target.as_str()).into_owned();
                    }
                    Err(e) => {
                        warn!("Skipping invalid glossary pattern '{}': {}", rule.source, e);
                    }
                },
            }
        }
        out
    }

    /// Re-assert canonical target spellings on translator output.
    ///
    /// Runs exact rules only. Identity whenever the output already carries
    /// the target spelling, which makes repeated application converge.
    pub fn apply_post(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in self.rules.iter().filter(|r| r.mode == GlossaryMode::Exact) {
            out = out.replace(&rule.target, &rule.target);
        }
        out
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the glossary has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
