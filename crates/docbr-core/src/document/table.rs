//! Pattern table engine shared by all document extractors.

use regex::{Captures, Regex};
use tracing::{debug, trace};

use super::value::{ExtractionResult, FieldValue};

/// How the capture groups of a match become a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// Value is the first capture group.
    Single,
    /// Pattern has no group, value is the whole match.
    Whole,
    /// Two groups become a sub-record with these sub-keys.
    Record(&'static str, &'static str),
    /// All groups joined with the separator.
    Joined(&'static str),
}

/// What to store for a field whose pattern does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Leave the key out of the result.
    Omit,
    /// Keep the key with [`FieldValue::Absent`].
    Null,
}

/// A named field pattern.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    key: &'static str,
    regex: Regex,
    combine: Combine,
}

impl FieldPattern {
    /// Create a field pattern. The combination rule follows the number of
    /// capture groups; patterns with several groups join them with `-`
    /// unless [`FieldPattern::with_record`] says otherwise.
    pub fn new(key: &'static str, regex: Regex) -> Self {
        let combine = match regex.captures_len() - 1 {
            0 => Combine::Whole,
            1 => Combine::Single,
            _ => Combine::Joined("-"),
        };
        Self {
            key,
            regex,
            combine,
        }
    }

    /// Compile `pattern` and create a field pattern from it.
    pub fn compile(key: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(key, Regex::new(pattern)?))
    }

    /// Map the first two groups to a sub-record.
    pub fn with_record(mut self, first: &'static str, second: &'static str) -> Self {
        self.combine = Combine::Record(first, second);
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Evaluate against `text`, keeping the leftmost match only.
    ///
    /// Returns `None` when nothing matches or when a group needed by the
    /// combination rule did not participate in the match.
    pub fn evaluate(&self, text: &str, trim: bool) -> Option<FieldValue> {
        let caps = self.regex.captures(text)?;
        self.combine_groups(&caps, trim)
    }

    fn combine_groups(&self, caps: &Captures<'_>, trim: bool) -> Option<FieldValue> {
        let clean = |s: &str| {
            if trim {
                s.trim().to_string()
            } else {
                s.to_string()
            }
        };

        match self.combine {
            Combine::Whole => Some(FieldValue::Text(clean(caps.get(0)?.as_str()))),
            Combine::Single => Some(FieldValue::Text(clean(caps.get(1)?.as_str()))),
            Combine::Record(first, second) => {
                let a = caps.get(1)?.as_str();
                let b = caps.get(2)?.as_str();
                Some(FieldValue::record([(first, a), (second, b)]))
            }
            Combine::Joined(separator) => {
                let parts = (1..caps.len())
                    .map(|i| caps.get(i).map(|m| m.as_str()))
                    .collect::<Option<Vec<_>>>()?;
                Some(FieldValue::Text(parts.join(separator)))
            }
        }
    }
}

/// Ordered set of field patterns for one document type.
#[derive(Debug, Clone)]
pub struct PatternTable {
    name: &'static str,
    patterns: Vec<FieldPattern>,
    missing: MissingPolicy,
    trim: bool,
}

impl PatternTable {
    /// Create a table that omits missing fields and keeps values untrimmed.
    pub fn new(name: &'static str, patterns: Vec<FieldPattern>) -> Self {
        Self {
            name,
            patterns,
            missing: MissingPolicy::Omit,
            trim: false,
        }
    }

    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Trim surrounding whitespace of single-group and whole-match values.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn patterns(&self) -> &[FieldPattern] {
        &self.patterns
    }

    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(FieldPattern::key)
    }

    pub fn pattern(&self, key: &str) -> Option<&FieldPattern> {
        self.patterns.iter().find(|p| p.key == key)
    }

    /// Run every pattern over `text` in table order.
    pub fn apply(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        for pattern in &self.patterns {
            match pattern.evaluate(text, self.trim) {
                Some(value) => {
                    trace!(table = self.name, field = pattern.key, ?value, "field matched");
                    result.insert(pattern.key, value);
                }
                None => {
                    trace!(table = self.name, field = pattern.key, "field not found");
                    if self.missing == MissingPolicy::Null {
                        result.insert(pattern.key, FieldValue::Absent);
                    }
                }
            }
        }

        debug!(
            "{} table matched {}/{} fields over {} characters",
            self.name,
            result.found_count(),
            self.patterns.len(),
            text.len()
        );

        result
    }
}
