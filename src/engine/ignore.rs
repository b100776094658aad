//! Ignore patterns.
//!
//! Rows whose raw line matches a caller pattern are downgraded to
//! [`RowType::Ignore`] on both sides. Alignment is never touched.

use super::align::AlignedRows;
use super::classify::RowType;
use crate::utils::error::IgnoreError;
use log::debug;
use regex::Regex;

/// Immutable, ordered snapshot of compiled ignore patterns
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    pub fn builder() -> IgnorePatternsBuilder {
        IgnorePatternsBuilder::default()
    }

    /// Build directly from a pattern list, failing on the first bad entry
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, IgnoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::builder();
        for pattern in patterns {
            builder.add(pattern.as_ref())?;
        }
        Ok(builder.build())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Source text of every pattern, in registration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// True when any pattern is found anywhere in `line`
    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(line))
    }

    /// Downgrade matching rows to `ignore` on both sides
    ///
    /// Padding rows only count through the line that is present. Applying
    /// the same snapshot twice changes nothing further.
    pub fn apply(&self, rows: &AlignedRows, source_types: &mut [RowType], target_types: &mut [RowType]) {
        if self.is_empty() {
            return;
        }

        let mut ignored = 0usize;
        for (i, row) in rows.iter().enumerate() {
            let hit = (!row.source_line.is_empty() && self.matches(row.source_line))
                || (!row.target_line.is_empty() && self.matches(row.target_line));
            if hit {
                source_types[i] = RowType::Ignore;
                target_types[i] = RowType::Ignore;
                ignored += 1;
            }
        }

        debug!("Ignore patterns matched {} of {} rows", ignored, rows.len());
    }
}

/// Mutable staging area for [`IgnorePatterns`]
#[derive(Debug, Clone, Default)]
pub struct IgnorePatternsBuilder {
    patterns: Vec<Regex>,
}

impl IgnorePatternsBuilder {
    /// Builder seeded with an existing snapshot
    pub fn from_snapshot(snapshot: &IgnorePatterns) -> Self {
        Self {
            patterns: snapshot.patterns.clone(),
        }
    }

    /// Register one pattern
    ///
    /// # Errors
    /// * `IgnoreError::EmptyPattern` - pattern is blank
    /// * `IgnoreError::DuplicatePattern` - same pattern text already registered
    /// * `IgnoreError::InvalidPattern` - regex does not compile
    ///
    /// Surrounding whitespace is trimmed. On error the builder keeps every
    /// earlier pattern.
    pub fn add(&mut self, pattern: &str) -> Result<&mut Self, IgnoreError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(IgnoreError::EmptyPattern);
        }
        if self.patterns.iter().any(|re| re.as_str() == pattern) {
            return Err(IgnoreError::DuplicatePattern(pattern.to_string()));
        }

        let compiled = Regex::new(pattern).map_err(|source| IgnoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push(compiled);
        Ok(self)
    }

    /// Drop a pattern by its text; returns whether it was present
    pub fn remove(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        let before = self.patterns.len();
        self.patterns.retain(|re| re.as_str() != pattern);
        self.patterns.len() != before
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn build(&self) -> IgnorePatterns {
        IgnorePatterns {
            patterns: self.patterns.clone(),
        }
    }
}
