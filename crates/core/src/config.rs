//! Configuration for the alignment engine

use serde::{Deserialize, Serialize};

/// How a deletion directly followed by an insertion is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementMode {
    /// Emit a single `Replaced` span
    #[default]
    Merge,
    /// Emit a `Deleted` span followed by an `Inserted` span
    Split,
}

/// Configuration for alignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Representation of substitutions
    pub replacements: ReplacementMode,
}

impl AlignConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how substitutions are reported
    pub fn with_replacements(mut self, mode: ReplacementMode) -> Self {
        self.replacements = mode;
        self
    }

    /// Report substitutions as separate deletions and insertions
    pub fn split_replacements() -> Self {
        Self::new().with_replacements(ReplacementMode::Split)
    }
}
