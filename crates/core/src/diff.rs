//! Alignment result types

use crate::mapping::CharSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an aligned region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Text present in both versions
    Equal,
    /// Text only in the original
    Deleted,
    /// Text only in the revision
    Inserted,
    /// Original text substituted by revised text
    Replaced,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Equal => "equal",
            SpanKind::Deleted => "deleted",
            SpanKind::Inserted => "inserted",
            SpanKind::Replaced => "replaced",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single aligned region
///
/// Ranges are byte offsets into the original and revised strings. A side that
/// contributes nothing carries a point range at the position where the other
/// side's text sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub kind: SpanKind,
    pub original_range: CharSpan,
    pub revised_range: CharSpan,
}

impl TextSpan {
    pub fn new(kind: SpanKind, original_range: CharSpan, revised_range: CharSpan) -> Self {
        Self {
            kind,
            original_range,
            revised_range,
        }
    }

    pub fn equal(original_range: CharSpan, revised_range: CharSpan) -> Self {
        Self::new(SpanKind::Equal, original_range, revised_range)
    }

    pub fn deleted(original_range: CharSpan, revised_at: usize) -> Self {
        Self::new(SpanKind::Deleted, original_range, CharSpan::point(revised_at))
    }

    pub fn inserted(original_at: usize, revised_range: CharSpan) -> Self {
        Self::new(SpanKind::Inserted, CharSpan::point(original_at), revised_range)
    }

    pub fn replaced(original_range: CharSpan, revised_range: CharSpan) -> Self {
        Self::new(SpanKind::Replaced, original_range, revised_range)
    }

    /// Text this span covers in the original
    pub fn original_text<'a>(&self, original: &'a str) -> &'a str {
        self.original_range.slice(original)
    }

    /// Text this span covers in the revision
    pub fn revised_text<'a>(&self, revised: &'a str) -> &'a str {
        self.revised_range.slice(revised)
    }

    /// Whether this span represents an edit
    pub fn is_change(&self) -> bool {
        self.kind != SpanKind::Equal
    }

    /// Get a human-readable description of this span
    pub fn description(&self, original: &str, revised: &str) -> String {
        match self.kind {
            SpanKind::Equal => format!("Equal: \"{}\"", self.original_text(original)),
            SpanKind::Deleted => format!("Delete: \"{}\"", self.original_text(original)),
            SpanKind::Inserted => format!("Insert: \"{}\"", self.revised_text(revised)),
            SpanKind::Replaced => format!(
                "Replace: \"{}\" → \"{}\"",
                self.original_text(original),
                self.revised_text(revised)
            ),
        }
    }
}

/// Statistics about an alignment
///
/// Character counts are in chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStatistics {
    /// Total characters in original
    pub original_length: usize,

    /// Total characters in revised
    pub revised_length: usize,

    /// Number of deleted spans
    pub deletions: usize,

    /// Number of inserted spans
    pub insertions: usize,

    /// Number of replaced spans
    pub replacements: usize,

    /// Characters shared by both versions
    pub unchanged_chars: usize,

    /// Original characters removed (deleted or replaced)
    pub removed_chars: usize,

    /// Revised characters added (inserted or replacing)
    pub added_chars: usize,

    /// Share of characters touched by an edit (0.0 to 1.0)
    pub change_ratio: f64,
}

impl AlignmentStatistics {
    /// Tally an aligned span sequence
    pub fn from_spans(spans: &[TextSpan], original: &str, revised: &str) -> Self {
        let mut stats = Self {
            original_length: original.chars().count(),
            revised_length: revised.chars().count(),
            ..Default::default()
        };

        for span in spans {
            let removed = span.original_text(original).chars().count();
            let added = span.revised_text(revised).chars().count();
            match span.kind {
                SpanKind::Equal => stats.unchanged_chars += removed,
                SpanKind::Deleted => stats.deletions += 1,
                SpanKind::Inserted => stats.insertions += 1,
                SpanKind::Replaced => stats.replacements += 1,
            }
            if span.is_change() {
                stats.removed_chars += removed;
                stats.added_chars += added;
            }
        }

        stats.calculate_change_ratio();
        stats
    }

    /// Calculate the change ratio
    pub fn calculate_change_ratio(&mut self) {
        let total = self.original_length + self.revised_length;
        self.change_ratio = if total > 0 {
            (self.removed_chars + self.added_chars) as f64 / total as f64
        } else {
            0.0
        };
    }

    /// Number of spans that are edits
    pub fn edit_count(&self) -> usize {
        self.deletions + self.insertions + self.replacements
    }

    /// Get a summary of the alignment
    pub fn summary(&self) -> String {
        format!(
            "{} edits ({} deletions, {} insertions, {} replacements). Change: {:.1}%",
            self.edit_count(),
            self.deletions,
            self.insertions,
            self.replacements,
            self.change_ratio * 100.0
        )
    }
}

impl fmt::Display for AlignmentStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_constructors() {
        let span = TextSpan::inserted(12, CharSpan::new(12, 15));
        assert_eq!(span.kind, SpanKind::Inserted);
        assert!(span.original_range.is_empty());
        assert_eq!(span.original_range.start, 12);
        assert!(span.is_change());

        let span = TextSpan::deleted(CharSpan::new(0, 3), 0);
        assert!(span.revised_range.is_empty());
    }

    #[test]
    fn test_span_description() {
        let original = "他很高心";
        let revised = "他很高兴";
        let span = TextSpan::replaced(CharSpan::new(9, 12), CharSpan::new(9, 12));
        assert_eq!(span.description(original, revised), "Replace: \"心\" → \"兴\"");
    }

    #[test]
    fn test_statistics() {
        let original = "他很高心";
        let revised = "他很高兴";
        let spans = vec![
            TextSpan::equal(CharSpan::new(0, 9), CharSpan::new(0, 9)),
            TextSpan::replaced(CharSpan::new(9, 12), CharSpan::new(9, 12)),
        ];
        let stats = AlignmentStatistics::from_spans(&spans, original, revised);

        assert_eq!(stats.replacements, 1);
        assert_eq!(stats.edit_count(), 1);
        assert_eq!(stats.unchanged_chars, 3);
        assert_eq!(stats.removed_chars, 1);
        assert_eq!(stats.added_chars, 1);
        assert!((stats.change_ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_empty() {
        let stats = AlignmentStatistics::from_spans(&[], "", "");
        assert_eq!(stats.change_ratio, 0.0);
        assert_eq!(stats.edit_count(), 0);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SpanKind::Replaced).unwrap();
        assert_eq!(json, "\"replaced\"");
    }
}
