//! Styled run rendering for rich-text documents

use crate::diff::TextSpan;
use crate::policy::{ColorRole, Policy, Target};
use crate::render::{segments, RunSource};
use serde::{Deserialize, Serialize};

/// A contiguous piece of document text sharing one format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub color: ColorRole,
    pub strike_through: bool,
    pub bold: bool,
    pub source: RunSource,
}

impl StyledRun {
    pub fn is_marker(&self) -> bool {
        self.source == RunSource::Marker
    }

    fn same_format(&self, other: &StyledRun) -> bool {
        self.color == other.color
            && self.strike_through == other.strike_through
            && self.bold == other.bold
            && self.source == other.source
    }
}

/// Document rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Text of the run standing in for missing original text
    pub marker_glyph: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            marker_glyph: "‸".to_string(),
        }
    }
}

impl DocumentOptions {
    pub fn with_marker_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.marker_glyph = glyph.into();
        self
    }
}

/// Renders aligned spans as styled runs
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: DocumentOptions,
}

impl DocumentRenderer {
    pub fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    /// Render `spans` as runs under `policy`.
    ///
    /// Adjacent runs with the same format and source are merged.
    pub fn render(
        &self,
        spans: &[TextSpan],
        original: &str,
        revised: &str,
        policy: &Policy,
    ) -> Vec<StyledRun> {
        let mut runs: Vec<StyledRun> = Vec::new();

        for segment in segments(spans, original, revised, policy, Target::Document) {
            let text = if segment.source == RunSource::Marker {
                self.options.marker_glyph.as_str()
            } else {
                segment.text
            };

            let run = StyledRun {
                text: text.to_string(),
                color: segment.style.color,
                strike_through: segment.style.strike_through,
                bold: segment.style.bold,
                source: segment.source,
            };

            match runs.last_mut() {
                Some(last) if !run.is_marker() && last.same_format(&run) => {
                    last.text.push_str(&run.text)
                }
                _ => runs.push(run),
            }
        }

        runs
    }
}

/// Render `spans` as runs with default options
pub fn render_document(
    spans: &[TextSpan],
    original: &str,
    revised: &str,
    policy: &Policy,
) -> Vec<StyledRun> {
    DocumentRenderer::default().render(spans, original, revised, policy)
}

/// Concatenated text of unchanged and original-side runs
pub fn original_projection(runs: &[StyledRun]) -> String {
    runs.iter()
        .filter(|r| matches!(r.source, RunSource::Unchanged | RunSource::Original))
        .map(|r| r.text.as_str())
        .collect()
}

/// Concatenated text of unchanged and revised-side runs
pub fn revised_projection(runs: &[StyledRun]) -> String {
    runs.iter()
        .filter(|r| matches!(r.source, RunSource::Unchanged | RunSource::Revised))
        .map(|r| r.text.as_str())
        .collect()
}
