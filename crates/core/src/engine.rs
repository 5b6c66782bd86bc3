//! Alignment engine that turns two texts into an ordered span sequence

use crate::algorithm::{Aligner, LongestMatchAligner, Opcode};
use crate::config::{AlignConfig, ReplacementMode};
use crate::diff::{SpanKind, TextSpan};
use crate::mapping::CharOffsets;
use tracing::debug;

/// The alignment engine
pub struct AlignmentEngine {
    config: AlignConfig,
    aligner: LongestMatchAligner,
}

impl AlignmentEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            aligner: LongestMatchAligner::new(),
        }
    }

    /// Align `original` against `revised` at char granularity.
    ///
    /// Never fails. The original-side ranges of the result concatenate to
    /// `original` and the revised-side ranges to `revised`.
    pub fn align(&self, original: &str, revised: &str) -> Vec<TextSpan> {
        let original_chars: Vec<char> = original.chars().collect();
        let revised_chars: Vec<char> = revised.chars().collect();

        let opcodes = self.aligner.opcodes(&original_chars, &revised_chars);

        let original_offsets = CharOffsets::new(original);
        let revised_offsets = CharOffsets::new(revised);

        let mut spans = Vec::with_capacity(opcodes.len() + 1);
        for opcode in &opcodes {
            self.push_spans(&mut spans, opcode, &original_offsets, &revised_offsets);
        }

        debug!(
            algorithm = self.aligner.name(),
            original_chars = original_chars.len(),
            revised_chars = revised_chars.len(),
            spans = spans.len(),
            changes = spans.iter().filter(|s| s.is_change()).count(),
            "aligned texts"
        );

        spans
    }

    fn push_spans(
        &self,
        spans: &mut Vec<TextSpan>,
        opcode: &Opcode,
        original_offsets: &CharOffsets,
        revised_offsets: &CharOffsets,
    ) {
        let original_range = original_offsets.span(opcode.original.start, opcode.original.end);
        let revised_range = revised_offsets.span(opcode.revised.start, opcode.revised.end);

        match opcode.kind {
            SpanKind::Equal => spans.push(TextSpan::equal(original_range, revised_range)),
            SpanKind::Deleted => spans.push(TextSpan::deleted(original_range, revised_range.start)),
            SpanKind::Inserted => {
                spans.push(TextSpan::inserted(original_range.start, revised_range))
            }
            SpanKind::Replaced => match self.config.replacements {
                ReplacementMode::Merge => {
                    spans.push(TextSpan::replaced(original_range, revised_range))
                }
                ReplacementMode::Split => {
                    spans.push(TextSpan::deleted(original_range, revised_range.start));
                    spans.push(TextSpan::inserted(original_range.end, revised_range));
                }
            },
        }
    }
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new(AlignConfig::default())
    }
}
