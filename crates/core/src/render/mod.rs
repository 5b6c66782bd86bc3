//! Presentation of aligned spans
//!
//! Both renderers walk the same [`Segment`] sequence produced by [`segments`],
//! so they agree on what text is shown and how it is classified; they differ
//! only in output format.
pub mod display;
pub mod document;

pub use display::{
    escape_attribute, escape_html, render_display, strip_markup, DisplayOptions, DisplayRenderer,
};
pub use document::{
    original_projection, render_document, revised_projection, DocumentOptions, DocumentRenderer,
    StyledRun,
};

use crate::diff::{SpanKind, TextSpan};
use crate::policy::{Policy, Style, Target};
use serde::{Deserialize, Serialize};

/// Where a piece of rendered text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunSource {
    /// Text common to both versions
    Unchanged,
    /// Original text of an edited region
    Original,
    /// Revised text of an edited region
    Revised,
    /// Placeholder for an edit with no original text; carries no text of its own
    Marker,
}

/// One styled piece of a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: Style,
    pub source: RunSource,
    pub kind: SpanKind,
}

/// Expand spans into styled segments according to `policy` for `target`.
///
/// Within a span the order is original text, marker, revised text. Text
/// segments with no characters are dropped; markers are always kept.
pub fn segments<'a>(
    spans: &[TextSpan],
    original: &'a str,
    revised: &'a str,
    policy: &Policy,
    target: Target,
) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let treatment = policy.treatment(target, span.kind);

        if let Some(style) = treatment.original {
            let text = span.original_text(original);
            if !text.is_empty() {
                let source = if span.kind == SpanKind::Equal {
                    RunSource::Unchanged
                } else {
                    RunSource::Original
                };
                out.push(Segment {
                    text,
                    style,
                    source,
                    kind: span.kind,
                });
            }
        }

        if let Some(style) = treatment.marker {
            out.push(Segment {
                text: "",
                style,
                source: RunSource::Marker,
                kind: span.kind,
            });
        }

        if let Some(style) = treatment.revised {
            let text = span.revised_text(revised);
            if !text.is_empty() {
                out.push(Segment {
                    text,
                    style,
                    source: RunSource::Revised,
                    kind: span.kind,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignConfig;
    use crate::engine::AlignmentEngine;
    use crate::policy::{ColorRole, PolicyKind};
    use pretty_assertions::assert_eq;

    fn summarize(segments: &[Segment<'_>]) -> Vec<(RunSource, String, ColorRole)> {
        segments
            .iter()
            .map(|s| (s.source, s.text.to_string(), s.style.color))
            .collect()
    }

    #[test]
    fn test_flag_only_segments() {
        let original = "我昨天去公司";
        let revised = "我昨天去了公司";
        let spans = AlignmentEngine::default().align(original, revised);
        let policy = Policy::from_kind(PolicyKind::FlagOnly);

        let segs = segments(&spans, original, revised, &policy, Target::Display);
        assert_eq!(
            summarize(&segs),
            vec![
                (RunSource::Unchanged, "我昨天去".to_string(), ColorRole::Neutral),
                (RunSource::Marker, String::new(), ColorRole::Flagged),
                (RunSource::Unchanged, "公司".to_string(), ColorRole::Neutral),
            ]
        );
    }

    #[test]
    fn test_fix_segments_replacement() {
        let original = "他很高心";
        let revised = "他很高兴";
        let spans = AlignmentEngine::default().align(original, revised);
        let policy = Policy::from_kind(PolicyKind::Fix);

        let segs = segments(&spans, original, revised, &policy, Target::Document);
        assert_eq!(
            summarize(&segs),
            vec![
                (RunSource::Unchanged, "他很高".to_string(), ColorRole::Neutral),
                (RunSource::Original, "心".to_string(), ColorRole::Flagged),
                (RunSource::Revised, "兴".to_string(), ColorRole::Corrected),
            ]
        );
        assert!(segs[1].style.strike_through);
    }

    fn engines() -> [AlignmentEngine; 2] {
        [
            AlignmentEngine::default(),
            AlignmentEngine::new(AlignConfig::split_replacements()),
        ]
    }

    #[test]
    fn test_targets_agree() {
        let original = "今天天气很好，我们去公园玩吧。";
        let revised = "今天天气非常好，我们一起去公园吧！";

        for engine in engines() {
            let spans = engine.align(original, revised);
            for kind in PolicyKind::ALL {
                let policy = Policy::from_kind(kind);
                let display = segments(&spans, original, revised, &policy, Target::Display);
                let document = segments(&spans, original, revised, &policy, Target::Document);
                assert_eq!(display, document);
            }
        }
    }

    #[test]
    fn test_rendered_outputs_show_same_text() {
        let original = "他很高心，我们们明天见。\n第二段";
        let revised = "他很高兴，我们明天见！\n第二段落";

        for engine in engines() {
            let spans = engine.align(original, revised);
            for kind in PolicyKind::ALL {
                let policy = Policy::from_kind(kind);
                let shown = strip_markup(&render_display(&spans, original, revised, &policy));
                let runs = render_document(&spans, original, revised, &policy);
                let written: String = runs
                    .iter()
                    .filter(|r| !r.is_marker())
                    .map(|r| r.text.as_str())
                    .collect();
                assert_eq!(shown, written, "{kind} diverged");
            }
        }
    }
}
