//! Inline HTML rendering for on-screen display
//!
//! The fragment keeps every character of the shown text: `\n` becomes `<br>`,
//! `\r` is kept as a character reference, and spaces and tabs are emitted as
//! is. It is meant to sit inside a `white-space: pre-wrap` container, which
//! [`DisplayRenderer::render_block`] provides.

use crate::diff::TextSpan;
use crate::policy::{ColorRole, Policy, Style, Target};
use crate::render::{segments, RunSource, Segment};

/// Display rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Prefix for CSS class names
    pub class_prefix: String,
    /// CSS color of flagged text
    pub flagged_color: String,
    /// CSS color of corrected text
    pub corrected_color: String,
    /// Tooltip shown on insertion markers
    pub marker_title: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            class_prefix: "pm".to_string(),
            flagged_color: "#d93025".to_string(),
            corrected_color: "#188038".to_string(),
            marker_title: "此处可能缺字 / missing text".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_colors(
        mut self,
        flagged: impl Into<String>,
        corrected: impl Into<String>,
    ) -> Self {
        self.flagged_color = flagged.into();
        self.corrected_color = corrected.into();
        self
    }

    pub fn with_marker_title(mut self, title: impl Into<String>) -> Self {
        self.marker_title = title.into();
        self
    }

    fn color(&self, role: ColorRole) -> Option<&str> {
        match role {
            ColorRole::Neutral => None,
            ColorRole::Flagged => Some(&self.flagged_color),
            ColorRole::Corrected => Some(&self.corrected_color),
        }
    }
}

/// Renders aligned spans as an inline HTML fragment
#[derive(Debug, Clone, Default)]
pub struct DisplayRenderer {
    options: DisplayOptions,
}

impl DisplayRenderer {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    /// Render `spans` as an HTML fragment under `policy`
    pub fn render(
        &self,
        spans: &[TextSpan],
        original: &str,
        revised: &str,
        policy: &Policy,
    ) -> String {
        let mut html = String::with_capacity(original.len() + revised.len());
        for segment in segments(spans, original, revised, policy, Target::Display) {
            self.push_segment(&mut html, &segment);
        }
        html
    }

    /// Render wrapped in a block that preserves whitespace
    pub fn render_block(
        &self,
        spans: &[TextSpan],
        original: &str,
        revised: &str,
        policy: &Policy,
    ) -> String {
        format!(
            "<div class=\"{}-result {}-{}\" style=\"white-space: pre-wrap; line-height: 1.8;\">{}</div>",
            self.options.class_prefix,
            self.options.class_prefix,
            policy.kind,
            self.render(spans, original, revised, policy)
        )
    }

    fn push_segment(&self, html: &mut String, segment: &Segment<'_>) {
        let prefix = &self.options.class_prefix;

        if segment.source == RunSource::Marker {
            let color = self
                .options
                .color(segment.style.color)
                .unwrap_or("currentColor");
            html.push_str(&format!(
                "<span class=\"{prefix}-marker\" title=\"{}\" style=\"display: inline-block; \
                 width: 0; height: 1em; margin: 0 1px; vertical-align: text-bottom; \
                 border-left: 2px solid {color};\"></span>",
                escape_attribute(&self.options.marker_title)
            ));
            return;
        }

        if segment.source == RunSource::Unchanged && segment.style.is_plain() {
            push_escaped(html, segment.text);
            return;
        }

        html.push_str(&format!(
            "<span class=\"{}\" style=\"{}\">",
            self.class_list(segment),
            self.inline_style(&segment.style)
        ));
        push_escaped(html, segment.text);
        html.push_str("</span>");
    }

    fn class_list(&self, segment: &Segment<'_>) -> String {
        let prefix = &self.options.class_prefix;
        let mut classes = vec![format!("{prefix}-{}", segment.kind)];
        match segment.style.color {
            ColorRole::Neutral => {}
            ColorRole::Flagged => classes.push(format!("{prefix}-flagged")),
            ColorRole::Corrected => classes.push(format!("{prefix}-corrected")),
        }
        if segment.style.strike_through {
            classes.push(format!("{prefix}-struck"));
        }
        classes.join(" ")
    }

    fn inline_style(&self, style: &Style) -> String {
        let mut rules = Vec::new();
        if let Some(color) = self.options.color(style.color) {
            rules.push(format!("color: {color};"));
        }
        if style.strike_through {
            rules.push("text-decoration: line-through;".to_string());
        }
        if style.bold {
            rules.push("font-weight: bold;".to_string());
        }
        rules.join(" ")
    }
}

/// Render `spans` as an HTML fragment with default options
pub fn render_display(
    spans: &[TextSpan],
    original: &str,
    revised: &str,
    policy: &Policy,
) -> String {
    DisplayRenderer::default().render(spans, original, revised, policy)
}

fn markup_entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

fn push_escaped(html: &mut String, text: &str) {
    for ch in text.chars() {
        match (ch, markup_entity(ch)) {
            (_, Some(entity)) => html.push_str(entity),
            ('\n', None) => html.push_str("<br>"),
            ('\r', None) => html.push_str("&#13;"),
            _ => html.push(ch),
        }
    }
}

/// Escape text for use as HTML element content.
///
/// `\n` becomes `<br>`, so the result must not be placed inside an attribute;
/// use [`escape_attribute`] there.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

/// Escape text for a quoted attribute value or other tag-free context.
/// Line breaks and tabs become character references.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match (ch, markup_entity(ch)) {
            (_, Some(entity)) => out.push_str(entity),
            ('\n', None) => out.push_str("&#10;"),
            ('\r', None) => out.push_str("&#13;"),
            ('\t', None) => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Recover the plain text of a rendered fragment.
///
/// Tags are dropped, `<br>` becomes `\n`, and the entities produced by the
/// renderer are decoded. Markers, being empty elements, contribute nothing.
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
                let tag = &rest[..end];
                if tag.eq_ignore_ascii_case("<br>") || tag.eq_ignore_ascii_case("<br/>") {
                    text.push('\n');
                }
                rest = &rest[end..];
            }
            '&' => {
                let (decoded, consumed) = decode_entity(rest);
                text.push(decoded);
                rest = &rest[consumed..];
            }
            _ => {
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    text
}

fn decode_entity(input: &str) -> (char, usize) {
    const ENTITIES: [(&str, char); 8] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&#13;", '\r'),
        ("&#10;", '\n'),
        ("&#9;", '\t'),
    ];

    ENTITIES
        .iter()
        .find(|(entity, _)| input.starts_with(entity))
        .map(|(entity, ch)| (*ch, entity.len()))
        .unwrap_or(('&', 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignConfig;
    use crate::engine::AlignmentEngine;
    use crate::policy::PolicyKind;
    use proptest::prelude::*;

    fn display(original: &str, revised: &str, kind: PolicyKind) -> String {
        let spans = AlignmentEngine::default().align(original, revised);
        render_display(&spans, original, revised, &Policy::from_kind(kind))
    }

    #[test]
    fn test_flag_only_insertion_marker() {
        let html = display("我昨天去公司", "我昨天去了公司", PolicyKind::FlagOnly);

        assert!(html.starts_with("我昨天去<span class=\"pm-marker\""));
        assert!(html.ends_with("</span>公司"));
        assert!(!html.contains('了'));
        assert_eq!(strip_markup(&html), "我昨天去公司");
    }

    #[test]
    fn test_flag_only_replacement_hides_revision() {
        let html = display("他很高心", "他很高兴", PolicyKind::FlagOnly);

        assert_eq!(
            html,
            "他很高<span class=\"pm-replaced pm-flagged\" \
             style=\"color: #d93025; font-weight: bold;\">心</span>"
        );
    }

    #[test]
    fn test_fix_replacement_shows_both() {
        let html = display("他很高心", "他很高兴", PolicyKind::Fix);

        assert_eq!(
            html,
            "他很高<span class=\"pm-replaced pm-flagged pm-struck\" \
             style=\"color: #d93025; text-decoration: line-through;\">心</span>\
             <span class=\"pm-replaced pm-corrected\" \
             style=\"color: #188038; font-weight: bold;\">兴</span>"
        );
        assert_eq!(strip_markup(&html), "他很高心兴");
    }

    #[test]
    fn test_paragraph_breaks_preserved() {
        let html = display("A\n\nB", "A\n\nC", PolicyKind::Fix);
        assert!(html.starts_with("A<br><br><span"));
    }

    #[test]
    fn test_escapes_markup_characters() {
        let html = display("<b>a & b</b> 'x'", "<b>a & b</b> 'x'", PolicyKind::Polish);
        assert_eq!(html, "&lt;b&gt;a &amp; b&lt;/b&gt; &#39;x&#39;");
    }

    #[test]
    fn test_whitespace_kept_literally() {
        let text = "  缩进\t制表\r\n下一行";
        let html = display(text, text, PolicyKind::Polish);
        assert_eq!(html, "  缩进\t制表&#13;<br>下一行");
        assert_eq!(strip_markup(&html), text);
    }

    #[test]
    fn test_identical_text_has_no_styling() {
        for kind in PolicyKind::ALL {
            let html = display("没有任何错误。", "没有任何错误。", kind);
            assert_eq!(html, "没有任何错误。");
        }
    }

    #[test]
    fn test_render_block_wrapper() {
        let spans = AlignmentEngine::default().align("a", "b");
        let policy = Policy::from_kind(PolicyKind::FlagOnly);
        let renderer = DisplayRenderer::new(DisplayOptions::default().with_class_prefix("proof"));
        let html = renderer.render_block(&spans, "a", "b", &policy);

        assert!(html.starts_with("<div class=\"proof-result proof-flag-only\""));
        assert!(html.contains("white-space: pre-wrap"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_multiline_marker_title_stays_in_attribute() {
        let original = "我昨天去公司";
        let revised = "我昨天去了公司";
        let spans = AlignmentEngine::default().align(original, revised);
        let options = DisplayOptions::default().with_marker_title("缺字\n请检查 <\"x\">");
        let policy = Policy::from_kind(PolicyKind::FlagOnly);
        let html = DisplayRenderer::new(options).render(&spans, original, revised, &policy);

        assert!(html.contains("title=\"缺字&#10;请检查 &lt;&quot;x&quot;&gt;\""));
        assert!(!html.contains("<br>"));
        assert_eq!(strip_markup(&html), original);
    }

    #[test]
    fn test_custom_colors_applied() {
        let spans = AlignmentEngine::default().align("他很高心", "他很高兴");
        let renderer = DisplayRenderer::new(DisplayOptions::default().with_colors("red", "green"));
        let policy = Policy::from_kind(PolicyKind::Fix);
        let html = renderer.render(&spans, "他很高心", "他很高兴", &policy);

        assert!(html.contains("style=\"color: red; text-decoration: line-through;\">心</span>"));
        assert!(html.contains("style=\"color: green; font-weight: bold;\">兴</span>"));
        assert!(!html.contains("#d93025"));
    }

    #[test]
    fn test_custom_colors_on_marker() {
        let spans = AlignmentEngine::default().align("ab", "axb");
        let options = DisplayOptions::default().with_colors("purple", "teal");
        let policy = Policy::from_kind(PolicyKind::FlagOnly);
        let html = DisplayRenderer::new(options).render(&spans, "ab", "axb", &policy);

        assert!(html.contains("border-left: 2px solid purple;"));
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute("a\"b\n<c>\t'd' & e\r"),
            "a&quot;b&#10;&lt;c&gt;&#9;&#39;d&#39; &amp; e&#13;"
        );
        assert_eq!(escape_html("a\nb"), "a<br>b");
    }

    #[test]
    fn test_strip_markup_keeps_unknown_ampersand() {
        assert_eq!(strip_markup("a &nbsp b"), "a &nbsp b");
    }

    proptest! {
        #[test]
        fn prop_flag_only_display_is_original(
            original in "[的了是在我他<>&'\" \n\r\t]{0,24}",
            revised in "[的了是在我他<>&'\" \n\r\t]{0,24}",
        ) {
            let html = display(&original, &revised, PolicyKind::FlagOnly);
            prop_assert_eq!(strip_markup(&html), original);
        }

        #[test]
        fn prop_flag_only_display_is_original_with_options(
            original in "[的了是在我他<>&'\" \n\r\t]{0,24}",
            revised in "[的了是在我他<>&'\" \n\r\t]{0,24}",
            title in "[缺字<>&'\" \n\r\t]{0,12}",
            split in any::<bool>(),
        ) {
            let config = if split {
                AlignConfig::split_replacements()
            } else {
                AlignConfig::default()
            };
            let spans = AlignmentEngine::new(config).align(&original, &revised);
            let options = DisplayOptions::default()
                .with_class_prefix("proof")
                .with_colors("red", "green")
                .with_marker_title(title);
            let policy = Policy::from_kind(PolicyKind::FlagOnly);
            let html = DisplayRenderer::new(options).render(&spans, &original, &revised, &policy);
            prop_assert_eq!(strip_markup(&html), original);
        }
    }
}
