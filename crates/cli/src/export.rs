//! Serialization of rendered results into downloadable files.

use proofmark_core::{escape_attribute, escape_html, ColorRole, Policy, StyledRun};

/// Build an RTF document with `title` as heading followed by `runs`.
///
/// Colors: neutral is black, flagged red, corrected green. Non-ASCII text is
/// written as `\uN?` escapes of its UTF-16 units.
pub fn to_rtf(title: &str, runs: &[StyledRun]) -> String {
    let mut rtf = String::new();
    rtf.push_str("{\\rtf1\\ansi\\deff0\\uc1\n");
    rtf.push_str("{\\fonttbl{\\f0\\fnil\\fcharset134 SimSun;}}\n");
    rtf.push_str("{\\colortbl;\\red0\\green0\\blue0;");
    rtf.push_str("\\red217\\green48\\blue37;\\red24\\green128\\blue56;}\n");

    rtf.push_str("{\\pard\\qc\\b\\fs32 ");
    push_rtf_text(&mut rtf, title);
    rtf.push_str("\\par}\n");

    rtf.push_str("{\\pard\\fs24 ");
    for run in runs {
        rtf.push_str(&format!("{{\\cf{}", color_index(run.color)));
        if run.strike_through {
            rtf.push_str("\\strike");
        }
        if run.bold {
            rtf.push_str("\\b");
        }
        rtf.push(' ');
        push_rtf_text(&mut rtf, &run.text);
        rtf.push('}');
    }
    rtf.push_str("\\par}\n}");
    rtf
}

fn color_index(color: ColorRole) -> u8 {
    match color {
        ColorRole::Neutral => 1,
        ColorRole::Flagged => 2,
        ColorRole::Corrected => 3,
    }
}

fn push_rtf_text(rtf: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => rtf.push_str("\\\\"),
            '{' => rtf.push_str("\\{"),
            '}' => rtf.push_str("\\}"),
            '\n' => rtf.push_str("\\par "),
            '\r' => {}
            '\t' => rtf.push_str("\\tab "),
            ' '..='~' => rtf.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    rtf.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
}

/// Build a standalone HTML page around a display fragment
pub fn html_page(title: &str, policy: &Policy, fragment: &str) -> String {
    let heading = escape_html(title);
    let title = escape_attribute(title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"zh\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body style=\"max-width: 48em; margin: 2em auto; font-family: sans-serif;\">\n\
         <h1>{heading}</h1>\n\
         <p class=\"pm-hint\">{}</p>\n\
         <div class=\"pm-result pm-{}\" \
         style=\"white-space: pre-wrap; line-height: 1.8;\">{fragment}</div>\n\
         </body>\n\
         </html>\n",
        escape_html(policy.hint),
        policy.kind,
    )
}
