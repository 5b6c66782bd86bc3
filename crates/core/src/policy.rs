//! Editing policies and their render rules
//!
//! A [`Policy`] couples the instruction sent to the generation service with
//! the rules both renderers use to present each span kind. The set of
//! policies is closed: [`PolicyKind`] enumerates it, and [`resolve`] maps an
//! identifier onto it.

use crate::diff::SpanKind;
use crate::error::ProofreadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in editing policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Mark errors in the original without showing corrections
    FlagOnly,
    /// Correct errors and show both versions
    Fix,
    /// Improve style and show both versions
    #[default]
    Polish,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::FlagOnly, PolicyKind::Fix, PolicyKind::Polish];

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::FlagOnly => "flag-only",
            PolicyKind::Fix => "fix",
            PolicyKind::Polish => "polish",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ProofreadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "flag-only" | "flag_only" | "strict" | "仅标红" => Ok(PolicyKind::FlagOnly),
            "fix" | "纠错" => Ok(PolicyKind::Fix),
            "polish" | "润色" => Ok(PolicyKind::Polish),
            other => Err(ProofreadError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Color role of rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    #[default]
    Neutral,
    Flagged,
    Corrected,
}

/// Visual treatment of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Style {
    pub color: ColorRole,
    pub strike_through: bool,
    pub bold: bool,
}

impl Style {
    pub const fn plain() -> Self {
        Self {
            color: ColorRole::Neutral,
            strike_through: false,
            bold: false,
        }
    }

    pub const fn colored(color: ColorRole) -> Self {
        Self {
            color,
            strike_through: false,
            bold: false,
        }
    }

    pub const fn struck(mut self) -> Self {
        self.strike_through = true;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::plain()
    }
}

/// How one span kind is presented
///
/// `Some` on a side means that side's text is shown with the given style.
/// `marker` requests a non-text placeholder at the span's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderTreatment {
    pub original: Option<Style>,
    pub revised: Option<Style>,
    pub marker: Option<Style>,
}

impl RenderTreatment {
    pub const fn original(style: Style) -> Self {
        Self {
            original: Some(style),
            revised: None,
            marker: None,
        }
    }

    pub const fn revised(style: Style) -> Self {
        Self {
            original: None,
            revised: Some(style),
            marker: None,
        }
    }

    pub const fn both(original: Style, revised: Style) -> Self {
        Self {
            original: Some(original),
            revised: Some(revised),
            marker: None,
        }
    }

    pub const fn marker(style: Style) -> Self {
        Self {
            original: None,
            revised: None,
            marker: Some(style),
        }
    }

    pub fn show_original_text(&self) -> bool {
        self.original.is_some()
    }

    pub fn show_revised_text(&self) -> bool {
        self.revised.is_some()
    }
}

/// Output a treatment applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Display,
    Document,
}

/// Treatment for every span kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTreatments {
    pub equal: RenderTreatment,
    pub deleted: RenderTreatment,
    pub inserted: RenderTreatment,
    pub replaced: RenderTreatment,
}

impl KindTreatments {
    pub fn get(&self, kind: SpanKind) -> RenderTreatment {
        match kind {
            SpanKind::Equal => self.equal,
            SpanKind::Deleted => self.deleted,
            SpanKind::Inserted => self.inserted,
            SpanKind::Replaced => self.replaced,
        }
    }

    fn all(&self) -> [RenderTreatment; 4] {
        [self.equal, self.deleted, self.inserted, self.replaced]
    }
}

/// Per-target render rules of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRules {
    pub display: KindTreatments,
    pub document: KindTreatments,
}

impl RenderRules {
    /// The same treatments for both targets
    pub fn uniform(treatments: KindTreatments) -> Self {
        Self {
            display: treatments,
            document: treatments,
        }
    }

    pub fn treatment(&self, target: Target, kind: SpanKind) -> RenderTreatment {
        match target {
            Target::Display => self.display.get(kind),
            Target::Document => self.document.get(kind),
        }
    }
}

const FLAGGED: Style = Style::colored(ColorRole::Flagged).bold();
const STRUCK: Style = Style::colored(ColorRole::Flagged).struck();

fn flag_only_rules() -> RenderRules {
    RenderRules::uniform(KindTreatments {
        equal: RenderTreatment::original(Style::plain()),
        deleted: RenderTreatment::original(FLAGGED),
        inserted: RenderTreatment::marker(FLAGGED),
        replaced: RenderTreatment::original(FLAGGED),
    })
}

fn revision_rules(corrected: Style) -> RenderRules {
    RenderRules::uniform(KindTreatments {
        equal: RenderTreatment::original(Style::plain()),
        deleted: RenderTreatment::original(STRUCK),
        inserted: RenderTreatment::revised(corrected),
        replaced: RenderTreatment::both(STRUCK, corrected),
    })
}

/// A resolved editing policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub kind: PolicyKind,
    /// Instruction passed to the generation service ahead of the input text
    pub generation_instruction: &'static str,
    /// Short mode name
    pub label: &'static str,
    /// One-line description of what a run in this mode does
    pub hint: &'static str,
    /// Caption for the action that starts a run
    pub action_label: &'static str,
    pub render_rules: RenderRules,
}

impl Policy {
    pub fn from_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::FlagOnly => Self {
                kind,
                generation_instruction: "请严格找出以下文本的错别字和语病，直接在原文上改正，只输出改正后的全文，不要改写其他内容：",
                label: "仅标红",
                hint: "Strict Mode: 仅标红错别字与语病，绝不改写原意。",
                action_label: "开始查错 (Start Check)",
                render_rules: flag_only_rules(),
            },
            PolicyKind::Fix => Self {
                kind,
                generation_instruction: "请修改以下文本的错别字和语病，保持原意不变：",
                label: "纠错",
                hint: "Fix Mode: 修改错别字，保持句子原意通顺。",
                action_label: "开始纠错 (Fix Errors)",
                render_rules: revision_rules(Style::colored(ColorRole::Corrected).bold()),
            },
            PolicyKind::Polish => Self {
                kind,
                generation_instruction: "请润色以下文本，使其更专业、优美：",
                label: "润色",
                hint: "Polish Mode: 深度优化用词与句式，提升文采。",
                action_label: "开始润色 (Polish Magic)",
                render_rules: revision_rules(Style::colored(ColorRole::Corrected)),
            },
        }
    }

    pub fn treatment(&self, target: Target, kind: SpanKind) -> RenderTreatment {
        self.render_rules.treatment(target, kind)
    }

    /// True when no target ever shows revised text
    pub fn preserves_original(&self) -> bool {
        [self.render_rules.display, self.render_rules.document]
            .iter()
            .flat_map(|t| t.all())
            .all(|t| !t.show_revised_text())
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_kind(PolicyKind::default())
    }
}

/// Resolve a policy identifier
pub fn resolve(policy_name: &str) -> Result<Policy, ProofreadError> {
    policy_name.parse::<PolicyKind>().map(Policy::from_kind)
}
