//! # proofmark
//!
//! Turns a proofreading revision into a reviewable diff. The original text and
//! the revision returned by a text-generation service are aligned character by
//! character, and the aligned spans are rendered under an editing policy both
//! as inline HTML and as styled document runs.
//!
//! ## Core Concepts
//!
//! - **Alignment**: [`align`] splits two texts into equal, deleted, inserted
//!   and replaced spans whose ranges rebuild both inputs exactly
//! - **Policies**: [`resolve`] maps `flag-only`, `fix` or `polish` onto the
//!   instruction for the service and the render rules for each span kind
//! - **Renderers**: [`render_display`] and [`render_document`] present the
//!   same spans; under `flag-only` neither ever shows revised wording
//! - **Pipeline**: [`Proofreader`] runs one request end to end against a
//!   [`Reviser`]
//!
//! ## Example
//!
//! ```rust
//! use proofmark_core::{align, render_display, render_document, resolve, strip_markup};
//!
//! let original = "我昨天去公司";
//! let revised = "我昨天去了公司";
//! let policy = resolve("flag-only").unwrap();
//!
//! let spans = align(original, revised);
//! let html = render_display(&spans, original, revised, &policy);
//! assert_eq!(strip_markup(&html), original);
//!
//! let runs = render_document(&spans, original, revised, &policy);
//! assert_eq!(runs.len(), 3);
//! ```

pub mod algorithm;
pub mod collaborator;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod policy;
pub mod render;

// Re-export main types
pub use collaborator::{Reviser, TextExtractor};
pub use config::{AlignConfig, ReplacementMode};
pub use diff::{AlignmentStatistics, SpanKind, TextSpan};
pub use engine::AlignmentEngine;
pub use error::{CollaboratorError, ProofreadError};
pub use mapping::CharSpan;
pub use pipeline::{extract_input, Proofreader, RevisionResult};
pub use policy::{
    resolve, ColorRole, Policy, PolicyKind, RenderRules, RenderTreatment, Style, Target,
};
pub use render::{
    escape_attribute, escape_html, original_projection, render_display, render_document,
    revised_projection, strip_markup, DisplayOptions, DisplayRenderer, DocumentOptions,
    DocumentRenderer, RunSource, StyledRun,
};

/// Align two texts with the default configuration
///
/// # Arguments
///
/// * `original` - The text the user submitted
/// * `revised` - The text returned by the generation service
///
/// # Returns
///
/// Ordered spans covering both texts
pub fn align(original: &str, revised: &str) -> Vec<TextSpan> {
    AlignmentEngine::default().align(original, revised)
}
