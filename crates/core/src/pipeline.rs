//! Proofreading pipeline
//!
//! One run takes the user's text and a policy, asks the generation service for
//! a revision, aligns the two texts, and yields a [`RevisionResult`] that both
//! renderers consume. Runs share no state.

use crate::collaborator::{Reviser, TextExtractor};
use crate::config::AlignConfig;
use crate::diff::{AlignmentStatistics, TextSpan};
use crate::engine::AlignmentEngine;
use crate::error::{ProofreadError, Result};
use crate::policy::Policy;
use crate::render::{DisplayRenderer, DocumentRenderer, StyledRun};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of one proofreading run
#[derive(Debug, Clone, Serialize)]
pub struct RevisionResult {
    pub original_text: String,
    pub revised_text: String,
    pub spans: Vec<TextSpan>,
    pub policy: Policy,
}

impl RevisionResult {
    /// Inline HTML fragment with default display options
    pub fn display(&self) -> String {
        self.display_with(&DisplayRenderer::default())
    }

    pub fn display_with(&self, renderer: &DisplayRenderer) -> String {
        renderer.render(&self.spans, &self.original_text, &self.revised_text, &self.policy)
    }

    /// Document runs with default document options
    pub fn document(&self) -> Vec<StyledRun> {
        self.document_with(&DocumentRenderer::default())
    }

    pub fn document_with(&self, renderer: &DocumentRenderer) -> Vec<StyledRun> {
        renderer.render(&self.spans, &self.original_text, &self.revised_text, &self.policy)
    }

    pub fn statistics(&self) -> AlignmentStatistics {
        AlignmentStatistics::from_spans(&self.spans, &self.original_text, &self.revised_text)
    }

    pub fn has_changes(&self) -> bool {
        self.spans.iter().any(|s| s.is_change())
    }
}

/// Runs proofreading requests
#[derive(Default)]
pub struct Proofreader {
    engine: AlignmentEngine,
}

impl Proofreader {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            engine: AlignmentEngine::new(config),
        }
    }

    /// Revise `text` through `reviser` under `policy` and align the result.
    ///
    /// Blank input fails with [`ProofreadError::EmptyInput`] before the
    /// service is called. A service failure yields
    /// [`ProofreadError::GenerationFailure`] and no result.
    pub async fn proofread(
        &self,
        reviser: &dyn Reviser,
        policy: &Policy,
        text: &str,
    ) -> Result<RevisionResult> {
        if text.trim().is_empty() {
            return Err(ProofreadError::EmptyInput);
        }

        info!(
            policy = %policy.kind,
            service = reviser.name(),
            chars = text.chars().count(),
            "requesting revision"
        );

        let revised = reviser
            .revise(policy.generation_instruction, text)
            .await
            .map_err(|source| {
                warn!(service = reviser.name(), error = %source, "revision failed");
                ProofreadError::GenerationFailure {
                    service: reviser.name().to_string(),
                    source,
                }
            })?;

        Ok(self.review(text, &revised, policy))
    }

    /// Align an already available revision against the original
    pub fn review(&self, original: &str, revised: &str, policy: &Policy) -> RevisionResult {
        let spans = self.engine.align(original, revised);
        let result = RevisionResult {
            original_text: original.to_string(),
            revised_text: revised.to_string(),
            spans,
            policy: policy.clone(),
        };

        info!(policy = %policy.kind, "{}", result.statistics().summary());
        result
    }
}

/// Extract input text from an image.
///
/// The recognized text is trimmed; a failed call or blank result yields
/// [`ProofreadError::ExtractionFailure`].
pub async fn extract_input(
    extractor: &dyn TextExtractor,
    image: &[u8],
    language_hints: &[String],
) -> Result<String> {
    info!(
        extractor = extractor.name(),
        bytes = image.len(),
        languages = %language_hints.join("+"),
        "extracting text from image"
    );

    let text = extractor
        .extract_text(image, language_hints)
        .await
        .map_err(|err| ProofreadError::ExtractionFailure {
            service: extractor.name().to_string(),
            reason: err.to_string(),
        })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ProofreadError::ExtractionFailure {
            service: extractor.name().to_string(),
            reason: "no text recognized".to_string(),
        });
    }

    Ok(text.to_string())
}
