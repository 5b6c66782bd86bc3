//! Interfaces of the external services a proofreading run depends on
//!
//! Implementations live with the application; the core only calls through
//! these traits.

use crate::error::CollaboratorError;
use async_trait::async_trait;

/// Text-generation service that rewrites input under an instruction
#[async_trait]
pub trait Reviser: Send + Sync {
    /// Return the full replacement text for `text`.
    ///
    /// Failures (network, auth, quota, malformed response) yield an error and
    /// no partial text.
    async fn revise(&self, instruction: &str, text: &str) -> Result<String, CollaboratorError>;

    /// Service name used in logs and error messages
    fn name(&self) -> &str;
}

/// Image-to-text extraction (OCR)
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Best-effort text of `image`. An empty string means nothing was recognized.
    async fn extract_text(
        &self,
        image: &[u8],
        language_hints: &[String],
    ) -> Result<String, CollaboratorError>;

    /// Extractor name used in logs and error messages
    fn name(&self) -> &str;
}
