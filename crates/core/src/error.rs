//! Error types for proofreading runs and their collaborators

use thiserror::Error;

/// Failure reported by an external collaborator (generation service, OCR).
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("process failed: {0}")]
    Process(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ProofreadError {
    #[error("no text to proofread")]
    EmptyInput,

    #[error("generation service {service} failed: {source}")]
    GenerationFailure {
        service: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("text extraction via {service} failed: {reason}")]
    ExtractionFailure { service: String, reason: String },

    #[error("unknown policy: {0}")]
    UnknownPolicy(String),
}

impl ProofreadError {
    /// Whether the user can act on this error (retry or fix input)
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ProofreadError::UnknownPolicy(_))
    }
}

pub type Result<T> = std::result::Result<T, ProofreadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failure_message() {
        let err = ProofreadError::GenerationFailure {
            service: "openai".into(),
            source: CollaboratorError::Service {
                status: 429,
                body: "quota exceeded".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "generation service openai failed: service returned 429: quota exceeded"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unknown_policy_is_fatal() {
        assert!(!ProofreadError::UnknownPolicy("loud".into()).is_recoverable());
    }
}
