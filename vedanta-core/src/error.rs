//! Claim analysis error taxonomy
//!
//! Only [`AnalysisError::InvalidInput`] is ever returned to callers of the
//! verification entry points; every other variant is recovered locally by
//! falling back to heuristic scoring.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No evidence articles available")]
    NoEvidence,

    #[error("Remote analysis unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Malformed remote response: {0}")]
    MalformedRemoteResponse(String),
}

impl AnalysisError {
    /// Whether the caller must see this error instead of a fallback result
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Reject claims that are empty after trimming
pub fn validate_claim(claim: &str) -> Result<&str, AnalysisError> {
    let trimmed = claim.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidInput("claim text is empty".to_string()));
    }
    Ok(trimmed)
}
