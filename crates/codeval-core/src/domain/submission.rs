//! The code under evaluation.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Raw source text supplied by the user, immutable once created.
///
/// The SHA-256 digest identifies the submission in log lines so the code
/// itself never has to be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSubmission {
    code: String,
    digest: String,
}

impl CodeSubmission {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        let digest = hex::encode(hasher.finalize());
        CodeSubmission { code, digest }
    }

    /// The submitted text, verbatim.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Full SHA-256 hex digest of the code.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Short form (first 12 hex chars).
    pub fn short_digest(&self) -> &str {
        &self.digest[..12.min(self.digest.len())]
    }

    /// `true` when the code is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}
