//! Collaborator seam for fetching the preset bound to a session.

use async_trait::async_trait;

use crate::preset::ResolvedPreset;

/// Why a preset could not be produced for a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetLookupError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session expired: {0}")]
    Expired(String),
}

/// Source of session-bound presets. TTL enforcement belongs to the
/// implementation.
#[async_trait]
pub trait PresetLookup: Send + Sync {
    async fn lookup_preset(&self, session_id: &str) -> Result<ResolvedPreset, PresetLookupError>;
}
