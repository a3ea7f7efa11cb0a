//! Preview draft persistence.
//!
//! An owner's draft is saved under one well-known key so that a preview
//! opened in another tab can read it back. Storage is behind [`DraftStore`];
//! the server uses [`SessionDraftStore`], tests and the CLI use
//! [`MemoryDraftStore`].
//!
//! Drafts have no expiry. A stored draft stays until it is overwritten or
//! explicitly cleared.

mod memory;
mod session;

pub use memory::MemoryDraftStore;
pub use session::SessionDraftStore;

use async_trait::async_trait;
use shopifake_core::SiteDraft;
use thiserror::Error;

/// Key the preview draft is stored under.
pub const PREVIEW_DRAFT_KEY: &str = "shopifake.previewDraft";

/// Errors that can occur when reading or writing the preview draft.
#[derive(Debug, Error)]
pub enum DraftStoreError {
    /// The stored value is not a JSON-encoded draft.
    #[error("stored preview draft is malformed: {source}")]
    Malformed {
        raw: String,
        source: serde_json::Error,
    },

    /// The draft could not be encoded.
    #[error("failed to encode preview draft: {0}")]
    Encode(serde_json::Error),

    /// The backing store failed.
    #[error("draft storage error: {0}")]
    Backend(String),
}

/// Storage for the single preview draft.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Store `draft`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be encoded or stored.
    async fn save(&self, draft: &SiteDraft) -> Result<(), DraftStoreError>;

    /// The stored draft, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Malformed`] if the stored text does not decode.
    async fn load(&self) -> Result<Option<SiteDraft>, DraftStoreError>;

    /// Forget the stored draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    async fn clear(&self) -> Result<(), DraftStoreError>;
}

/// Encode a draft the way every store persists it.
pub(crate) fn encode(draft: &SiteDraft) -> Result<String, DraftStoreError> {
    serde_json::to_string(draft).map_err(DraftStoreError::Encode)
}

/// Decode stored text, keeping it on failure.
pub(crate) fn decode(raw: String) -> Result<SiteDraft, DraftStoreError> {
    serde_json::from_str(&raw).map_err(|source| DraftStoreError::Malformed { raw, source })
}
