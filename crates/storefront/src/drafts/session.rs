//! Session-backed draft store.
//!
//! Each visitor's session plays the role browser local storage plays for a
//! single-page app: one slot per visitor, written only by that visitor.

use async_trait::async_trait;
use shopifake_core::SiteDraft;
use tower_sessions::Session;

use super::{DraftStore, DraftStoreError, PREVIEW_DRAFT_KEY, decode, encode};

/// Stores the encoded draft in the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionDraftStore {
    session: Session,
}

impl SessionDraftStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

fn backend(err: tower_sessions::session::Error) -> DraftStoreError {
    DraftStoreError::Backend(err.to_string())
}

#[async_trait]
impl DraftStore for SessionDraftStore {
    async fn save(&self, draft: &SiteDraft) -> Result<(), DraftStoreError> {
        self.session
            .insert(PREVIEW_DRAFT_KEY, encode(draft)?)
            .await
            .map_err(backend)
    }

    async fn load(&self) -> Result<Option<SiteDraft>, DraftStoreError> {
        let raw: Option<String> = self
            .session
            .get(PREVIEW_DRAFT_KEY)
            .await
            .map_err(backend)?;
        raw.map(decode).transpose()
    }

    async fn clear(&self) -> Result<(), DraftStoreError> {
        self.session
            .remove::<String>(PREVIEW_DRAFT_KEY)
            .await
            .map(|_| ())
            .map_err(backend)
    }
}
