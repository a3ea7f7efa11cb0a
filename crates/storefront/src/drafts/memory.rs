//! In-process draft store.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use shopifake_core::SiteDraft;

use super::{DraftStore, DraftStoreError, decode, encode};

/// Keeps the encoded draft in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text in the slot, bypassing encoding.
    pub fn put_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
    }

    fn take_snapshot(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, draft: &SiteDraft) -> Result<(), DraftStoreError> {
        self.put_raw(encode(draft)?);
        Ok(())
    }

    async fn load(&self) -> Result<Option<SiteDraft>, DraftStoreError> {
        self.take_snapshot().map(decode).transpose()
    }

    async fn clear(&self) -> Result<(), DraftStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
