//! Drives [`reduce`] against real lookups and draft stores.

use std::sync::Arc;
use std::time::Duration;

use shopifake_core::Slug;
use tracing::{debug, error};

use super::{AppSession, Effect, Event, Resolution, StoredDraft, reduce};
use crate::drafts::DraftStore;
use crate::sites::SiteLookup;

/// Collect the inputs for [`Event::Resolved`].
///
/// With a subdomain the tenant lookup gets up to `wait` to settle and is
/// reported as loading otherwise. The draft store is only read when there is
/// no subdomain and preview was requested.
pub async fn gather_resolution(
    subdomain: Option<Slug>,
    lookup: &Arc<SiteLookup>,
    wait: Duration,
    preview_requested: bool,
    store: &dyn DraftStore,
) -> Resolution {
    let lookup_state = lookup.set_slug_within(subdomain.clone(), wait).await;

    let stored_draft = if subdomain.is_none() && preview_requested {
        StoredDraft::from(store.load().await)
    } else {
        StoredDraft::Missing
    };

    Resolution {
        subdomain,
        lookup: lookup_state,
        preview_requested,
        stored_draft,
    }
}

/// Apply transition effects to `store`.
///
/// Failures are logged and do not stop the remaining effects.
pub async fn apply_effects(store: &dyn DraftStore, effects: &[Effect]) {
    for effect in effects {
        let result = match effect {
            Effect::SavePreviewDraft(draft) => store.save(draft).await,
            Effect::ClearPreviewDraft => store.clear().await,
        };
        if let Err(e) = result {
            error!(error = %e, ?effect, "Failed to apply draft effect");
        }
    }
}

/// Reduce `event` and apply its effects, returning the next session.
pub async fn dispatch(store: &dyn DraftStore, session: AppSession, event: Event) -> AppSession {
    let transition = reduce(session, event);
    apply_effects(store, &transition.effects).await;
    debug!(mode = transition.session.mode.name(), "Mode transition");
    transition.session
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use shopifake_core::{Site, SiteDraft, SiteId, SiteStatus};

    use super::*;
    use crate::drafts::MemoryDraftStore;
    use crate::mode::{DraftOrigin, Mode, OwnerView};
    use crate::sites::{SiteSource, SitesError};
    use crate::storefront_config::demo_draft;

    struct OneSite;

    #[async_trait]
    impl SiteSource for OneSite {
        async fn fetch_by_slug(&self, slug: &Slug) -> Result<Option<Site>, SitesError> {
            Ok((slug.as_str() == "acme").then(|| Site {
                id: SiteId::new(9),
                name: "Acme".to_string(),
                slug: slug.clone(),
                status: SiteStatus::Active,
                currency: "EUR".to_string(),
                language: "fr".to_string(),
                config: Some(r#"{"heroTitle":"Welcome to Acme"}"#.to_string()),
            }))
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    fn lookup() -> Arc<SiteLookup> {
        Arc::new(SiteLookup::new(Arc::new(OneSite)))
    }

    #[tokio::test]
    async fn test_tenant_resolution_skips_draft_store() {
        let store = MemoryDraftStore::new();
        store.put_raw("{broken");
        let resolution = gather_resolution(
            Some(Slug::parse("acme").unwrap()),
            &lookup(),
            WAIT,
            true,
            &store,
        )
        .await;
        assert!(resolution.lookup.site().is_some());
        assert_eq!(resolution.stored_draft, StoredDraft::Missing);
    }

    #[tokio::test]
    async fn test_tenant_storefront_end_to_end() {
        let store = MemoryDraftStore::new();
        let resolution = gather_resolution(
            Some(Slug::parse("acme").unwrap()),
            &lookup(),
            WAIT,
            false,
            &store,
        )
        .await;
        let session = dispatch(&store, AppSession::default(), Event::Resolved(resolution)).await;
        assert_eq!(
            session.mode.storefront().unwrap().home.hero.title,
            "Welcome to Acme"
        );
    }

    #[tokio::test]
    async fn test_owner_edit_then_preview_in_another_tab() {
        let store = MemoryDraftStore::new();
        let draft = SiteDraft {
            name: "My Shop".to_string(),
            ..demo_draft()
        };

        // Owner tab.
        let owner = dispatch(
            &store,
            AppSession::default(),
            Event::OpenOwner(OwnerView::Dashboard),
        )
        .await;
        let owner = dispatch(&store, owner, Event::EditDraft(draft.clone())).await;
        let owner = dispatch(&store, owner, Event::RequestPreview).await;
        assert_eq!(owner.mode, Mode::Owner(OwnerView::Dashboard));
        assert_eq!(store.load().await.unwrap(), Some(draft));

        // Preview tab, fresh session.
        let resolution = gather_resolution(None, &lookup(), WAIT, true, &store).await;
        let preview = dispatch(&store, AppSession::default(), Event::Resolved(resolution)).await;
        let Mode::Preview(preview) = &preview.mode else {
            panic!("expected preview, got {}", preview.mode.name());
        };
        assert_eq!(preview.origin, DraftOrigin::Stored);
        assert_eq!(preview.storefront.branding.name, "My Shop");
    }

    #[tokio::test]
    async fn test_exit_preview_clears_store() {
        let store = MemoryDraftStore::new();
        store.save(&demo_draft()).await.unwrap();
        let session = dispatch(&store, AppSession::default(), Event::ExitPreview).await;
        assert_eq!(session.mode, Mode::Landing);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_stored_draft_previews_demo() {
        let store = MemoryDraftStore::new();
        store.put_raw("not json");
        let resolution = gather_resolution(None, &lookup(), WAIT, true, &store).await;
        assert!(matches!(resolution.stored_draft, StoredDraft::Unreadable(_)));
        let session = dispatch(&store, AppSession::default(), Event::Resolved(resolution)).await;
        let Mode::Preview(preview) = &session.mode else {
            panic!("expected preview");
        };
        assert_eq!(preview.origin, DraftOrigin::Demo);
    }
}
