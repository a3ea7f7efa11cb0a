//! What the app presents: landing, owner views, a tenant storefront, or a preview.
//!
//! The controller is an explicit state machine. [`reduce`] takes the current
//! [`AppSession`] and an [`Event`] and returns the next session together with
//! the side effects the caller must apply to the draft store. It performs no
//! I/O itself.
//!
//! # Resolution order
//!
//! For [`Event::Resolved`]:
//!
//! 1. tenant subdomain, lookup loading: show loading, keep the mode
//! 2. tenant site found but not active: landing
//! 3. tenant site found and active: parse config; storefront, or landing if it does not parse
//! 4. tenant site not found or lookup failed: landing
//! 5. no subdomain and `preview=1`: preview of the stored, in-memory, or demo draft
//! 6. otherwise landing

mod controller;

pub use controller::{apply_effects, dispatch, gather_resolution};

use shopifake_core::{Site, SiteConfig, SiteDraft, Slug};
use tracing::{debug, warn};

use crate::drafts::DraftStoreError;
use crate::sites::LookupState;
use crate::storefront_config::{StorefrontConfig, demo_draft};

/// Owner-facing sub-views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerView {
    Login,
    Signup,
    Dashboard,
}

/// A live tenant storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantStorefront {
    pub site: Site,
    pub storefront: StorefrontConfig,
}

/// Where a previewed draft came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOrigin {
    /// The draft store.
    Stored,
    /// The session's in-flight draft.
    InMemory,
    /// The built-in demo draft.
    Demo,
}

/// A draft rendered as if it were a live storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewStorefront {
    pub draft: SiteDraft,
    pub origin: DraftOrigin,
    pub storefront: StorefrontConfig,
}

/// Presentation mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Landing,
    Owner(OwnerView),
    Storefront(Box<TenantStorefront>),
    Preview(Box<PreviewStorefront>),
}

impl Mode {
    /// The storefront to render, for both live sites and previews.
    #[must_use]
    pub fn storefront(&self) -> Option<&StorefrontConfig> {
        match self {
            Self::Storefront(tenant) => Some(&tenant.storefront),
            Self::Preview(preview) => Some(&preview.storefront),
            Self::Landing | Self::Owner(_) => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Owner(OwnerView::Login) => "owner.login",
            Self::Owner(OwnerView::Signup) => "owner.signup",
            Self::Owner(OwnerView::Dashboard) => "owner.dashboard",
            Self::Storefront(_) => "storefront",
            Self::Preview(_) => "preview",
        }
    }
}

/// Per-visitor state threaded through the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppSession {
    pub mode: Mode,
    /// Set while the tenant lookup for this slug is in flight.
    pub loading: Option<Slug>,
    /// The owner's in-flight draft, not yet saved for preview.
    pub draft: Option<SiteDraft>,
}

impl AppSession {
    /// A fresh session on the landing page carrying `draft`.
    #[must_use]
    pub fn with_draft(draft: Option<SiteDraft>) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading.is_some()
    }
}

/// What the draft store held when preview was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoredDraft {
    #[default]
    Missing,
    Found(SiteDraft),
    /// The stored value could not be read; the reason is kept for logging.
    Unreadable(String),
}

impl From<Result<Option<SiteDraft>, DraftStoreError>> for StoredDraft {
    fn from(result: Result<Option<SiteDraft>, DraftStoreError>) -> Self {
        match result {
            Ok(Some(draft)) => Self::Found(draft),
            Ok(None) => Self::Missing,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }
}

/// Inputs gathered for one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub subdomain: Option<Slug>,
    pub lookup: LookupState,
    /// The request carried `preview=1`.
    pub preview_requested: bool,
    /// Only consulted when there is no subdomain and preview was requested.
    pub stored_draft: StoredDraft,
}

/// Something that happens to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Resolver and lookup produced new inputs.
    Resolved(Resolution),
    /// The owner navigated to an owner view.
    OpenOwner(OwnerView),
    /// The owner edited their draft.
    EditDraft(SiteDraft),
    /// The owner asked to preview their draft in a new tab.
    RequestPreview,
    /// Back to the main menu.
    ReturnToLanding,
    /// The owner logged out.
    Logout,
    /// The visitor left the preview.
    ExitPreview,
}

/// A side effect the caller applies after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SavePreviewDraft(SiteDraft),
    ClearPreviewDraft,
}

/// The outcome of [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: AppSession,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(session: AppSession) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Compute the next session for `event`.
#[must_use]
pub fn reduce(session: AppSession, event: Event) -> Transition {
    let AppSession { mode, draft, .. } = session;

    match event {
        Event::Resolved(resolution) => resolve(mode, draft, resolution),
        Event::OpenOwner(view) => Transition::to(AppSession {
            mode: Mode::Owner(view),
            loading: None,
            draft,
        }),
        Event::EditDraft(edited) => Transition::to(AppSession {
            mode: Mode::Owner(OwnerView::Dashboard),
            loading: None,
            draft: Some(edited),
        }),
        Event::RequestPreview => {
            let to_preview = draft.clone().unwrap_or_else(demo_draft);
            Transition::to(AppSession {
                mode,
                loading: None,
                draft,
            })
            .with(Effect::SavePreviewDraft(to_preview))
        }
        Event::ReturnToLanding | Event::ExitPreview => Transition::to(AppSession {
            mode: Mode::Landing,
            loading: None,
            draft,
        })
        .with(Effect::ClearPreviewDraft),
        Event::Logout => Transition::to(AppSession::default()).with(Effect::ClearPreviewDraft),
    }
}

fn resolve(mode: Mode, draft: Option<SiteDraft>, resolution: Resolution) -> Transition {
    let landing = |draft: Option<SiteDraft>| {
        Transition::to(AppSession {
            mode: Mode::Landing,
            loading: None,
            draft,
        })
    };

    let Resolution {
        subdomain,
        lookup,
        preview_requested,
        stored_draft,
    } = resolution;

    if let Some(slug) = subdomain {
        return match lookup {
            LookupState::Idle | LookupState::Loading { .. } => Transition::to(AppSession {
                mode,
                loading: Some(slug),
                draft,
            }),
            LookupState::Found(site) if !site.status.is_public() => {
                debug!(slug = %slug, status = %site.status, "Site is not active");
                landing(draft)
            }
            LookupState::Found(site) => match SiteConfig::parse(site.config_text()) {
                Ok(config) => {
                    let storefront =
                        StorefrontConfig::from_site_config(&config, Some(site.name.as_str()));
                    Transition::to(AppSession {
                        mode: Mode::Storefront(Box::new(TenantStorefront { site, storefront })),
                        loading: None,
                        draft,
                    })
                }
                Err(e) => {
                    let raw: String = e.raw().chars().take(200).collect();
                    warn!(
                        slug = %slug,
                        error = %e,
                        raw = %raw,
                        "Site config does not parse, showing landing"
                    );
                    landing(draft)
                }
            },
            LookupState::NotFound { .. } | LookupState::Error { .. } => {
                debug!(slug = %slug, "No storefront for subdomain");
                landing(draft)
            }
        };
    }

    if !preview_requested {
        return landing(draft);
    }

    let (previewed, origin) = match stored_draft {
        StoredDraft::Found(stored) => (stored, DraftOrigin::Stored),
        StoredDraft::Missing => draft
            .clone()
            .map_or_else(|| (demo_draft(), DraftOrigin::Demo), |d| (d, DraftOrigin::InMemory)),
        StoredDraft::Unreadable(reason) => {
            warn!(reason = %reason, "Preview draft unreadable, showing demo draft");
            (demo_draft(), DraftOrigin::Demo)
        }
    };

    let storefront = StorefrontConfig::from_draft(&previewed, None);
    Transition::to(AppSession {
        mode: Mode::Preview(Box::new(PreviewStorefront {
            draft: previewed,
            origin,
            storefront,
        })),
        loading: None,
        draft,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopifake_core::{SiteId, SiteStatus};

    use super::*;
    use crate::storefront_config::mock_storefront_config;

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    fn site(status: SiteStatus, config: &str) -> Site {
        Site {
            id: SiteId::new(1),
            name: "Acme Corp".to_string(),
            slug: slug("acme"),
            status,
            currency: "USD".to_string(),
            language: "en".to_string(),
            config: Some(config.to_string()),
        }
    }

    fn tenant(lookup: LookupState) -> Event {
        Event::Resolved(Resolution {
            subdomain: Some(slug("acme")),
            lookup,
            ..Resolution::default()
        })
    }

    fn preview(stored_draft: StoredDraft) -> Event {
        Event::Resolved(Resolution {
            preview_requested: true,
            stored_draft,
            ..Resolution::default()
        })
    }

    fn preview_of(mode: &Mode) -> &PreviewStorefront {
        match mode {
            Mode::Preview(preview) => preview,
            other => panic!("expected preview, got {}", other.name()),
        }
    }

    #[test]
    fn test_initial_mode_is_landing() {
        assert_eq!(AppSession::default().mode, Mode::Landing);
    }

    #[test]
    fn test_loading_keeps_mode() {
        let start = AppSession {
            mode: Mode::Owner(OwnerView::Login),
            ..AppSession::default()
        };
        let next = reduce(start, tenant(LookupState::Loading { slug: slug("acme") }));
        assert_eq!(next.session.mode, Mode::Owner(OwnerView::Login));
        assert_eq!(next.session.loading, Some(slug("acme")));
        assert!(next.effects.is_empty());
    }

    #[test]
    fn test_inactive_site_lands() {
        for status in [SiteStatus::Draft, SiteStatus::Disabled] {
            let next = reduce(
                AppSession::default(),
                tenant(LookupState::Found(site(status, "{}"))),
            );
            assert_eq!(next.session.mode, Mode::Landing);
            assert!(!next.session.is_loading());
        }
    }

    #[test]
    fn test_active_site_renders_storefront() {
        let next = reduce(
            AppSession::default(),
            tenant(LookupState::Found(site(SiteStatus::Active, r#"{"name":"Acme"}"#))),
        );
        let Mode::Storefront(tenant) = &next.session.mode else {
            panic!("expected storefront, got {}", next.session.mode.name());
        };
        assert_eq!(tenant.storefront.branding.name, "Acme");
        assert_eq!(tenant.storefront.home, mock_storefront_config().home);
        assert_eq!(tenant.site.slug.as_str(), "acme");
    }

    #[test]
    fn test_site_name_used_when_config_has_none() {
        let next = reduce(
            AppSession::default(),
            tenant(LookupState::Found(site(SiteStatus::Active, "{}"))),
        );
        assert_eq!(
            next.session.mode.storefront().unwrap().branding.name,
            "Acme Corp"
        );
    }

    #[test]
    fn test_malformed_config_lands() {
        let next = reduce(
            AppSession::default(),
            tenant(LookupState::Found(site(SiteStatus::Active, "{oops"))),
        );
        assert_eq!(next.session.mode, Mode::Landing);
    }

    #[test]
    fn test_not_found_and_error_both_land() {
        for lookup in [
            LookupState::NotFound { slug: slug("acme") },
            LookupState::Error {
                slug: slug("acme"),
                message: "timeout".to_string(),
            },
        ] {
            let next = reduce(AppSession::default(), tenant(lookup));
            assert_eq!(next.session.mode, Mode::Landing);
        }
    }

    #[test]
    fn test_subdomain_wins_over_preview_flag() {
        let event = Event::Resolved(Resolution {
            subdomain: Some(slug("acme")),
            lookup: LookupState::NotFound { slug: slug("acme") },
            preview_requested: true,
            stored_draft: StoredDraft::Found(demo_draft()),
        });
        assert_eq!(reduce(AppSession::default(), event).session.mode, Mode::Landing);
    }

    #[test]
    fn test_preview_uses_stored_draft() {
        let stored = SiteDraft {
            hero_title: "Stored title".to_string(),
            ..SiteDraft::default()
        };
        let next = reduce(AppSession::default(), preview(StoredDraft::Found(stored)));
        let preview = preview_of(&next.session.mode);
        assert_eq!(preview.origin, DraftOrigin::Stored);
        assert_eq!(preview.storefront.home.hero.title, "Stored title");
        assert_eq!(
            preview.storefront.branding.name,
            mock_storefront_config().branding.name
        );
    }

    #[test]
    fn test_preview_falls_back_to_in_memory_draft() {
        let in_memory = SiteDraft {
            name: "Work in progress".to_string(),
            ..SiteDraft::default()
        };
        let start = AppSession::with_draft(Some(in_memory));
        let next = reduce(start, preview(StoredDraft::Missing));
        let preview = preview_of(&next.session.mode);
        assert_eq!(preview.origin, DraftOrigin::InMemory);
        assert_eq!(preview.storefront.branding.name, "Work in progress");
    }

    #[test]
    fn test_preview_falls_back_to_demo_draft() {
        let next = reduce(AppSession::default(), preview(StoredDraft::Missing));
        let preview = preview_of(&next.session.mode);
        assert_eq!(preview.origin, DraftOrigin::Demo);
        assert_eq!(preview.draft, demo_draft());
    }

    #[test]
    fn test_unreadable_draft_previews_demo() {
        let start = AppSession::with_draft(Some(SiteDraft::default()));
        let next = reduce(start, preview(StoredDraft::Unreadable("bad json".to_string())));
        assert_eq!(preview_of(&next.session.mode).origin, DraftOrigin::Demo);
    }

    #[test]
    fn test_no_subdomain_no_preview_lands() {
        let start = AppSession {
            mode: Mode::Owner(OwnerView::Dashboard),
            ..AppSession::default()
        };
        let next = reduce(start, Event::Resolved(Resolution::default()));
        assert_eq!(next.session.mode, Mode::Landing);
    }

    #[test]
    fn test_owner_navigation() {
        let next = reduce(AppSession::default(), Event::OpenOwner(OwnerView::Signup));
        assert_eq!(next.session.mode, Mode::Owner(OwnerView::Signup));
        assert!(next.effects.is_empty());
    }

    #[test]
    fn test_edit_draft_keeps_it_in_memory() {
        let draft = demo_draft();
        let next = reduce(AppSession::default(), Event::EditDraft(draft.clone()));
        assert_eq!(next.session.draft, Some(draft));
        assert_eq!(next.session.mode, Mode::Owner(OwnerView::Dashboard));
    }

    #[test]
    fn test_request_preview_saves_in_memory_draft() {
        let draft = SiteDraft {
            name: "Mine".to_string(),
            ..SiteDraft::default()
        };
        let start = AppSession {
            mode: Mode::Owner(OwnerView::Dashboard),
            loading: None,
            draft: Some(draft.clone()),
        };
        let next = reduce(start, Event::RequestPreview);
        assert_eq!(next.effects, vec![Effect::SavePreviewDraft(draft)]);
        assert_eq!(next.session.mode, Mode::Owner(OwnerView::Dashboard));
    }

    #[test]
    fn test_leaving_clears_preview_draft() {
        for event in [Event::ReturnToLanding, Event::ExitPreview, Event::Logout] {
            let start = AppSession {
                mode: Mode::Owner(OwnerView::Dashboard),
                loading: None,
                draft: Some(demo_draft()),
            };
            let next = reduce(start, event);
            assert_eq!(next.session.mode, Mode::Landing);
            assert_eq!(next.effects, vec![Effect::ClearPreviewDraft]);
        }
    }

    #[test]
    fn test_logout_drops_in_memory_draft() {
        let start = AppSession::with_draft(Some(demo_draft()));
        assert!(reduce(start, Event::Logout).session.draft.is_none());
    }

    #[test]
    fn test_every_mode_can_return_to_landing() {
        let modes = [
            Mode::Landing,
            Mode::Owner(OwnerView::Login),
            reduce(
                AppSession::default(),
                tenant(LookupState::Found(site(SiteStatus::Active, "{}"))),
            )
            .session
            .mode,
            reduce(AppSession::default(), preview(StoredDraft::Missing))
                .session
                .mode,
        ];
        for mode in modes {
            let start = AppSession {
                mode,
                ..AppSession::default()
            };
            assert_eq!(
                reduce(start, Event::ReturnToLanding).session.mode,
                Mode::Landing
            );
        }
    }
}
