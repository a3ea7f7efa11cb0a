//! Lookup state for the site behind the current slug.
//!
//! Each fetch is stamped with a generation number. When the slug changes
//! while a fetch is in flight, the older response is discarded instead of
//! overwriting the newer state.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use shopifake_core::{Site, Slug};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::SiteSource;

/// Where the lookup for the current slug stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    /// No slug, so nothing was fetched.
    #[default]
    Idle,
    /// A fetch for `slug` is in flight.
    Loading { slug: Slug },
    /// The service returned the site.
    Found(Site),
    /// The service reported the slug does not exist.
    NotFound { slug: Slug },
    /// The fetch failed for another reason.
    Error { slug: Slug, message: String },
}

impl LookupState {
    /// The site, when found.
    #[must_use]
    pub const fn site(&self) -> Option<&Site> {
        match self {
            Self::Found(site) => Some(site),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Whether a fetch has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::Found(_) | Self::NotFound { .. } | Self::Error { .. }
        )
    }
}

struct Current {
    slug: Option<Slug>,
    generation: u64,
}

/// Tracks the site lookup for one slug at a time.
///
/// State changes are published on a `watch` channel; see [`SiteLookup::subscribe`].
pub struct SiteLookup {
    source: Arc<dyn SiteSource>,
    current: Mutex<Current>,
    state: watch::Sender<LookupState>,
}

impl SiteLookup {
    /// Create an idle lookup over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn SiteSource>) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self {
            source,
            current: Mutex::new(Current {
                slug: None,
                generation: 0,
            }),
            state,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    /// The current site, when found.
    #[must_use]
    pub fn site(&self) -> Option<Site> {
        self.state.borrow().site().cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Receive every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Point the lookup at `slug`, fetching when it differs from the current one.
    ///
    /// Returns the state once this call's fetch settles, or the newer state if
    /// the slug changed again in the meantime.
    pub async fn set_slug(&self, slug: Option<Slug>) -> LookupState {
        let unchanged = self.lock().slug == slug;
        if unchanged {
            return self.state();
        }
        self.run(slug, false).await
    }

    /// Like [`SiteLookup::set_slug`], but gives up waiting after `wait`.
    ///
    /// The fetch runs on its own task and keeps going after the wait ends, so
    /// its result still lands in the source's cache and in this lookup's state.
    /// Returns `Loading` when the fetch has not settled in time.
    pub async fn set_slug_within(
        self: &Arc<Self>,
        slug: Option<Slug>,
        wait: Duration,
    ) -> LookupState {
        let task = tokio::spawn({
            let lookup = Arc::clone(self);
            let slug = slug.clone();
            async move { lookup.set_slug(slug).await }
        });

        match tokio::time::timeout(wait, task).await {
            Ok(Ok(state)) => state,
            Ok(Err(e)) => {
                warn!(error = %e, "Site lookup task failed");
                slug.map_or(LookupState::Idle, |slug| LookupState::Error {
                    slug,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                debug!(?wait, "Site lookup still in flight");
                slug.map_or(LookupState::Idle, |slug| LookupState::Loading { slug })
            }
        }
    }

    /// Fetch the current slug again, bypassing any cached copy.
    pub async fn refetch(&self) -> LookupState {
        let slug = self.lock().slug.clone();
        self.run(slug, true).await
    }

    async fn run(&self, slug: Option<Slug>, bypass_cache: bool) -> LookupState {
        let generation = {
            let mut current = self.lock();
            current.generation += 1;
            current.slug.clone_from(&slug);
            let next = slug.as_ref().map_or(LookupState::Idle, |slug| {
                LookupState::Loading { slug: slug.clone() }
            });
            self.state.send_replace(next);
            current.generation
        };

        let Some(slug) = slug else {
            return LookupState::Idle;
        };

        if bypass_cache {
            self.source.invalidate(&slug).await;
        }

        let outcome = match self.source.fetch_by_slug(&slug).await {
            Ok(Some(site)) => LookupState::Found(site),
            Ok(None) => LookupState::NotFound { slug },
            Err(e) => {
                warn!(slug = %slug, error = %e, "Site lookup failed");
                LookupState::Error {
                    slug,
                    message: e.to_string(),
                }
            }
        };

        let current = self.lock();
        if current.generation != generation {
            debug!(
                generation,
                latest = current.generation,
                "Dropping stale site lookup response"
            );
            return self.state();
        }
        self.state.send_replace(outcome.clone());
        outcome
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
