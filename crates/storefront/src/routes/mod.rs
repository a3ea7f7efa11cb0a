//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Resolved home page (landing, storefront, or preview)
//! GET  /categories       - Categories page
//! GET  /about            - About page
//!
//! # Owner
//! GET  /owner/login      - Login view
//! GET  /owner/signup     - Signup view
//! GET  /owner/dashboard  - Draft editor
//! POST /owner/draft      - Update the in-flight draft
//! POST /owner/preview    - Save the draft for preview, redirect to /?preview=1
//! POST /owner/logout     - Drop drafts, back to landing
//!
//! # Navigation
//! POST /menu             - Back to the main menu
//! POST /preview/exit     - Leave the preview
//! ```

pub mod navigation;
pub mod owner;
pub mod storefront;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;
use shopifake_core::SiteDraft;
use tower_sessions::Session;

use crate::drafts::SessionDraftStore;
use crate::error::Result;
use crate::mode::{AppSession, Event, dispatch, gather_resolution};
use crate::state::AppState;
use crate::tenant::TenantHost;

/// Session key for the owner's in-flight draft.
pub const OWNER_DRAFT_KEY: &str = "shopifake.ownerDraft";

/// Query flag that asks for the preview.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub preview: Option<String>,
}

impl PreviewQuery {
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.preview.as_deref() == Some("1")
    }
}

/// Rebuild the visitor's session from the cookie-backed store.
async fn load_app_session(session: &Session) -> Result<AppSession> {
    let draft: Option<SiteDraft> = session.get(OWNER_DRAFT_KEY).await?;
    Ok(AppSession::with_draft(draft))
}

/// Persist the parts of `app` that outlive a request.
async fn save_app_session(session: &Session, app: &AppSession) -> Result<()> {
    match &app.draft {
        Some(draft) => session.insert(OWNER_DRAFT_KEY, draft).await?,
        None => {
            session.remove::<SiteDraft>(OWNER_DRAFT_KEY).await?;
        }
    }
    Ok(())
}

/// Apply `event` to the visitor's session and persist the result.
async fn handle(session: &Session, event: Event) -> Result<AppSession> {
    let store = SessionDraftStore::new(session.clone());
    let app = load_app_session(session).await?;
    let app = dispatch(&store, app, event).await;
    save_app_session(session, &app).await?;
    Ok(app)
}

/// Run the resolution pipeline for this request.
async fn resolve(
    state: &AppState,
    tenant: TenantHost,
    query: &PreviewQuery,
    session: &Session,
) -> Result<AppSession> {
    let store = SessionDraftStore::new(session.clone());
    let resolution = gather_resolution(
        tenant.subdomain,
        &state.lookup(),
        state.config().lookup_wait,
        query.is_requested(),
        &store,
    )
    .await;
    handle(session, Event::Resolved(resolution)).await
}

/// Create the owner routes router.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(owner::login))
        .route("/signup", get(owner::signup))
        .route("/dashboard", get(owner::dashboard))
        .route("/draft", post(owner::update_draft))
        .route("/preview", post(owner::preview))
        .route("/logout", post(owner::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(storefront::home))
        .route("/categories", get(storefront::categories))
        .route("/about", get(storefront::about))
        .nest("/owner", owner_routes())
        .route("/menu", post(navigation::main_menu))
        .route("/preview/exit", post(navigation::exit_preview))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_flag_must_be_one() {
        let query = |v: Option<&str>| PreviewQuery {
            preview: v.map(str::to_owned),
        };
        assert!(query(Some("1")).is_requested());
        assert!(!query(Some("true")).is_requested());
        assert!(!query(Some("")).is_requested());
        assert!(!query(None).is_requested());
    }
}
