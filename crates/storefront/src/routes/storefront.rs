//! Storefront page handlers.
//!
//! Every page runs the resolution pipeline first. Live storefronts and
//! previews render the same templates; previews add a banner and keep
//! `?preview=1` on their links.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::{PreviewQuery, resolve};
use crate::error::Result;
use crate::filters;
use crate::mode::{AppSession, DraftOrigin, Mode, PreviewStorefront, TenantStorefront};
use crate::state::AppState;
use crate::storefront_config::StorefrontConfig;
use crate::tenant::TenantHost;

/// Main menu shown on the base domain.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub base_domain: String,
    /// Subdomain that was asked for but has no live storefront.
    pub unavailable: Option<String>,
}

/// Shown while a tenant lookup is still running.
#[derive(Template, WebTemplate)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub slug: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "storefront/home.html")]
pub struct HomeTemplate {
    pub sf: StorefrontConfig,
    /// Set in preview mode to describe where the draft came from.
    pub preview: Option<&'static str>,
    pub query: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "storefront/categories.html")]
pub struct CategoriesTemplate {
    pub sf: StorefrontConfig,
    pub preview: Option<&'static str>,
    pub query: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "storefront/about.html")]
pub struct AboutTemplate {
    pub sf: StorefrontConfig,
    pub preview: Option<&'static str>,
    pub query: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Categories,
    About,
}

const fn origin_label(origin: DraftOrigin) -> &'static str {
    match origin {
        DraftOrigin::Stored => "your saved draft",
        DraftOrigin::InMemory => "your unsaved draft",
        DraftOrigin::Demo => "the demo store",
    }
}

fn render(state: &AppState, app: AppSession, page: Page, requested: Option<String>) -> Response {
    if let Some(slug) = app.loading {
        return LoadingTemplate {
            slug: slug.into_inner(),
        }
        .into_response();
    }

    let (sf, preview) = match app.mode {
        Mode::Storefront(tenant) => {
            let TenantStorefront { storefront, .. } = *tenant;
            (storefront, None)
        }
        Mode::Preview(preview) => {
            let PreviewStorefront {
                storefront, origin, ..
            } = *preview;
            (storefront, Some(origin_label(origin)))
        }
        Mode::Landing | Mode::Owner(_) => {
            return match page {
                Page::Home => LandingTemplate {
                    base_domain: state.config().base_domain.clone(),
                    unavailable: requested,
                }
                .into_response(),
                Page::Categories | Page::About => Redirect::to("/").into_response(),
            };
        }
    };

    let query = if preview.is_some() { "?preview=1" } else { "" };
    match page {
        Page::Home => HomeTemplate { sf, preview, query }.into_response(),
        Page::Categories => CategoriesTemplate { sf, preview, query }.into_response(),
        Page::About => AboutTemplate { sf, preview, query }.into_response(),
    }
}

async fn page(
    state: &AppState,
    tenant: TenantHost,
    query: &PreviewQuery,
    session: &Session,
    page: Page,
) -> Result<Response> {
    let requested = tenant.subdomain.as_ref().map(ToString::to_string);
    let app = resolve(state, tenant, query, session).await?;
    tracing::debug!(mode = app.mode.name(), ?page, "Rendering page");
    Ok(render(state, app, page, requested))
}

/// Display the resolved home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    tenant: TenantHost,
    Query(query): Query<PreviewQuery>,
    session: Session,
) -> Result<Response> {
    page(&state, tenant, &query, &session, Page::Home).await
}

/// Display the categories page.
#[instrument(skip_all)]
pub async fn categories(
    State(state): State<AppState>,
    tenant: TenantHost,
    Query(query): Query<PreviewQuery>,
    session: Session,
) -> Result<Response> {
    page(&state, tenant, &query, &session, Page::Categories).await
}

/// Display the about page.
#[instrument(skip_all)]
pub async fn about(
    State(state): State<AppState>,
    tenant: TenantHost,
    Query(query): Query<PreviewQuery>,
    session: Session,
) -> Result<Response> {
    page(&state, tenant, &query, &session, Page::About).await
}
