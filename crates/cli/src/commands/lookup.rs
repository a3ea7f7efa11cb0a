//! Live lookup against the sites service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use shopifake_core::Slug;
use shopifake_storefront::config::SitesApiConfig;
use shopifake_storefront::mode::{AppSession, Event, Resolution, reduce};
use shopifake_storefront::sites::{LookupState, SiteLookup, SitesClient};
use tracing::info;
use url::Url;

/// Fetch `slug` and report the lookup state and the mode it leads to.
///
/// # Errors
///
/// Returns an error if the slug is invalid or the sites service settings are
/// missing. A failed fetch is reported in the output, not as an error.
pub async fn run(slug: &str, api_url: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let slug = Slug::parse(slug)?;
    let config = match api_url {
        Some(url) => SitesApiConfig {
            url: Url::parse(url)?,
            token: None,
            cache_ttl: Duration::ZERO,
        },
        None => SitesApiConfig {
            cache_ttl: Duration::ZERO,
            ..SitesApiConfig::from_env()?
        },
    };

    info!(slug = %slug, api = %config.url, "Looking up site");
    let lookup = SiteLookup::new(Arc::new(SitesClient::new(&config)?));
    let state = lookup.set_slug(Some(slug.clone())).await;

    Ok(report(slug, state))
}

fn report(slug: Slug, state: LookupState) -> Value {
    let (outcome, detail) = match &state {
        LookupState::Idle => ("idle", Value::Null),
        LookupState::Loading { .. } => ("loading", Value::Null),
        LookupState::Found(site) => (
            "found",
            json!({ "id": site.id, "name": site.name, "status": site.status }),
        ),
        LookupState::NotFound { .. } => ("not_found", Value::Null),
        LookupState::Error { message, .. } => ("error", json!(message)),
    };

    let transition = reduce(
        AppSession::default(),
        Event::Resolved(Resolution {
            subdomain: Some(slug.clone()),
            lookup: state,
            ..Resolution::default()
        }),
    );

    json!({
        "slug": slug.as_str(),
        "lookup": outcome,
        "detail": detail,
        "mode": transition.session.mode.name(),
    })
}
