//! Subdomain-based tenant resolution.
//!
//! A tenant's storefront lives on `<slug>.<base domain>`. The bare base
//! domain and local development hosts serve the main site.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::header::HOST, http::request::Parts};
use shopifake_core::Slug;

use crate::state::AppState;

/// Hosts that never carry a tenant, regardless of the base domain.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1"];

/// Extract the tenant slug from `hostname`, if it names one under `base_domain`.
///
/// Ports are ignored and matching is case-insensitive. The subdomain must
/// sit on a label boundary, so `evilshopifake.com` is not a tenant of
/// `shopifake.com`.
///
/// ```
/// use shopifake_storefront::tenant::resolve_subdomain;
///
/// let slug = resolve_subdomain("acme.shopifake.com:443", "shopifake.com");
/// assert_eq!(slug.unwrap().as_str(), "acme");
/// assert!(resolve_subdomain("shopifake.com", "shopifake.com").is_none());
/// assert!(resolve_subdomain("localhost:3000", "shopifake.com").is_none());
/// ```
#[must_use]
pub fn resolve_subdomain(hostname: &str, base_domain: &str) -> Option<Slug> {
    let host = strip_port(hostname.trim())
        .trim_end_matches('.')
        .to_ascii_lowercase();
    if LOCAL_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let base = base_domain.trim().trim_matches('.').to_ascii_lowercase();
    if base.is_empty() || host == base {
        return None;
    }

    let subdomain = host.strip_suffix(base.as_str())?.strip_suffix('.')?;
    if subdomain.is_empty() || subdomain == base {
        return None;
    }

    Slug::parse(subdomain).ok()
}

/// Remove a `:port` suffix, unwrapping bracketed IPv6 literals.
fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split_once(']').map_or(rest, |(addr, _)| addr);
    }
    match host.split_once(':') {
        // More than one colon without brackets is a bare IPv6 address
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}

/// The request's host and the tenant it resolves to.
///
/// Reads the `Host` header (or the URI authority for HTTP/2) once per request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(tenant: TenantHost) -> impl IntoResponse {
///     match tenant.subdomain {
///         Some(slug) => format!("storefront for {slug}"),
///         None => "main site".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TenantHost {
    pub hostname: String,
    pub subdomain: Option<Slug>,
}

impl FromRequestParts<AppState> for TenantHost {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let hostname = parts
            .headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| parts.uri.host())
            .unwrap_or_default()
            .to_owned();

        let subdomain = resolve_subdomain(&hostname, &state.config().base_domain);
        tracing::Span::current().record("tenant", subdomain.as_ref().map(Slug::as_str));

        Ok(Self {
            hostname,
            subdomain,
        })
    }
}
