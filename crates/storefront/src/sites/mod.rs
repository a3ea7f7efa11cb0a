//! Sites REST service client and per-slug lookup state.
//!
//! # Architecture
//!
//! - [`SiteSource`] is the seam: anything that can fetch a site by slug
//! - [`SitesClient`] implements it over `GET /sites/slug/{slug}` with `reqwest`,
//!   caching found sites in-process via `moka`
//! - [`SiteLookup`] tracks the lookup for the current slug as an explicit
//!   state (idle, loading, found, not found, error) and drops stale responses
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopifake_storefront::sites::{SiteLookup, SitesClient};
//!
//! let client = SitesClient::new(&config.sites)?;
//! let lookup = SiteLookup::new(Arc::new(client));
//!
//! let state = lookup.set_slug(Some(slug)).await;
//! if let Some(site) = state.site() {
//!     println!("{} is {}", site.name, site.status);
//! }
//! ```

mod client;
pub mod lookup;

pub use client::SitesClient;
pub use lookup::{LookupState, SiteLookup};

use async_trait::async_trait;
use shopifake_core::{Site, Slug};
use thiserror::Error;

/// Errors that can occur when talking to the sites service.
#[derive(Debug, Error)]
pub enum SitesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status other than 404.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not a site record.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured base URL cannot have path segments appended.
    #[error("sites API URL cannot be a base: {0}")]
    InvalidBaseUrl(String),

    /// Configured token is not a valid header value.
    #[error("invalid sites API token: {0}")]
    InvalidToken(String),
}

/// Source of site records keyed by slug.
#[async_trait]
pub trait SiteSource: Send + Sync {
    /// Fetch the site for `slug`.
    ///
    /// Returns `Ok(None)` when the service reports the slug does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unexpected response.
    async fn fetch_by_slug(&self, slug: &Slug) -> Result<Option<Site>, SitesError>;

    /// Check that the source is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reached.
    async fn ping(&self) -> Result<(), SitesError> {
        Ok(())
    }

    /// Forget any cached copy of `slug` so the next fetch hits the service.
    async fn invalidate(&self, _slug: &Slug) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_error_display() {
        let err = SitesError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }
}
