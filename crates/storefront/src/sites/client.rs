//! HTTP client for the sites REST service.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use shopifake_core::{Site, Slug};
use tracing::{debug, instrument};
use url::Url;

use super::{SiteSource, SitesError};
use crate::config::SitesApiConfig;

/// Maximum number of sites kept in the lookup cache.
const CACHE_CAPACITY: u64 = 10_000;

/// Client for the sites REST service.
///
/// Cheap to clone. Found sites are cached for the configured TTL; 404s and
/// failures are never cached.
#[derive(Clone)]
pub struct SitesClient {
    inner: Arc<SitesClientInner>,
}

struct SitesClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Option<Cache<Slug, Site>>,
}

impl SitesClient {
    /// Create a new sites API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &SitesApiConfig) -> Result<Self, SitesError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = config.bearer_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| SitesError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(SitesClientInner {
                client,
                base_url: config.url.clone(),
                cache,
            }),
        })
    }

    /// `{base}/sites/slug/{slug}`, tolerating a trailing slash on the base.
    fn site_url(&self, slug: &Slug) -> Result<Url, SitesError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SitesError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(["sites", "slug", slug.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl SiteSource for SitesClient {
    #[instrument(skip(self), fields(slug = %slug))]
    async fn fetch_by_slug(&self, slug: &Slug) -> Result<Option<Site>, SitesError> {
        if let Some(cache) = &self.inner.cache
            && let Some(site) = cache.get(slug).await
        {
            debug!("Site cache hit");
            return Ok(Some(site));
        }

        let url = self.site_url(slug)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("Site not found");
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SitesError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let site: Site = serde_json::from_str(&body)?;
        debug!(status = %site.status, "Site fetched");

        if let Some(cache) = &self.inner.cache {
            cache.insert(slug.clone(), site.clone()).await;
        }

        Ok(Some(site))
    }

    async fn ping(&self) -> Result<(), SitesError> {
        self.inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await?;
        Ok(())
    }

    async fn invalidate(&self, slug: &Slug) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate(slug).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client_for(base: &str) -> SitesClient {
        SitesClient::new(&SitesApiConfig {
            url: Url::parse(base).unwrap(),
            token: None,
            cache_ttl: Duration::ZERO,
        })
        .unwrap()
    }

    #[test]
    fn test_site_url_appends_segments() {
        let slug = Slug::parse("acme").unwrap();
        let url = client_for("http://api.internal:8080").site_url(&slug).unwrap();
        assert_eq!(url.as_str(), "http://api.internal:8080/sites/slug/acme");
    }

    #[test]
    fn test_site_url_respects_base_path() {
        let slug = Slug::parse("acme").unwrap();
        let url = client_for("http://gateway/api/v1/").site_url(&slug).unwrap();
        assert_eq!(url.as_str(), "http://gateway/api/v1/sites/slug/acme");
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        assert!(client_for("http://localhost").inner.cache.is_none());
    }
}
