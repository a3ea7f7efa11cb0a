//! Integration test harness for the Shopifake storefront.
//!
//! Each [`TestContext`] starts two servers on ephemeral ports: a fake sites
//! REST service and the real storefront router pointed at it. Tests talk to
//! the storefront over HTTP with a cookie-carrying client and pick the tenant
//! by setting the `Host` header.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopifake-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::header::HOST;
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use shopifake_storefront::config::{ServerConfig, SitesApiConfig};
use shopifake_storefront::state::AppState;
use url::Url;

/// Base domain every test context serves tenants under.
pub const BASE_DOMAIN: &str = "shopifake.com";

/// Slug the fake sites service always fails for.
pub const BROKEN_SLUG: &str = "broken";

/// Slug the fake sites service answers only after [`SLOW_DELAY`].
pub const SLOW_SLUG: &str = "slow";

/// How long the fake sites service takes to answer for [`SLOW_SLUG`].
pub const SLOW_DELAY: Duration = Duration::from_millis(300);

#[derive(Default)]
struct FakeSites {
    records: Mutex<HashMap<String, Value>>,
    hits: AtomicUsize,
}

async fn site_by_slug(State(fake): State<Arc<FakeSites>>, Path(slug): Path<String>) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    if slug == BROKEN_SLUG {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    if slug == SLOW_SLUG {
        tokio::time::sleep(SLOW_DELAY).await;
    }
    let record = fake
        .records
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&slug)
        .cloned();
    match record {
        Some(site) => Json(site).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "site not found" }))).into_response(),
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A storefront and its fake sites service.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    fake: Arc<FakeSites>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_lookup_wait(Duration::from_secs(5)).await
    }

    /// A context whose pages wait at most `lookup_wait` for tenant lookups.
    pub async fn with_lookup_wait(lookup_wait: Duration) -> Self {
        let fake = Arc::new(FakeSites::default());
        let sites_router = Router::new()
            .route("/", get(|| async { "sites" }))
            .route("/sites/slug/{slug}", get(site_by_slug))
            .with_state(Arc::clone(&fake));
        let sites_addr = serve(sites_router).await;

        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            public_url: "http://localhost".to_string(),
            base_domain: BASE_DOMAIN.to_string(),
            sites: SitesApiConfig {
                url: Url::parse(&format!("http://{sites_addr}")).unwrap(),
                token: None,
                cache_ttl: Duration::ZERO,
            },
            lookup_wait,
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).unwrap();
        let storefront_addr = serve(shopifake_storefront::app(state)).await;

        Self {
            client: Self::new_client(),
            storefront_url: format!("http://{storefront_addr}"),
            fake,
        }
    }

    /// A client with its own cookie jar that does not follow redirects.
    #[must_use]
    pub fn new_client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    /// Register a site record exactly as the sites service would return it.
    pub fn add_site(&self, slug: &str, status: &str, config: Option<&str>) {
        let record = json!({
            "id": 1,
            "name": format!("{} Inc", slug.to_uppercase()),
            "slug": slug,
            "status": status,
            "currency": "EUR",
            "language": "en",
            "config": config,
            "ownerId": 99,
        });
        self.fake
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slug.to_string(), record);
    }

    /// Number of lookups the sites service has answered.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.fake.hits.load(Ordering::SeqCst)
    }

    /// `GET path` as seen from `host`.
    #[must_use]
    pub fn get(&self, client: &Client, host: &str, path: &str) -> RequestBuilder {
        client
            .get(format!("{}{path}", self.storefront_url))
            .header(HOST, host)
    }

    /// `POST path` as seen from `host`.
    #[must_use]
    pub fn post(&self, client: &Client, host: &str, path: &str) -> RequestBuilder {
        client
            .post(format!("{}{path}", self.storefront_url))
            .header(HOST, host)
    }

    /// Body of `GET path` from `host` with the shared client, asserting 200.
    pub async fn page(&self, host: &str, path: &str) -> String {
        let resp = self.get(&self.client, host, path).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "GET {host}{path}");
        resp.text().await.unwrap()
    }
}
