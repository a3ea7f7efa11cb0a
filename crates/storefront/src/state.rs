//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sites::{SiteLookup, SiteSource, SitesClient, SitesError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the site source.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    sites: Arc<dyn SiteSource>,
}

impl AppState {
    /// Create application state backed by the sites REST service.
    ///
    /// # Errors
    ///
    /// Returns an error if the sites client cannot be built from `config`.
    pub fn new(config: ServerConfig) -> Result<Self, SitesError> {
        let client = SitesClient::new(&config.sites)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create application state over any site source.
    #[must_use]
    pub fn with_source(config: ServerConfig, sites: Arc<dyn SiteSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, sites }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the site source.
    #[must_use]
    pub fn sites(&self) -> &Arc<dyn SiteSource> {
        &self.inner.sites
    }

    /// A fresh lookup over the shared site source.
    #[must_use]
    pub fn lookup(&self) -> Arc<SiteLookup> {
        Arc::new(SiteLookup::new(Arc::clone(&self.inner.sites)))
    }
}
