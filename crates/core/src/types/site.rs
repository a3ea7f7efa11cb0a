//! Tenant site record.

use serde::{Deserialize, Serialize};

use super::{SiteId, SiteStatus, Slug};

/// A tenant's persisted site, as returned by the sites API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub status: SiteStatus,
    /// ISO 4217 currency code (e.g. `EUR`).
    #[serde(default)]
    pub currency: String,
    /// Language tag (e.g. `fr`).
    #[serde(default)]
    pub language: String,
    /// JSON-encoded [`SiteConfig`](super::SiteConfig).
    #[serde(default)]
    pub config: Option<String>,
}

impl Site {
    /// The raw config text, with a missing config read as an empty object.
    #[must_use]
    pub fn config_text(&self) -> &str {
        self.config.as_deref().unwrap_or("{}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": 42,
            "name": "Acme",
            "slug": "acme",
            "status": "ACTIVE",
            "currency": "EUR",
            "language": "fr",
            "config": "{\"heroTitle\":\"Hello\"}",
            "ownerId": 7
        }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.id, SiteId::new(42));
        assert_eq!(site.slug.as_str(), "acme");
        assert_eq!(site.status, SiteStatus::Active);
        assert_eq!(site.config_text(), r#"{"heroTitle":"Hello"}"#);
    }

    #[test]
    fn test_missing_config_reads_as_empty_object() {
        let json = r#"{"id": 1, "name": "Acme", "slug": "acme", "config": null}"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.status, SiteStatus::Draft);
        assert_eq!(site.config_text(), "{}");
    }
}
