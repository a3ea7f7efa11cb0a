//! Tenant presentation content persisted in a site's `config` field.
//!
//! The config is a loose content bag, not a strict schema: any valid JSON is
//! accepted, missing keys are absent, and values of the wrong JSON type are
//! treated as absent too. Consumers apply their own fallbacks.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of value statements a site presents.
pub const VALUE_COUNT: usize = 4;

/// The persisted config was not valid JSON.
///
/// Keeps the original text so operators can see exactly what was stored.
#[derive(Debug, thiserror::Error)]
#[error("site config is not valid JSON: {source}")]
pub struct ConfigParseError {
    raw: String,
    source: serde_json::Error,
}

impl ConfigParseError {
    /// The config text that failed to parse.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Exactly [`VALUE_COUNT`] value statements.
///
/// Shorter input is padded with empty strings and longer input truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Values([String; VALUE_COUNT]);

impl Values {
    /// Build from any sequence, padding or truncating to [`VALUE_COUNT`].
    pub fn from_iter_padded<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: [String; VALUE_COUNT] = Default::default();
        for (slot, item) in values.iter_mut().zip(items) {
            *slot = item.into();
        }
        Self(values)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[String; VALUE_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Whether every statement is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|v| v.trim().is_empty())
    }
}

impl<'de> Deserialize<'de> for Values {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        Ok(Self::from_iter_padded(
            items
                .into_iter()
                .map(|item| lenient_text(item).unwrap_or_default()),
        ))
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Presentation content for one tenant site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub hero_description: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub about_portrait_url: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub about_secondary_portrait_url: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub about_title: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub about_story: Option<String>,
    pub values: Values,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub contact_heading: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub contact_description: Option<String>,
    /// Newline-delimited contact lines.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub contact_note: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
}

impl SiteConfig {
    /// Parse a site's persisted config text.
    ///
    /// Only checks that the text is JSON. A document that is valid JSON but
    /// not an object yields an all-absent config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError`] if `raw` is not valid JSON.
    pub fn parse(raw: &str) -> Result<Self, ConfigParseError> {
        let to_error = |source| ConfigParseError {
            raw: raw.to_owned(),
            source,
        };

        let value: Value = serde_json::from_str(raw).map_err(to_error)?;
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(to_error)
    }

    /// Serialize for storage in a site's `config` field.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Strings pass through, numbers are rendered, anything else is absent.
fn lenient_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(lenient_text(Value::deserialize(deserializer)?))
}
