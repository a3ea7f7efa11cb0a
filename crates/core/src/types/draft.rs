//! Editable, not-yet-persisted site content.

use serde::{Deserialize, Serialize};

use super::Values;

/// Color a draft starts with when the owner has not picked one.
pub const DEFAULT_DRAFT_COLOR: &str = "#000000";

/// An owner's in-progress site content.
///
/// Carries the same fields as [`SiteConfig`](super::SiteConfig), but as plain
/// strings because it backs an edit form. Used by the site creation flow and
/// by preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteDraft {
    pub name: String,
    pub tagline: String,
    pub banner_url: String,
    pub logo_url: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub about_portrait_url: String,
    pub about_secondary_portrait_url: String,
    pub about_title: String,
    pub about_story: String,
    pub values: Values,
    pub contact_heading: String,
    pub contact_description: String,
    pub contact_details: String,
    pub contact_note: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for SiteDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            banner_url: String::new(),
            logo_url: String::new(),
            hero_title: String::new(),
            hero_subtitle: String::new(),
            hero_description: String::new(),
            about_portrait_url: String::new(),
            about_secondary_portrait_url: String::new(),
            about_title: String::new(),
            about_story: String::new(),
            values: Values::default(),
            contact_heading: String::new(),
            contact_description: String::new(),
            contact_details: String::new(),
            contact_note: String::new(),
            primary_color: DEFAULT_DRAFT_COLOR.to_string(),
            secondary_color: DEFAULT_DRAFT_COLOR.to_string(),
        }
    }
}
