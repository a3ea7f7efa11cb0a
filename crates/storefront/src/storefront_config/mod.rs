//! Fully resolved storefront theming and content.
//!
//! A [`StorefrontConfig`] is what templates render. It is always rebuilt from
//! a source (a persisted [`SiteConfig`] or an owner's [`SiteDraft`]) laid over
//! the fixed baseline in [`baseline::mock_storefront_config`]. Both entry
//! points go through the same merge, so templates cannot tell a preview from
//! a live site.

pub mod baseline;
pub mod convert;
mod merge;

pub use baseline::{demo_draft, mock_storefront_config};
pub use convert::{draft_to_site_config, site_config_to_draft};
pub use merge::StorefrontOverrides;

use serde::Serialize;
use shopifake_core::{SiteConfig, SiteDraft};

/// Everything a storefront page needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontConfig {
    pub branding: Branding,
    pub navigation: Navigation,
    pub home: HomePage,
    pub categories: CategoriesPage,
    pub about: AboutPage,
    pub account: ButtonStyle,
    pub cart: ButtonStyle,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub logo_url: String,
    /// Short glyph shown when the logo cannot load.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub home_label: String,
    pub categories_label: String,
    pub about_label: String,
    pub link_class: String,
    pub hover_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub hero: HomeHero,
    pub product_card: ProductCardStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeHero {
    pub banner_url: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardStyle {
    pub container_class: String,
    pub title_class: String,
    pub price_class: String,
    pub button_class: String,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoriesPage {
    pub title: String,
    pub subtitle: String,
    pub empty_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutPage {
    pub hero: AboutHero,
    pub story: AboutStory,
    /// Always [`shopifake_core::VALUE_COUNT`] entries.
    pub values: Vec<ValueStatement>,
    pub contact: ContactSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutHero {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutStory {
    pub heading: String,
    pub body: String,
    pub portrait_url: String,
    pub secondary_portrait_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueStatement {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSection {
    pub heading: String,
    pub description: String,
    /// Never empty.
    pub details: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonStyle {
    pub label: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub wrapper_class: String,
    pub accent_class: String,
}

impl StorefrontConfig {
    /// Build from a persisted site config.
    ///
    /// `site_name` is the site record's name, used when the config has none.
    #[must_use]
    pub fn from_site_config(config: &SiteConfig, site_name: Option<&str>) -> Self {
        StorefrontOverrides::from(config).apply(mock_storefront_config(), site_name)
    }

    /// Build from an owner's draft, for preview and the creation flow.
    #[must_use]
    pub fn from_draft(draft: &SiteDraft, site_name: Option<&str>) -> Self {
        StorefrontOverrides::from(draft).apply(mock_storefront_config(), site_name)
    }
}
