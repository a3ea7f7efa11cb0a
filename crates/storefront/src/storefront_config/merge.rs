//! The single overlay rule shared by persisted configs and drafts.
//!
//! A source field is absent when it is `None`, empty, or only whitespace.
//! Absent fields take the baseline's value.

use shopifake_core::{SiteConfig, SiteDraft, VALUE_COUNT};

use super::{
    AboutHero, AboutPage, AboutStory, Branding, ContactSection, HomeHero, HomePage, StorefrontConfig,
    Theme, ValueStatement,
};

/// Source fields to lay over a baseline, borrowed from a config or a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontOverrides<'a> {
    pub name: Option<&'a str>,
    pub tagline: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub banner_url: Option<&'a str>,
    pub hero_title: Option<&'a str>,
    pub hero_subtitle: Option<&'a str>,
    pub hero_description: Option<&'a str>,
    pub about_title: Option<&'a str>,
    pub about_story: Option<&'a str>,
    pub about_portrait_url: Option<&'a str>,
    pub about_secondary_portrait_url: Option<&'a str>,
    pub values: [Option<&'a str>; VALUE_COUNT],
    pub contact_heading: Option<&'a str>,
    pub contact_description: Option<&'a str>,
    pub contact_details: Option<&'a str>,
    pub contact_note: Option<&'a str>,
    pub primary_color: Option<&'a str>,
    pub secondary_color: Option<&'a str>,
}

impl<'a> From<&'a SiteConfig> for StorefrontOverrides<'a> {
    fn from(config: &'a SiteConfig) -> Self {
        Self {
            name: config.name.as_deref(),
            tagline: config.tagline.as_deref(),
            logo_url: config.logo_url.as_deref(),
            banner_url: config.banner_url.as_deref(),
            hero_title: config.hero_title.as_deref(),
            hero_subtitle: config.hero_subtitle.as_deref(),
            hero_description: config.hero_description.as_deref(),
            about_title: config.about_title.as_deref(),
            about_story: config.about_story.as_deref(),
            about_portrait_url: config.about_portrait_url.as_deref(),
            about_secondary_portrait_url: config.about_secondary_portrait_url.as_deref(),
            values: config.values.as_array().each_ref().map(|v| Some(v.as_str())),
            contact_heading: config.contact_heading.as_deref(),
            contact_description: config.contact_description.as_deref(),
            contact_details: config.contact_details.as_deref(),
            contact_note: config.contact_note.as_deref(),
            primary_color: config.primary_color.as_deref(),
            secondary_color: config.secondary_color.as_deref(),
        }
    }
}

impl<'a> From<&'a SiteDraft> for StorefrontOverrides<'a> {
    fn from(draft: &'a SiteDraft) -> Self {
        Self {
            name: Some(draft.name.as_str()),
            tagline: Some(draft.tagline.as_str()),
            logo_url: Some(draft.logo_url.as_str()),
            banner_url: Some(draft.banner_url.as_str()),
            hero_title: Some(draft.hero_title.as_str()),
            hero_subtitle: Some(draft.hero_subtitle.as_str()),
            hero_description: Some(draft.hero_description.as_str()),
            about_title: Some(draft.about_title.as_str()),
            about_story: Some(draft.about_story.as_str()),
            about_portrait_url: Some(draft.about_portrait_url.as_str()),
            about_secondary_portrait_url: Some(draft.about_secondary_portrait_url.as_str()),
            values: draft.values.as_array().each_ref().map(|v| Some(v.as_str())),
            contact_heading: Some(draft.contact_heading.as_str()),
            contact_description: Some(draft.contact_description.as_str()),
            contact_details: Some(draft.contact_details.as_str()),
            contact_note: Some(draft.contact_note.as_str()),
            primary_color: Some(draft.primary_color.as_str()),
            secondary_color: Some(draft.secondary_color.as_str()),
        }
    }
}

impl StorefrontOverrides<'_> {
    /// Lay these overrides over the `base` config.
    ///
    /// The brand name comes from the source, then `site_name`, then the baseline.
    #[must_use]
    pub fn apply(&self, base: &StorefrontConfig, site_name: Option<&str>) -> StorefrontConfig {
        StorefrontConfig {
            branding: Branding {
                name: pick(
                    present(self.name).or_else(|| present(site_name)),
                    &base.branding.name,
                ),
                tagline: pick(self.tagline, &base.branding.tagline),
                logo_url: pick(self.logo_url, &base.branding.logo_url),
                icon: base.branding.icon.clone(),
            },
            navigation: base.navigation.clone(),
            home: HomePage {
                hero: HomeHero {
                    banner_url: pick(self.banner_url, &base.home.hero.banner_url),
                    title: pick(self.hero_title, &base.home.hero.title),
                    subtitle: pick(self.hero_subtitle, &base.home.hero.subtitle),
                    description: pick(self.hero_description, &base.home.hero.description),
                    cta_label: base.home.hero.cta_label.clone(),
                },
                product_card: base.home.product_card.clone(),
            },
            categories: base.categories.clone(),
            about: AboutPage {
                hero: AboutHero {
                    title: pick(self.about_title, &base.about.hero.title),
                    subtitle: base.about.hero.subtitle.clone(),
                    image_url: pick(self.banner_url, &base.about.hero.image_url),
                },
                story: AboutStory {
                    heading: base.about.story.heading.clone(),
                    body: pick(self.about_story, &base.about.story.body),
                    portrait_url: pick(self.about_portrait_url, &base.about.story.portrait_url),
                    secondary_portrait_url: pick(
                        self.about_secondary_portrait_url,
                        &base.about.story.secondary_portrait_url,
                    ),
                },
                values: base
                    .about
                    .values
                    .iter()
                    .zip(self.values)
                    .map(|(baseline_value, description)| ValueStatement {
                        icon: baseline_value.icon.clone(),
                        title: baseline_value.title.clone(),
                        description: pick(description, &baseline_value.description),
                    })
                    .collect(),
                contact: ContactSection {
                    heading: pick(self.contact_heading, &base.about.contact.heading),
                    description: pick(self.contact_description, &base.about.contact.description),
                    details: contact_lines(self.contact_details)
                        .unwrap_or_else(|| base.about.contact.details.clone()),
                    note: pick(self.contact_note, &base.about.contact.note),
                },
            },
            account: base.account.clone(),
            cart: base.cart.clone(),
            theme: Theme {
                primary_color: pick_color(self.primary_color, &base.theme.primary_color),
                secondary_color: pick_color(self.secondary_color, &base.theme.secondary_color),
                wrapper_class: base.theme.wrapper_class.clone(),
                accent_class: base.theme.accent_class.clone(),
            },
        }
    }
}

/// The value, unless it is blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick(value: Option<&str>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_owned()
}

/// Colors end up in an inline style, so only `#rgb` and `#rrggbb` pass.
fn pick_color(value: Option<&str>, fallback: &str) -> String {
    present(value)
        .map(str::trim)
        .filter(|color| is_hex_color(color))
        .unwrap_or(fallback)
        .to_owned()
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Non-empty trimmed lines, or `None` when there are none.
fn contact_lines(details: Option<&str>) -> Option<Vec<String>> {
    let lines: Vec<String> = details?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    (!lines.is_empty()).then_some(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopifake_core::Values;

    use super::*;
    use crate::storefront_config::{demo_draft, mock_storefront_config};

    fn all_fields(config: &StorefrontConfig) -> Vec<String> {
        let json = serde_json::to_value(config).unwrap();
        let mut out = Vec::new();
        collect_strings(&json, &mut out);
        out
    }

    fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::String(s) => out.push(s.clone()),
            serde_json::Value::Array(items) => {
                assert!(!items.is_empty(), "empty list in storefront config");
                items.iter().for_each(|v| collect_strings(v, out));
            }
            serde_json::Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
            other => panic!("unexpected value {other}"),
        }
    }

    #[test]
    fn test_empty_config_yields_baseline() {
        let built = StorefrontConfig::from_site_config(&SiteConfig::default(), None);
        assert_eq!(&built, mock_storefront_config());
    }

    #[test]
    fn test_every_field_non_empty_for_blank_inputs() {
        let blank_draft = SiteDraft {
            primary_color: String::new(),
            secondary_color: " ".to_string(),
            ..SiteDraft::default()
        };
        for built in [
            StorefrontConfig::from_site_config(&SiteConfig::default(), Some("")),
            StorefrontConfig::from_draft(&blank_draft, None),
        ] {
            for field in all_fields(&built) {
                assert!(!field.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_name_only_config_fills_rest_from_baseline() {
        let config = SiteConfig::parse(r#"{"name":"Acme"}"#).unwrap();
        let built = StorefrontConfig::from_site_config(&config, None);
        let base = mock_storefront_config();

        assert_eq!(built.branding.name, "Acme");
        assert_eq!(built.home, base.home);
        assert_eq!(built.about, base.about);
        assert_eq!(built.theme, base.theme);
    }

    #[test]
    fn test_brand_name_precedence() {
        let named = SiteConfig {
            name: Some("From Config".to_string()),
            ..SiteConfig::default()
        };
        assert_eq!(
            StorefrontConfig::from_site_config(&named, Some("From Site"))
                .branding
                .name,
            "From Config"
        );
        assert_eq!(
            StorefrontConfig::from_site_config(&SiteConfig::default(), Some("From Site"))
                .branding
                .name,
            "From Site"
        );
    }

    #[test]
    fn test_whitespace_counts_as_absent() {
        let config = SiteConfig {
            hero_title: Some("   ".to_string()),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        assert_eq!(built.home.hero.title, mock_storefront_config().home.hero.title);
    }

    #[test]
    fn test_contact_details_split_and_trimmed() {
        let config = SiteConfig {
            contact_details: Some("  hi@acme.test \r\n\n  +1 555 0100\n   ".to_string()),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        assert_eq!(
            built.about.contact.details,
            vec!["hi@acme.test".to_string(), "+1 555 0100".to_string()]
        );
    }

    #[test]
    fn test_blank_contact_details_use_baseline_list() {
        let config = SiteConfig {
            contact_details: Some("\n  \n".to_string()),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        assert_eq!(
            built.about.contact.details,
            mock_storefront_config().about.contact.details
        );
    }

    #[test]
    fn test_values_zip_positionally() {
        let config = SiteConfig {
            values: Values::from_iter_padded(["", "Built to last"]),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        let base = &mock_storefront_config().about.values;

        assert_eq!(built.about.values.len(), VALUE_COUNT);
        assert_eq!(built.about.values.first(), base.first());
        let second = built.about.values.get(1).unwrap();
        let base_second = base.get(1).unwrap();
        assert_eq!(second.description, "Built to last");
        assert_eq!(second.title, base_second.title);
        assert_eq!(second.icon, base_second.icon);
    }

    #[test]
    fn test_draft_and_config_entry_points_agree() {
        let draft = demo_draft();
        let config = crate::storefront_config::draft_to_site_config(&draft);
        assert_eq!(
            StorefrontConfig::from_draft(&draft, Some("Site")),
            StorefrontConfig::from_site_config(&config, Some("Site"))
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let draft = demo_draft();
        assert_eq!(
            StorefrontConfig::from_draft(&draft, None),
            StorefrontConfig::from_draft(&draft, None)
        );
    }

    #[test]
    fn test_colors_flow_into_theme() {
        let config = SiteConfig {
            primary_color: Some("#112233".to_string()),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        assert_eq!(built.theme.primary_color, "#112233");
        assert_eq!(
            built.theme.secondary_color,
            mock_storefront_config().theme.secondary_color
        );
    }

    #[test]
    fn test_invalid_colors_use_baseline() {
        let base = &mock_storefront_config().theme;
        for bad in ["red; background:url(//x)", "#12345", "#ggg", "123456", "rgb(0,0,0)"] {
            let config = SiteConfig {
                primary_color: Some(bad.to_string()),
                secondary_color: Some(bad.to_string()),
                ..SiteConfig::default()
            };
            let built = StorefrontConfig::from_site_config(&config, None);
            assert_eq!(built.theme.primary_color, base.primary_color, "{bad}");
            assert_eq!(built.theme.secondary_color, base.secondary_color, "{bad}");
        }
    }

    #[test]
    fn test_short_and_padded_hex_colors_accepted() {
        let config = SiteConfig {
            primary_color: Some("#FfF".to_string()),
            secondary_color: Some(" #0a0B0c ".to_string()),
            ..SiteConfig::default()
        };
        let built = StorefrontConfig::from_site_config(&config, None);
        assert_eq!(built.theme.primary_color, "#FfF");
        assert_eq!(built.theme.secondary_color, "#0a0B0c");
    }
}
