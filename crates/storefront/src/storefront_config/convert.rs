//! Conversions between persisted configs and editable drafts.

use shopifake_core::{DEFAULT_DRAFT_COLOR, SiteConfig, SiteDraft};

use super::mock_storefront_config;

/// Turn an owner's draft into the config persisted on their site.
///
/// Blank draft fields are left out. Colors are always set: an empty primary
/// becomes `#000000` and an empty secondary the baseline's secondary color.
#[must_use]
pub fn draft_to_site_config(draft: &SiteDraft) -> SiteConfig {
    SiteConfig {
        name: non_empty(&draft.name),
        tagline: non_empty(&draft.tagline),
        banner_url: non_empty(&draft.banner_url),
        logo_url: non_empty(&draft.logo_url),
        hero_title: non_empty(&draft.hero_title),
        hero_subtitle: non_empty(&draft.hero_subtitle),
        hero_description: non_empty(&draft.hero_description),
        about_portrait_url: non_empty(&draft.about_portrait_url),
        about_secondary_portrait_url: non_empty(&draft.about_secondary_portrait_url),
        about_title: non_empty(&draft.about_title),
        about_story: non_empty(&draft.about_story),
        values: draft.values.clone(),
        contact_heading: non_empty(&draft.contact_heading),
        contact_description: non_empty(&draft.contact_description),
        contact_details: non_empty(&draft.contact_details),
        contact_note: non_empty(&draft.contact_note),
        primary_color: Some(
            non_empty(&draft.primary_color).unwrap_or_else(|| DEFAULT_DRAFT_COLOR.to_string()),
        ),
        secondary_color: Some(
            non_empty(&draft.secondary_color)
                .unwrap_or_else(|| mock_storefront_config().theme.secondary_color.clone()),
        ),
    }
}

/// Open a persisted config for editing.
#[must_use]
pub fn site_config_to_draft(config: &SiteConfig) -> SiteDraft {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();
    let color = |field: &Option<String>| {
        non_empty(field.as_deref().unwrap_or_default())
            .unwrap_or_else(|| DEFAULT_DRAFT_COLOR.to_string())
    };

    SiteDraft {
        name: text(&config.name),
        tagline: text(&config.tagline),
        banner_url: text(&config.banner_url),
        logo_url: text(&config.logo_url),
        hero_title: text(&config.hero_title),
        hero_subtitle: text(&config.hero_subtitle),
        hero_description: text(&config.hero_description),
        about_portrait_url: text(&config.about_portrait_url),
        about_secondary_portrait_url: text(&config.about_secondary_portrait_url),
        about_title: text(&config.about_title),
        about_story: text(&config.about_story),
        values: config.values.clone(),
        contact_heading: text(&config.contact_heading),
        contact_description: text(&config.contact_description),
        contact_details: text(&config.contact_details),
        contact_note: text(&config.contact_note),
        primary_color: color(&config.primary_color),
        secondary_color: color(&config.secondary_color),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopifake_core::Values;

    use super::*;
    use crate::storefront_config::demo_draft;

    #[test]
    fn test_round_trip_preserves_demo_draft() {
        let draft = demo_draft();
        assert_eq!(site_config_to_draft(&draft_to_site_config(&draft)), draft);
    }

    #[test]
    fn test_round_trip_preserves_values_positionally() {
        let draft = SiteDraft {
            hero_title: "Hello".to_string(),
            values: Values::from_iter_padded(["", "second", "", "fourth"]),
            primary_color: "#123456".to_string(),
            secondary_color: "#abcdef".to_string(),
            ..SiteDraft::default()
        };
        let back = site_config_to_draft(&draft_to_site_config(&draft));
        assert_eq!(back, draft);
        assert_eq!(back.values.as_array()[1], "second");
        assert_eq!(back.values.as_array()[3], "fourth");
    }

    #[test]
    fn test_round_trip_through_json() {
        let draft = demo_draft();
        let json = draft_to_site_config(&draft).to_json().unwrap();
        let parsed = SiteConfig::parse(&json).unwrap();
        assert_eq!(site_config_to_draft(&parsed), draft);
    }

    #[test]
    fn test_empty_colors_are_filled() {
        let draft = SiteDraft {
            primary_color: String::new(),
            secondary_color: String::new(),
            ..SiteDraft::default()
        };
        let config = draft_to_site_config(&draft);
        assert_eq!(config.primary_color.as_deref(), Some(DEFAULT_DRAFT_COLOR));
        assert_eq!(
            config.secondary_color.as_deref(),
            Some(mock_storefront_config().theme.secondary_color.as_str())
        );
    }

    #[test]
    fn test_whitespace_fields_count_as_blank() {
        let draft = SiteDraft {
            name: "   ".to_string(),
            primary_color: "  ".to_string(),
            secondary_color: "\t".to_string(),
            ..SiteDraft::default()
        };
        let config = draft_to_site_config(&draft);
        assert!(config.name.is_none());
        assert_eq!(config.primary_color.as_deref(), Some(DEFAULT_DRAFT_COLOR));
        assert_eq!(
            config.secondary_color.as_deref(),
            Some(mock_storefront_config().theme.secondary_color.as_str())
        );

        let reopened = site_config_to_draft(&SiteConfig {
            primary_color: Some(" ".to_string()),
            ..SiteConfig::default()
        });
        assert_eq!(reopened.primary_color, DEFAULT_DRAFT_COLOR);
    }

    #[test]
    fn test_empty_fields_are_left_out() {
        let config = draft_to_site_config(&SiteDraft::default());
        assert!(config.name.is_none());
        assert!(config.contact_details.is_none());
    }

    #[test]
    fn test_missing_colors_open_as_default() {
        let draft = site_config_to_draft(&SiteConfig::default());
        assert_eq!(draft.primary_color, DEFAULT_DRAFT_COLOR);
        assert_eq!(draft.secondary_color, DEFAULT_DRAFT_COLOR);
        assert_eq!(draft.hero_title, "");
    }
}
