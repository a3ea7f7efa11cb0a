//! Storefront config rendering from JSON input.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use shopifake_core::{SiteConfig, SiteDraft};
use shopifake_storefront::storefront_config::{StorefrontConfig, draft_to_site_config};

/// Build the storefront config for a site config file or a draft file.
///
/// With neither given, an empty site config is used, which yields the baseline.
///
/// # Errors
///
/// Returns an error if the input cannot be read or does not parse.
pub fn run(
    config: Option<&Path>,
    draft: Option<&Path>,
    site_name: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let storefront = match (config, draft) {
        (_, Some(path)) => {
            let draft: SiteDraft = serde_json::from_str(&read_input(path)?)?;
            StorefrontConfig::from_draft(&draft, site_name)
        }
        (Some(path), None) => {
            let config = SiteConfig::parse(&read_input(path)?)?;
            StorefrontConfig::from_site_config(&config, site_name)
        }
        (None, None) => StorefrontConfig::from_site_config(&SiteConfig::default(), site_name),
    };

    Ok(serde_json::to_value(storefront)?)
}

/// The site config a draft file would be persisted as.
///
/// # Errors
///
/// Returns an error if no draft is given or it cannot be read or parsed.
pub fn site_config(draft: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    let path = draft.ok_or("--as-site-config needs --draft")?;
    let draft: SiteDraft = serde_json::from_str(&read_input(path)?)?;
    Ok(serde_json::to_value(draft_to_site_config(&draft))?)
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopifake_storefront::storefront_config::mock_storefront_config;

    use super::*;

    #[test]
    fn test_no_input_yields_baseline() {
        let out = run(None, None, None).unwrap();
        assert_eq!(out, serde_json::to_value(mock_storefront_config()).unwrap());
    }

    #[test]
    fn test_site_name_fills_brand() {
        let out = run(None, None, Some("Acme")).unwrap();
        assert_eq!(out["branding"]["name"], "Acme");
    }

    #[test]
    fn test_draft_converts_to_site_config() {
        let path =
            std::env::temp_dir().join(format!("shopifake-draft-{}.json", std::process::id()));
        let draft = r##"{"name":"Acme","primaryColor":"","secondaryColor":"#123456"}"##;
        std::fs::write(&path, draft).unwrap();
        let out = site_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(out["name"], "Acme");
        assert_eq!(out["primaryColor"], "#000000");
        assert_eq!(out["secondaryColor"], "#123456");
        assert!(out.get("tagline").is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(run(Some(Path::new("/nonexistent/config.json")), None, None).is_err());
    }
}
