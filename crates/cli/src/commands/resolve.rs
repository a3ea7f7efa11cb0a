//! Host to tenant resolution.

use serde_json::{Value, json};
use shopifake_storefront::config::normalize_base_domain;
use shopifake_storefront::tenant::resolve_subdomain;

/// Resolve `host` against `base_domain`, or `SHOPIFAKE_BASE_DOMAIN` when omitted.
///
/// # Errors
///
/// Returns an error if no usable base domain is available.
pub fn run(host: &str, base_domain: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = match base_domain {
        Some(domain) => domain.to_owned(),
        None => std::env::var("SHOPIFAKE_BASE_DOMAIN")
            .map_err(|_| "SHOPIFAKE_BASE_DOMAIN not set and --base-domain not given")?,
    };
    let base_domain = normalize_base_domain(&raw).ok_or("base domain is empty")?;

    Ok(describe(host, &base_domain))
}

fn describe(host: &str, base_domain: &str) -> Value {
    let subdomain = resolve_subdomain(host, base_domain);
    json!({
        "host": host,
        "baseDomain": base_domain,
        "subdomain": subdomain.as_ref().map(|s| s.as_str()),
        "tenant": subdomain.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_tenant_host() {
        let out = describe("acme.shopifake.com:8080", "shopifake.com");
        assert_eq!(out["subdomain"], "acme");
        assert_eq!(out["tenant"], true);
    }

    #[test]
    fn test_describe_main_site() {
        let out = describe("shopifake.com", "shopifake.com");
        assert!(out["subdomain"].is_null());
        assert_eq!(out["tenant"], false);
    }

    #[test]
    fn test_explicit_base_domain_is_normalised() {
        let out = run("Acme.ShopiFake.com", Some(".ShopiFake.com")).ok();
        assert_eq!(out.map(|v| v["subdomain"].clone()), Some(json!("acme")));
    }
}
