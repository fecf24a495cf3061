//! Page configuration.

use shopfront_core::{ConfigError, StorefrontConfig};

/// `id` of the optional `<script type="application/json">` element holding
/// page configuration.
pub const CONFIG_SCRIPT_ID: &str = "shopfront-config";

/// Custom event dispatched on the search input with the debounced query as
/// `detail`.
pub const SEARCH_EVENT: &str = "shopfront:search";

/// Parse the contents of the configuration script.
///
/// A missing or blank script yields the default configuration.
pub fn page_config(script: Option<&str>) -> Result<StorefrontConfig, ConfigError> {
    match script.map(str::trim) {
        None | Some("") => Ok(StorefrontConfig::default()),
        Some(json) => StorefrontConfig::from_json_str(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_script_is_default() {
        assert_eq!(page_config(None).unwrap(), StorefrontConfig::default());
        assert_eq!(page_config(Some("  \n")).unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config =
            page_config(Some(r#"{"cart": {"storage_key": "shopCart"}, "search": {"debounce_ms": 150}}"#))
                .unwrap();
        assert_eq!(config.cart.storage_key, "shopCart");
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.input_id, "search-input");
    }

    #[test]
    fn test_malformed_script_is_error() {
        assert!(matches!(page_config(Some("{")), Err(ConfigError::Json(_))));
    }
}
