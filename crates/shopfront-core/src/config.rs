//! Storefront enhancement configuration.
//!
//! Every field has a default that matches the markup contract the
//! storefront templates are written against, so an empty config file (or no
//! file at all) yields a working setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level configuration for all enhancements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Debounced search box.
    #[serde(default)]
    pub search: SearchConfig,

    /// Required-field validation.
    #[serde(default)]
    pub forms: FormsConfig,

    /// Mobile menu and responsive tables.
    #[serde(default)]
    pub mobile: MobileConfig,

    /// Lazy images and click-to-zoom.
    #[serde(default)]
    pub media: MediaConfig,

    /// Structured data injection.
    #[serde(default)]
    pub seo: SeoConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check values that would silently disable an enhancement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cart.storage_key.trim().is_empty() {
            return Err(ConfigError::invalid("cart.storage_key", "must not be empty"));
        }
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::invalid("search.debounce_ms", "must be positive"));
        }
        if self.search.min_query_chars == 0 {
            return Err(ConfigError::invalid(
                "search.min_query_chars",
                "must be at least 1",
            ));
        }

        let currency = &self.seo.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::invalid(
                "seo.currency",
                format!("'{}' is not an ISO 4217 code", currency),
            ));
        }

        let selectors = [
            ("mobile.toggle_selector", &self.mobile.toggle_selector),
            ("mobile.menu_selector", &self.mobile.menu_selector),
            ("mobile.table_selector", &self.mobile.table_selector),
            ("media.lazy_selector", &self.media.lazy_selector),
            ("media.zoom_selector", &self.media.zoom_selector),
            ("seo.product_selector", &self.seo.product_selector),
            ("seo.name_selector", &self.seo.name_selector),
            ("seo.price_selector", &self.seo.price_selector),
            ("seo.image_selector", &self.seo.image_selector),
            ("seo.description_selector", &self.seo.description_selector),
        ];
        for (field, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "selector must not be empty"));
            }
        }

        // Single tokens: the class list rejects empty names and whitespace.
        let tokens = [
            ("forms.error_marker_class", &self.forms.error_marker_class),
            ("forms.field_error_class", &self.forms.field_error_class),
            ("mobile.hidden_class", &self.mobile.hidden_class),
            ("mobile.menu_open_class", &self.mobile.menu_open_class),
            ("mobile.table_wrapper_class", &self.mobile.table_wrapper_class),
            ("media.lazy_source_attr", &self.media.lazy_source_attr),
            ("media.loaded_class", &self.media.loaded_class),
            ("media.zoomed_class", &self.media.zoomed_class),
        ];
        for (field, value) in tokens {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::invalid(
                    field,
                    format!("'{}' is not a single name", value),
                ));
            }
        }
        if self.forms.error_element_classes.trim().is_empty() {
            return Err(ConfigError::invalid(
                "forms.error_element_classes",
                "must name at least one class",
            ));
        }

        Ok(())
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Local storage key holding the JSON array of line items.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    "digitalStoreCart".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Search box settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// DOM id of the search input.
    #[serde(default = "default_search_input")]
    pub input_id: String,

    /// DOM id of the results container.
    #[serde(default = "default_search_results")]
    pub results_id: String,

    /// Quiet period before a search fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,

    /// Shorter queries clear the results instead of searching.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Text shown while searching. `{query}` is replaced by the query.
    #[serde(default = "default_searching_message")]
    pub searching_message: String,
}

fn default_search_input() -> String {
    "search-input".to_string()
}

fn default_search_results() -> String {
    "search-results".to_string()
}

fn default_debounce_ms() -> u32 {
    300
}

fn default_min_query_chars() -> usize {
    3
}

fn default_searching_message() -> String {
    "جاري البحث عن: {query}...".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            input_id: default_search_input(),
            results_id: default_search_results(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            searching_message: default_searching_message(),
        }
    }
}

/// Form validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// DOM ids of the forms to validate on submit.
    #[serde(default = "default_form_ids")]
    pub form_ids: Vec<String>,

    /// Message shown under an empty required field.
    #[serde(default = "default_required_message")]
    pub required_message: String,

    /// Marker class identifying an error element.
    #[serde(default = "default_error_marker")]
    pub error_marker_class: String,

    /// Full class list given to newly created error elements.
    #[serde(default = "default_error_classes")]
    pub error_element_classes: String,

    /// Class added to an invalid field.
    #[serde(default = "default_field_error_class")]
    pub field_error_class: String,
}

fn default_form_ids() -> Vec<String> {
    ["checkout-form", "contact-form", "login-form", "register-form"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_required_message() -> String {
    "هذا الحقل مطلوب".to_string()
}

fn default_error_marker() -> String {
    "error-message".to_string()
}

fn default_error_classes() -> String {
    "error-message text-error text-sm mt-1".to_string()
}

fn default_field_error_class() -> String {
    "border-error".to_string()
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            form_ids: default_form_ids(),
            required_message: default_required_message(),
            error_marker_class: default_error_marker(),
            error_element_classes: default_error_classes(),
            field_error_class: default_field_error_class(),
        }
    }
}

/// Mobile menu and table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileConfig {
    #[serde(default = "default_toggle_selector")]
    pub toggle_selector: String,

    #[serde(default = "default_menu_selector")]
    pub menu_selector: String,

    /// Class toggled on the menu element.
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,

    /// Class toggled on `<body>` while the menu is open.
    #[serde(default = "default_menu_open_class")]
    pub menu_open_class: String,

    #[serde(default = "default_table_selector")]
    pub table_selector: String,

    /// Class of the scroll container wrapped around tables.
    #[serde(default = "default_table_wrapper_class")]
    pub table_wrapper_class: String,
}

fn default_toggle_selector() -> String {
    ".mobile-menu-toggle".to_string()
}

fn default_menu_selector() -> String {
    ".mobile-menu".to_string()
}

fn default_hidden_class() -> String {
    "hidden".to_string()
}

fn default_menu_open_class() -> String {
    "menu-open".to_string()
}

fn default_table_selector() -> String {
    "table".to_string()
}

fn default_table_wrapper_class() -> String {
    "responsive-table".to_string()
}

impl Default for MobileConfig {
    fn default() -> Self {
        Self {
            toggle_selector: default_toggle_selector(),
            menu_selector: default_menu_selector(),
            hidden_class: default_hidden_class(),
            menu_open_class: default_menu_open_class(),
            table_selector: default_table_selector(),
            table_wrapper_class: default_table_wrapper_class(),
        }
    }
}

/// Lazy image and zoom settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_lazy_selector")]
    pub lazy_selector: String,

    /// Attribute holding the deferred image URL.
    #[serde(default = "default_lazy_source_attr")]
    pub lazy_source_attr: String,

    #[serde(default = "default_loaded_class")]
    pub loaded_class: String,

    #[serde(default = "default_zoom_selector")]
    pub zoom_selector: String,

    #[serde(default = "default_zoomed_class")]
    pub zoomed_class: String,
}

fn default_lazy_selector() -> String {
    ".lazy-image".to_string()
}

fn default_lazy_source_attr() -> String {
    "data-src".to_string()
}

fn default_loaded_class() -> String {
    "loaded".to_string()
}

fn default_zoom_selector() -> String {
    ".product-image-zoom".to_string()
}

fn default_zoomed_class() -> String {
    "zoomed".to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            lazy_selector: default_lazy_selector(),
            lazy_source_attr: default_lazy_source_attr(),
            loaded_class: default_loaded_class(),
            zoom_selector: default_zoom_selector(),
            zoomed_class: default_zoomed_class(),
        }
    }
}

/// Structured data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoConfig {
    #[serde(default = "default_product_selector")]
    pub product_selector: String,

    #[serde(default = "default_name_selector")]
    pub name_selector: String,

    /// Element carrying the `data-price` attribute.
    #[serde(default = "default_price_selector")]
    pub price_selector: String,

    #[serde(default = "default_image_selector")]
    pub image_selector: String,

    #[serde(default = "default_description_selector")]
    pub description_selector: String,

    /// ISO 4217 currency code for every offer.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// schema.org availability URL for every offer.
    #[serde(default = "default_availability")]
    pub availability: String,
}

fn default_product_selector() -> String {
    ".product-item".to_string()
}

fn default_name_selector() -> String {
    ".product-name".to_string()
}

fn default_price_selector() -> String {
    ".product-price".to_string()
}

fn default_image_selector() -> String {
    ".product-image".to_string()
}

fn default_description_selector() -> String {
    ".product-description".to_string()
}

fn default_currency() -> String {
    "SAR".to_string()
}

fn default_availability() -> String {
    "https://schema.org/InStock".to_string()
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            product_selector: default_product_selector(),
            name_selector: default_name_selector(),
            price_selector: default_price_selector(),
            image_selector: default_image_selector(),
            description_selector: default_description_selector(),
            currency: default_currency(),
            availability: default_availability(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` or `human`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_markup_contract() {
        let config = StorefrontConfig::default();
        assert_eq!(config.cart.storage_key, "digitalStoreCart");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_chars, 3);
        assert_eq!(config.forms.form_ids.len(), 4);
        assert_eq!(config.seo.currency, "SAR");
        assert_eq!(config.media.lazy_selector, ".lazy-image");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [search]
            debounce_ms = 150

            [seo]
            currency = "USD"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.input_id, "search-input");
        assert_eq!(config.seo.currency, "USD");
    }

    #[test]
    fn test_json_config() {
        let config =
            StorefrontConfig::from_json_str(r#"{"cart": {"storage_key": "cart-v2"}}"#).unwrap();
        assert_eq!(config.cart.storage_key, "cart-v2");
    }

    #[test]
    fn test_rejects_bad_currency() {
        let err = StorefrontConfig::from_toml_str("[seo]\ncurrency = \"riyal\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "seo.currency",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_debounce() {
        let err = StorefrontConfig::from_toml_str("[search]\ndebounce_ms = 0").unwrap_err();
        assert!(err.to_string().contains("search.debounce_ms"));
    }

    #[test]
    fn test_rejects_empty_selector() {
        let mut config = StorefrontConfig::default();
        config.seo.product_selector = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = StorefrontConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("digitalStoreCart"));
        assert_eq!(StorefrontConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_rejects_empty_seo_sources() {
        let err = StorefrontConfig::from_toml_str("[seo]\nimage_selector = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "seo.image_selector",
                ..
            }
        ));

        let mut config = StorefrontConfig::default();
        config.seo.description_selector = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("seo.description_selector"));
    }

    #[test]
    fn test_rejects_class_names_with_spaces() {
        let mut config = StorefrontConfig::default();
        config.forms.field_error_class = "border-error ring".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forms.field_error_class"));

        let mut config = StorefrontConfig::default();
        config.forms.error_marker_class = String::new();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.forms.error_element_classes = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forms.error_element_classes"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("shopfront.json");
        std::fs::write(&json_path, r#"{"search": {"min_query_chars": 2}}"#).unwrap();
        let config = StorefrontConfig::load(&json_path).unwrap();
        assert_eq!(config.search.min_query_chars, 2);

        let toml_path = dir.path().join("shopfront.toml");
        std::fs::write(&toml_path, "[cart]\nstorage_key = \"cart-v2\"").unwrap();
        let config = StorefrontConfig::load(&toml_path).unwrap();
        assert_eq!(config.cart.storage_key, "cart-v2");

        let missing = StorefrontConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
