//! Theme tokens.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ThemeError;

/// Shades of one named color. Any shade may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(rename = "DEFAULT", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

impl ColorScale {
    /// Scale with all three shades.
    pub fn new(dark: &str, default: &str, light: &str) -> Self {
        Self {
            dark: Some(dark.to_string()),
            default: Some(default.to_string()),
            light: Some(light.to_string()),
        }
    }

    /// Scale with only the default shade.
    pub fn single(default: &str) -> Self {
        Self {
            default: Some(default.to_string()),
            ..Self::default()
        }
    }

    /// Present shades as `(suffix, value)`, darkest first. The default
    /// shade has an empty suffix.
    pub fn shades(&self) -> Vec<(&'static str, &str)> {
        [
            ("dark", self.dark.as_deref()),
            ("", self.default.as_deref()),
            ("light", self.light.as_deref()),
        ]
        .into_iter()
        .filter_map(|(suffix, value)| value.map(|v| (suffix, v)))
        .collect()
    }
}

/// The storefront theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Source globs scanned for class names.
    #[serde(default = "default_content")]
    pub content: Vec<String>,

    /// Named color scales.
    #[serde(default = "default_colors")]
    pub colors: BTreeMap<String, ColorScale>,

    /// Named font stacks, most preferred first.
    #[serde(default = "default_fonts")]
    pub font_family: BTreeMap<String, Vec<String>>,
}

fn default_content() -> Vec<String> {
    vec![
        "./src/pages/**/*.{js,ts,jsx,tsx}".to_string(),
        "./src/components/**/*.{js,ts,jsx,tsx}".to_string(),
    ]
}

fn default_colors() -> BTreeMap<String, ColorScale> {
    BTreeMap::from([
        (
            "primary".to_string(),
            ColorScale::new("#1A237E", "#3949AB", "#7986CB"),
        ),
        ("accent".to_string(), ColorScale::single("#FFC107")),
        ("success".to_string(), ColorScale::single("#4CAF50")),
        ("error".to_string(), ColorScale::single("#F44336")),
        (
            "neutral".to_string(),
            ColorScale::new("#212121", "#757575", "#EEEEEE"),
        ),
    ])
}

fn default_fonts() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "cairo".to_string(),
            vec!["Cairo".to_string(), "sans-serif".to_string()],
        ),
        (
            "tajawal".to_string(),
            vec!["Tajawal".to_string(), "sans-serif".to_string()],
        ),
    ])
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            colors: default_colors(),
            font_family: default_fonts(),
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a TOML theme.
    pub fn from_toml_str(content: &str) -> Result<Self, ThemeError> {
        let theme: Self = toml::from_str(content)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load and validate a TOML theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check token names, color values and font stacks.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for (name, scale) in &self.colors {
            check_name(name)?;
            for (suffix, value) in scale.shades() {
                if !is_hex_color(value) {
                    let token = if suffix.is_empty() {
                        name.clone()
                    } else {
                        format!("{}-{}", name, suffix)
                    };
                    return Err(ThemeError::InvalidColor {
                        token,
                        value: value.to_string(),
                    });
                }
            }
        }

        for (name, stack) in &self.font_family {
            check_name(name)?;
            if stack.iter().all(|f| f.trim().is_empty()) {
                return Err(ThemeError::EmptyFontStack(name.clone()));
            }
        }

        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), ThemeError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ThemeError::InvalidName(name.to_string()))
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_valid() {
        let theme = ThemeConfig::default();
        assert!(theme.validate().is_ok());
        assert_eq!(theme.colors["primary"].default.as_deref(), Some("#3949AB"));
        assert_eq!(theme.font_family["tajawal"][0], "Tajawal");
    }

    #[test]
    fn test_toml_overrides_colors() {
        let theme = ThemeConfig::from_toml_str(
            r##"
            [colors.brand]
            DEFAULT = "#0a0"
            light = "#ccffcc"
            "##,
        )
        .unwrap();
        assert_eq!(theme.colors.len(), 1);
        assert_eq!(theme.colors["brand"].shades(), vec![("", "#0a0"), ("light", "#ccffcc")]);
        assert_eq!(theme.font_family, default_fonts());
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = ThemeConfig::from_toml_str(
            r##"
            [colors.primary]
            dark = "navy"
            "##,
        )
        .unwrap_err();
        match err {
            ThemeError::InvalidColor { token, value } => {
                assert_eq!(token, "primary-dark");
                assert_eq!(value, "navy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_name_and_empty_stack() {
        let mut theme = ThemeConfig::default();
        theme
            .colors
            .insert("Primary Blue".to_string(), ColorScale::single("#000"));
        assert!(matches!(theme.validate(), Err(ThemeError::InvalidName(_))));

        let mut theme = ThemeConfig::default();
        theme.font_family.insert("body".to_string(), vec![" ".to_string()]);
        assert!(matches!(
            theme.validate(),
            Err(ThemeError::EmptyFontStack(name)) if name == "body"
        ));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#FFF"));
        assert!(is_hex_color("#a1b2c3"));
        assert!(!is_hex_color("FFF"));
        assert!(!is_hex_color("#FFFF"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
