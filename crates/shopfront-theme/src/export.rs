//! Tailwind and CSS exports.

use std::fmt::Write as _;

use crate::ThemeConfig;

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
];

/// Render a `tailwind.config.js` module extending the default theme.
pub fn to_tailwind_config(theme: &ThemeConfig) -> String {
    let mut out = String::new();
    out.push_str("/** @type {import('tailwindcss').Config} */\n");
    out.push_str("module.exports = {\n");

    out.push_str("  content: [\n");
    for glob in &theme.content {
        let _ = writeln!(out, "    {},", js_string(glob));
    }
    out.push_str("  ],\n");

    out.push_str("  theme: {\n    extend: {\n      colors: {\n");
    for (name, scale) in &theme.colors {
        let _ = writeln!(out, "        {}: {{", js_key(name));
        for (suffix, value) in scale.shades() {
            let key = if suffix.is_empty() { "DEFAULT" } else { suffix };
            let _ = writeln!(out, "          {}: {},", key, js_string(value));
        }
        out.push_str("        },\n");
    }
    out.push_str("      },\n      fontFamily: {\n");
    for (name, stack) in &theme.font_family {
        let fonts: Vec<String> = stack.iter().map(|f| js_string(f)).collect();
        let _ = writeln!(out, "        {}: [{}],", js_key(name), fonts.join(", "));
    }
    out.push_str("      },\n    },\n  },\n  plugins: [],\n}\n");
    out
}

/// Render the tokens as CSS custom properties on `:root`.
///
/// Colors become `--color-<name>[-<shade>]`, fonts `--font-<name>`.
pub fn to_css_variables(theme: &ThemeConfig) -> String {
    let mut out = String::from(":root {\n");
    for (name, scale) in &theme.colors {
        for (suffix, value) in scale.shades() {
            if suffix.is_empty() {
                let _ = writeln!(out, "  --color-{}: {};", name, value);
            } else {
                let _ = writeln!(out, "  --color-{}-{}: {};", name, suffix, value);
            }
        }
    }
    for (name, stack) in &theme.font_family {
        let fonts: Vec<String> = stack.iter().map(|f| css_font(f)).collect();
        let _ = writeln!(out, "  --font-{}: {};", name, fonts.join(", "));
    }
    out.push_str("}\n");
    out
}

fn js_string(value: &str) -> String {
    // JSON string literals are valid JavaScript string literals.
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_key(name: &str) -> String {
    if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
    {
        name.to_string()
    } else {
        js_string(name)
    }
}

fn css_font(font: &str) -> String {
    let font = font.trim();
    if GENERIC_FAMILIES.contains(&font) {
        font.to_string()
    } else {
        format!("\"{}\"", font.replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorScale;

    #[test]
    fn test_tailwind_default_theme() {
        let js = to_tailwind_config(&ThemeConfig::default());
        assert!(js.starts_with("/** @type {import('tailwindcss').Config} */\nmodule.exports = {"));
        assert!(js.contains("    \"./src/pages/**/*.{js,ts,jsx,tsx}\",\n"));
        assert!(js.contains(
            "        primary: {\n          dark: \"#1A237E\",\n          DEFAULT: \"#3949AB\",\n          light: \"#7986CB\",\n        },\n"
        ));
        assert!(js.contains("        accent: {\n          DEFAULT: \"#FFC107\",\n        },\n"));
        assert!(js.contains("        cairo: [\"Cairo\", \"sans-serif\"],\n"));
        assert!(js.ends_with("  plugins: [],\n}\n"));
    }

    #[test]
    fn test_tailwind_quotes_dashed_keys() {
        let mut theme = ThemeConfig::default();
        theme.colors.clear();
        theme
            .colors
            .insert("brand-blue".to_string(), ColorScale::single("#00f"));
        let js = to_tailwind_config(&theme);
        assert!(js.contains("        \"brand-blue\": {\n"));
    }

    #[test]
    fn test_css_variables() {
        let css = to_css_variables(&ThemeConfig::default());
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary-dark: #1A237E;\n"));
        assert!(css.contains("  --color-primary: #3949AB;\n"));
        assert!(css.contains("  --color-error: #F44336;\n"));
        assert!(css.contains("  --font-cairo: \"Cairo\", sans-serif;\n"));
        assert!(css.ends_with("}\n"));
    }
}
