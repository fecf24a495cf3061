//! Design tokens for the storefront.
//!
//! The theme is a set of named color scales and font stacks consumed by
//! the stylesheet build. It can be loaded from TOML and exported either as
//! a `tailwind.config.js` module or as CSS custom properties.

mod error;
mod export;
mod tokens;

pub use error::ThemeError;
pub use export::{to_css_variables, to_tailwind_config};
pub use tokens::{ColorScale, ThemeConfig};
