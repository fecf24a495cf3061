//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod seo;
pub mod theme;

use clap::{Args, Subcommand};

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommand,

    /// Theme file (default: built-in theme).
    #[arg(short, long, global = true)]
    pub theme: Option<String>,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print a tailwind.config.js module.
    Tailwind {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the tokens as CSS custom properties.
    Css {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate the theme file.
    Check,
}

/// Arguments for the seo command.
#[derive(Args)]
pub struct SeoArgs {
    #[command(subcommand)]
    pub command: SeoCommand,
}

#[derive(Subcommand)]
pub enum SeoCommand {
    /// Render one JSON-LD document per product.
    Render {
        /// JSON array of products with name, price, image and description.
        products: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,

    /// Storage file holding the cart.
    #[arg(short, long, global = true, default_value = "cart.json")]
    pub file: String,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add an item, merging with an existing line of the same id.
    Add {
        /// Item id.
        id: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,

        /// Product name.
        #[arg(long)]
        name: Option<String>,

        /// Unit price.
        #[arg(long)]
        price: Option<f64>,
    },
    /// Remove every line with an id.
    Remove {
        /// Item id.
        id: String,
    },
    /// Set the quantity of an existing line.
    Set {
        /// Item id.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Delete the stored cart.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print a default configuration.
    Init {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
