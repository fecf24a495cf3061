//! Shopfront CLI - Command line tool for the storefront assets.
//!
//! Commands:
//! - `shopfront theme` - Export or check the design tokens
//! - `shopfront seo` - Render product structured data
//! - `shopfront cart` - Inspect and edit a file-backed cart
//! - `shopfront config` - Manage enhancement configuration

mod commands;
mod context;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, ConfigArgs, SeoArgs, ThemeArgs};

/// Shopfront CLI - Build-time and debugging tools for the storefront
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export or check the theme tokens
    Theme(ThemeArgs),

    /// Render schema.org structured data for products
    Seo(SeoArgs),

    /// Inspect and edit a cart stored in a file
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Theme(args) => commands::theme::run(args, &ctx),
        Commands::Seo(args) => commands::seo::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
