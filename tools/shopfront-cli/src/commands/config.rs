//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use shopfront_core::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { output, force } => init_config(output.as_deref(), force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.info(&format!("Loaded from {}", path.display())),
        None => ctx.output.info("No config file found, showing defaults"),
    }
    ctx.output.raw(&ctx.config.to_toml_string()?);
    Ok(())
}

fn init_config(output: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let content = StorefrontConfig::default().to_toml_string()?;

    let Some(output) = output else {
        ctx.output.raw(&content);
        return Ok(());
    };

    let config_path = ctx.resolve_path(output);
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `shopfront config init` to create one.");
    };

    ctx.config.validate()?;
    ctx.output
        .success(&format!("Configuration is valid: {}", path.display()));
    Ok(())
}
