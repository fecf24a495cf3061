//! Theme export commands.

use std::fs;

use anyhow::{Context as _, Result};
use shopfront_theme::{to_css_variables, to_tailwind_config, ThemeConfig};

use super::{ThemeArgs, ThemeCommand};
use crate::context::Context;

/// Run the theme command.
pub fn run(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let theme = load_theme(args.theme.as_deref(), ctx)?;

    match args.command {
        ThemeCommand::Tailwind { output } => emit(&to_tailwind_config(&theme), output, ctx),
        ThemeCommand::Css { output } => emit(&to_css_variables(&theme), output, ctx),
        ThemeCommand::Check => check(&theme, ctx),
    }
}

fn load_theme(path: Option<&str>, ctx: &Context) -> Result<ThemeConfig> {
    match path {
        Some(path) => {
            let path = ctx.resolve_path(path);
            ctx.output.debug(&format!("Loading theme from {}", path.display()));
            ThemeConfig::load(&path)
                .with_context(|| format!("Failed to load theme: {}", path.display()))
        }
        None => {
            ctx.output.debug("Using built-in theme");
            Ok(ThemeConfig::default())
        }
    }
}

fn emit(content: &str, output: Option<String>, ctx: &Context) -> Result<()> {
    match output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Created: {}", path.display()));
        }
        None => ctx.output.raw(content),
    }
    Ok(())
}

fn check(theme: &ThemeConfig, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(theme);
        return Ok(());
    }

    ctx.output.success("Theme is valid");
    ctx.output.kv("colors", &theme.colors.len().to_string());
    ctx.output.kv("fonts", &theme.font_family.len().to_string());
    for glob in &theme.content {
        ctx.output.list_item(glob);
    }
    Ok(())
}
