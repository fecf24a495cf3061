//! Structured data rendering.

use std::fs;

use anyhow::{Context as _, Result};
use shopfront_core::SeoConfig;
use shopfront_enhance::{ProductSnapshot, ProductStructuredData};

use super::{SeoArgs, SeoCommand};
use crate::context::Context;

/// Run the seo command.
pub fn run(args: SeoArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SeoCommand::Render { products } => render(&products, ctx),
    }
}

fn render(path: &str, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(path);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read products: {}", path.display()))?;
    let products: Vec<ProductSnapshot> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse products: {}", path.display()))?;

    let documents = documents(&products, &ctx.config.seo);
    let skipped = products.len() - documents.len();
    if skipped > 0 {
        ctx.output
            .warn(&format!("Skipped {} product(s) without a name or price", skipped));
    }

    if ctx.output.is_json() {
        ctx.output.json(&documents);
        return Ok(());
    }

    for document in &documents {
        let json = serde_json::to_string_pretty(document)?;
        ctx.output.raw(&format!(
            "<script type=\"application/ld+json\">\n{}\n</script>",
            json
        ));
    }
    Ok(())
}

/// Documents for the products that have a name and price, in input order.
pub fn documents(products: &[ProductSnapshot], config: &SeoConfig) -> Vec<ProductStructuredData> {
    products
        .iter()
        .filter_map(|product| ProductStructuredData::from_snapshot(product, config))
        .collect()
}
