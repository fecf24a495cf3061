//! File-backed cart commands.

use anyhow::{bail, Result};
use shopfront_cart::{CartStore, LineItem, LineItemId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::store::FileStore;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    ctx.output.debug(&format!("Cart file: {}", path.display()));
    let mut cart = CartStore::new(FileStore::new(path), ctx.config.cart.storage_key.clone())
        .with_logger(ctx.logger.clone());

    match args.command {
        CartCommand::Show => {}
        CartCommand::Add {
            id,
            quantity,
            name,
            price,
        } => {
            let mut item = LineItem::new(id.as_str(), quantity);
            if let Some(name) = name {
                item = item.with_detail("name", name);
            }
            if let Some(price) = price {
                item = item.with_detail("price", price);
            }
            cart.add_item(item)?;
            ctx.output.success(&format!("Added {} x {}", quantity, id));
        }
        CartCommand::Remove { id } => {
            cart.remove_item(&LineItemId::new(id.as_str()))?;
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Set { id, quantity } => {
            if !cart.update_quantity(&LineItemId::new(id.as_str()), quantity)? {
                bail!("No item with id {} in the cart", id);
            }
            ctx.output.success(&format!("Set {} to {}", id, quantity));
        }
        CartCommand::Clear => {
            cart.clear_cart()?;
            ctx.output.success("Cart cleared");
        }
    }

    show(&cart, ctx);
    Ok(())
}

fn show(cart: &CartStore<FileStore>, ctx: &Context) {
    let items = cart.get_cart();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": items,
            "item_count": cart.item_count(),
        }));
        return;
    }

    ctx.output.header("Cart");
    if items.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    let widths = [20, 8, 24];
    ctx.output.table_row(&["ID", "QTY", "NAME"], &widths);
    for item in &items {
        let quantity = item.quantity.to_string();
        ctx.output.table_row(
            &[item.id.as_str(), quantity.as_str(), item.name().unwrap_or("-")],
            &widths,
        );
    }
    ctx.output.kv("items", &cart.item_count().to_string());
}
