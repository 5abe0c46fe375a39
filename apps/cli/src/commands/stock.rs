//! Stock commands: goods inward, corrections, and the reorder report.

use clap::Subcommand;

use crate::error::{CliError, CliResult};
use crate::Ctx;

use super::parse_date;

#[derive(Subcommand)]
pub enum StockCmd {
    /// Receive stock against a SKU
    Receive {
        sku: String,
        quantity: i64,

        /// Batch number of the goods received
        #[arg(long)]
        batch: Option<String>,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry: Option<String>,
    },

    /// Set the absolute stock quantity after a stock-take (admin)
    Adjust { sku: String, quantity: i64 },

    /// Set the reorder level for a SKU (admin)
    SetReorder { sku: String, level: i64 },

    /// Show current stock for a SKU
    Status { sku: String },

    /// List variants at or below their reorder level
    Low,
}

/// Resolves a SKU to its variant id or errors.
async fn resolve_variant(ctx: &Ctx, sku: &str) -> CliResult<String> {
    let summary = ctx
        .db
        .products()
        .get_by_sku(sku)
        .await?
        .ok_or_else(|| CliError::InvalidArgument(format!("no variant with SKU {}", sku)))?;
    Ok(summary.variant_id)
}

pub async fn run(ctx: &Ctx, cmd: StockCmd) -> CliResult<()> {
    match cmd {
        StockCmd::Receive {
            sku,
            quantity,
            batch,
            expiry,
        } => {
            let variant_id = resolve_variant(ctx, &sku).await?;
            let expiry = expiry
                .map(|s| parse_date(&s))
                .transpose()
                .map_err(CliError::InvalidArgument)?;

            ctx.db
                .inventory()
                .restock(&variant_id, quantity, batch.as_deref(), expiry)
                .await?;
            println!("Received {} x {}", quantity, sku);
            Ok(())
        }

        StockCmd::Adjust { sku, quantity } => {
            ctx.session.require_admin()?;
            let variant_id = resolve_variant(ctx, &sku).await?;
            ctx.db.inventory().adjust(&variant_id, quantity).await?;
            println!("Stock of {} set to {}", sku, quantity);
            Ok(())
        }

        StockCmd::SetReorder { sku, level } => {
            ctx.session.require_admin()?;
            let variant_id = resolve_variant(ctx, &sku).await?;
            ctx.db
                .inventory()
                .set_reorder_level(&variant_id, level)
                .await?;
            println!("Reorder level of {} set to {}", sku, level);
            Ok(())
        }

        StockCmd::Status { sku } => {
            let variant_id = resolve_variant(ctx, &sku).await?;
            let record = ctx
                .db
                .inventory()
                .get(&variant_id)
                .await?
                .ok_or_else(|| CliError::InvalidArgument(format!("no inventory for {}", sku)))?;

            println!("{}: {} in stock", sku, record.stock_quantity);
            println!("Reorder level: {}", record.reorder_level);
            if let Some(expiry) = record.expiry_date {
                println!("Expiry: {}", expiry);
            }
            if let Some(batch) = record.batch_number {
                println!("Batch: {}", batch);
            }
            Ok(())
        }

        StockCmd::Low => {
            let rows = ctx.db.inventory().low_stock().await?;
            if rows.is_empty() {
                println!("Nothing at or below reorder level.");
                return Ok(());
            }
            for row in rows {
                println!(
                    "{:<14} {:<40} {:>5} / reorder {}",
                    row.sku,
                    format!("{} ({})", row.product_name, row.variant_name),
                    row.stock_quantity,
                    row.reorder_level
                );
            }
            Ok(())
        }
    }
}
