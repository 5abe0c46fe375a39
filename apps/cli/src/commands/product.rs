//! Product and variant commands.

use clap::Subcommand;

use kirana_core::Money;
use kirana_db::repository::product::{NewProduct, NewVariant};

use crate::error::{CliError, CliResult};
use crate::Ctx;

use super::{parse_date, parse_money};

#[derive(Subcommand)]
pub enum ProductCmd {
    /// Add a product with one variant (admin)
    Add {
        /// Product name, e.g. "Basmati Rice"
        #[arg(long)]
        name: String,

        /// Brand name (must exist)
        #[arg(long)]
        brand: String,

        /// Product type name (must exist)
        #[arg(long = "type")]
        product_type: String,

        /// Base unit, e.g. kg, l, g
        #[arg(long, default_value = "unit")]
        unit: String,

        /// HSN code for GST filings (optional)
        #[arg(long)]
        hsn: Option<String>,

        /// Variant name, e.g. "500g"
        #[arg(long)]
        variant: String,

        /// Unique SKU
        #[arg(long)]
        sku: String,

        /// Variant size in base units
        #[arg(long, default_value_t = 1.0)]
        size: f64,

        /// MRP in rupees, e.g. 45.50
        #[arg(long)]
        mrp: String,

        /// Cost price in rupees
        #[arg(long)]
        cost: String,

        /// Opening stock quantity
        #[arg(long, default_value_t = 0)]
        stock: i64,

        /// Reorder level
        #[arg(long, default_value_t = 10)]
        reorder: i64,

        /// Expiry date of the opening batch (YYYY-MM-DD)
        #[arg(long)]
        expiry: Option<String>,

        /// Batch number of the opening stock
        #[arg(long)]
        batch: Option<String>,
    },

    /// Search products by name, code, or SKU
    Search {
        term: String,

        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Look up one variant by SKU
    Show { sku: String },

    /// Deactivate a product and its variants by product code (admin)
    Deactivate { product_code: String },
}

pub async fn run(ctx: &Ctx, cmd: ProductCmd) -> CliResult<()> {
    match cmd {
        ProductCmd::Add {
            name,
            brand,
            product_type,
            unit,
            hsn,
            variant,
            sku,
            size,
            mrp,
            cost,
            stock,
            reorder,
            expiry,
            batch,
        } => {
            ctx.session.require_admin()?;

            let brand = ctx
                .db
                .catalog()
                .get_brand_by_name(&brand)
                .await?
                .ok_or_else(|| CliError::InvalidArgument(format!("unknown brand: {}", brand)))?;
            let ptype = ctx
                .db
                .catalog()
                .get_product_type_by_name(&product_type)
                .await?
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("unknown product type: {}", product_type))
                })?;

            let mrp = parse_money(&mrp).map_err(CliError::InvalidArgument)?;
            let cost = parse_money(&cost).map_err(CliError::InvalidArgument)?;
            let expiry = expiry
                .map(|s| parse_date(&s))
                .transpose()
                .map_err(CliError::InvalidArgument)?;

            let product = ctx
                .db
                .products()
                .create_with_variants(
                    NewProduct {
                        product_name: name,
                        brand_id: brand.id,
                        product_type_id: ptype.id,
                        base_unit: unit.clone(),
                        hsn_code: hsn,
                        description: None,
                    },
                    vec![NewVariant {
                        variant_name: variant,
                        sku,
                        barcode: None,
                        unit_size: size,
                        size_unit: unit,
                        mrp_paise: mrp.paise(),
                        cost_price_paise: cost.paise(),
                        is_default: true,
                        initial_stock: stock,
                        reorder_level: reorder,
                        expiry_date: expiry,
                        batch_number: batch,
                    }],
                )
                .await?;

            println!("Created {} ({})", product.product_name, product.product_code);
            Ok(())
        }

        ProductCmd::Search { term, limit } => {
            let hits = ctx.db.products().search(&term, limit).await?;
            if hits.is_empty() {
                println!("No matches.");
                return Ok(());
            }
            for hit in hits {
                println!(
                    "{:<14} {:<40} {:<12} {:>10}  stock {}",
                    hit.sku,
                    hit.display_name(),
                    hit.brand_name,
                    Money::from_paise(hit.mrp_paise).to_string(),
                    hit.stock_quantity
                );
            }
            Ok(())
        }

        ProductCmd::Show { sku } => {
            let summary = ctx
                .db
                .products()
                .get_by_sku(&sku)
                .await?
                .ok_or_else(|| CliError::InvalidArgument(format!("no variant with SKU {}", sku)))?;

            println!("{}", summary.display_name());
            println!("SKU: {}", summary.sku);
            println!("Brand: {}", summary.brand_name);
            println!("MRP: {}", Money::from_paise(summary.mrp_paise));
            println!("Stock: {}", summary.stock_quantity);
            Ok(())
        }

        ProductCmd::Deactivate { product_code } => {
            ctx.session.require_admin()?;
            ctx.db.products().deactivate(&product_code).await?;
            println!("Deactivated {}", product_code);
            Ok(())
        }
    }
}
