//! Supplier commands.

use clap::Subcommand;

use kirana_core::Money;
use kirana_db::repository::supplier::{NewSupplier, SupplierLink};

use crate::error::{CliError, CliResult};
use crate::Ctx;

use super::parse_money;

#[derive(Subcommand)]
pub enum SupplierCmd {
    /// Add a supplier
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        gstin: Option<String>,

        /// Rating 0.0 to 5.0
        #[arg(long, default_value_t = 0.0)]
        rating: f64,
    },

    /// List active suppliers, best-rated first
    List,

    /// Link a product to a supplier with sourcing terms
    Link {
        /// Product code, e.g. PRD0001
        #[arg(long)]
        product: String,

        /// Supplier id (from `supplier list`)
        #[arg(long)]
        supplier: String,

        /// Unit cost in rupees
        #[arg(long)]
        cost: String,

        /// Lead time in days
        #[arg(long, default_value_t = 7)]
        lead_time: i64,

        /// Minimum order quantity
        #[arg(long, default_value_t = 1)]
        min_qty: i64,

        /// Mark as the preferred source
        #[arg(long)]
        preferred: bool,
    },

    /// Deactivate a supplier
    Deactivate { id: String },
}

pub async fn run(ctx: &Ctx, cmd: SupplierCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        SupplierCmd::Add {
            name,
            contact,
            phone,
            email,
            gstin,
            rating,
        } => {
            let supplier = ctx
                .db
                .suppliers()
                .create(NewSupplier {
                    supplier_name: name,
                    contact_person: contact,
                    phone,
                    email,
                    gstin,
                    rating,
                })
                .await?;
            println!("Created {} ({})", supplier.supplier_name, supplier.id);
            Ok(())
        }

        SupplierCmd::List => {
            for s in ctx.db.suppliers().list().await? {
                println!(
                    "{}  {:<30} rating {:.1}  {}",
                    s.id, s.supplier_name, s.rating, s.phone
                );
            }
            Ok(())
        }

        SupplierCmd::Link {
            product,
            supplier,
            cost,
            lead_time,
            min_qty,
            preferred,
        } => {
            let product = ctx
                .db
                .products()
                .get_by_code(&product)
                .await?
                .ok_or_else(|| CliError::InvalidArgument(format!("unknown product: {}", product)))?;
            let cost = parse_money(&cost).map_err(CliError::InvalidArgument)?;

            ctx.db
                .suppliers()
                .link_product(
                    &product.id,
                    &supplier,
                    SupplierLink {
                        unit_cost_paise: cost.paise(),
                        lead_time_days: lead_time,
                        min_order_qty: min_qty,
                        is_preferred: preferred,
                    },
                )
                .await?;
            println!(
                "Linked {} at {} per unit, {} day lead time",
                product.product_name,
                Money::from_paise(cost.paise()),
                lead_time
            );
            Ok(())
        }

        SupplierCmd::Deactivate { id } => {
            ctx.db.suppliers().deactivate(&id).await?;
            println!("Deactivated supplier {}", id);
            Ok(())
        }
    }
}
