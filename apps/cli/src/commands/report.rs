//! Reporting commands over the analytics views.

use clap::Subcommand;
use chrono::Local;

use kirana_core::analytics::RangePreset;
use kirana_core::Money;

use crate::error::{CliError, CliResult};
use crate::Ctx;

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Sales KPIs and per-day breakdown
    Sales {
        /// Window: 7d, 30d, 90d, 365d, mtd, ytd
        #[arg(long, default_value = "30d")]
        range: String,

        /// Also break revenue down by product type and brand
        #[arg(long)]
        breakdown: bool,
    },

    /// Inventory health: stock status per variant
    Inventory,

    /// Per-variant margins
    Profit,

    /// Supplier sourcing rollups
    Suppliers,
}

fn parse_range(s: &str) -> CliResult<RangePreset> {
    RangePreset::parse(s).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "unknown range {} (expected 7d, 30d, 90d, 365d, mtd, ytd)",
            s
        ))
    })
}

pub async fn run(ctx: &Ctx, cmd: ReportCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        ReportCmd::Sales { range, breakdown } => {
            let today = Local::now().date_naive();
            let range = parse_range(&range)?.date_bounds(today);

            let kpis = ctx.db.analytics().sales_kpis(range).await?;
            println!("Sales {} to {}", range.start, range.end);
            println!(
                "Revenue: {}  ({:+.1}% vs previous period)",
                Money::from_paise(kpis.revenue_paise),
                kpis.revenue_growth_percent
            );
            println!(
                "Bills: {}  ({:+.1}%)   Avg bill: {}",
                kpis.bill_count,
                kpis.bill_count_growth_percent,
                Money::from_paise(kpis.avg_bill_paise)
            );

            println!();
            for day in ctx.db.analytics().sales_daily(range).await? {
                println!(
                    "{}  {:>4} bills  {:>14}  tax {}",
                    day.bill_date,
                    day.bill_count,
                    Money::from_paise(day.gross_revenue_paise).to_string(),
                    Money::from_paise(day.tax_paise)
                );
            }

            if breakdown {
                println!();
                println!("By product type:");
                for row in ctx.db.analytics().sales_by_type(range).await? {
                    println!(
                        "  {:<20} {:>6} units  {}",
                        row.label,
                        row.units_sold,
                        Money::from_paise(row.revenue_paise)
                    );
                }
                println!("By brand:");
                for row in ctx.db.analytics().sales_by_brand(range).await? {
                    println!(
                        "  {:<20} {:>6} units  {}",
                        row.label,
                        row.units_sold,
                        Money::from_paise(row.revenue_paise)
                    );
                }
            }
            Ok(())
        }

        ReportCmd::Inventory => {
            let kpis = ctx.db.analytics().inventory_kpis().await?;
            println!(
                "{} variants, stock value {}",
                kpis.total_variants,
                Money::from_paise(kpis.stock_value_paise)
            );
            println!(
                "expired {}  out of stock {}  low {}  overstock {}  expiring soon {}",
                kpis.expired, kpis.out_of_stock, kpis.low, kpis.overstock, kpis.expiring_soon
            );

            println!();
            for row in ctx.db.analytics().inventory_health().await? {
                let expiring = if row.expiring_soon { "  [expiring]" } else { "" };
                println!(
                    "{:<13} {:<14} {:<40} {:>5}{}",
                    row.stock_status,
                    row.sku,
                    format!("{} ({})", row.product_name, row.variant_name),
                    row.stock_quantity,
                    expiring
                );
            }
            Ok(())
        }

        ReportCmd::Profit => {
            for row in ctx.db.analytics().profitability().await? {
                println!(
                    "{:>6.1}%  {:<14} {:<40} mrp {}  cost {}",
                    row.margin_percent,
                    row.sku,
                    format!("{} ({})", row.product_name, row.variant_name),
                    Money::from_paise(row.mrp_paise),
                    Money::from_paise(row.cost_price_paise)
                );
            }
            Ok(())
        }

        ReportCmd::Suppliers => {
            for row in ctx.db.analytics().supplier_performance().await? {
                println!(
                    "{:<30} rating {:.1}  {} products  lead {:.0}d avg ({} to {})  avg cost {}",
                    row.supplier_name,
                    row.rating,
                    row.product_count,
                    row.avg_lead_time_days,
                    row.min_lead_time_days,
                    row.max_lead_time_days,
                    Money::from_paise(row.avg_unit_cost_paise)
                );
            }
            Ok(())
        }
    }
}
