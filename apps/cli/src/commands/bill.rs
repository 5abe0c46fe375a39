//! Billing commands: the employee-facing core of the register.

use std::path::Path;

use clap::Subcommand;
use chrono::{Local, NaiveDate};

use kirana_core::Money;
use kirana_db::repository::bill::{BillLineInput, NewBill};
use kirana_pdf::InvoiceDocument;

use crate::error::{CliError, CliResult};
use crate::Ctx;

use super::{parse_date, parse_money};

#[derive(Subcommand)]
pub enum BillCmd {
    /// Ring up a sale and write the invoice PDF
    Create {
        /// Customer name
        #[arg(long)]
        customer: String,

        /// Customer phone (optional)
        #[arg(long)]
        phone: Option<String>,

        /// Line item as SKU:QTY, repeatable
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Flat discount in rupees, e.g. 10.00
        #[arg(long, default_value = "0")]
        discount: String,

        /// Skip writing the PDF
        #[arg(long)]
        no_pdf: bool,
    },

    /// Show one invoice with its line items
    Show {
        invoice_number: String,

        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search invoices by customer name or invoice number
    List {
        /// Search term (empty matches everything)
        #[arg(long, default_value = "")]
        term: String,

        /// Start date (YYYY-MM-DD, default 30 days ago)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, default today)
        #[arg(long)]
        to: Option<String>,

        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Void a completed invoice (admin)
    Void { invoice_number: String },
}

/// Parses "SKU:QTY" into a line input.
fn parse_line(s: &str) -> CliResult<BillLineInput> {
    let (sku, qty) = s
        .rsplit_once(':')
        .ok_or_else(|| CliError::InvalidArgument(format!("expected SKU:QTY, got {}", s)))?;
    let quantity: i64 = qty
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("invalid quantity in {}", s)))?;
    Ok(BillLineInput {
        sku: sku.trim().to_string(),
        quantity,
    })
}

pub async fn run(ctx: &Ctx, cmd: BillCmd) -> CliResult<()> {
    match cmd {
        BillCmd::Create {
            customer,
            phone,
            items,
            discount,
            no_pdf,
        } => {
            let lines = items
                .iter()
                .map(|s| parse_line(s))
                .collect::<CliResult<Vec<_>>>()?;
            let discount = parse_money(&discount).map_err(CliError::InvalidArgument)?;

            let tax_rate = ctx.db.settings().active_tax_rate().await?;
            let today = Local::now().date_naive();

            let (bill, bill_items) = ctx
                .db
                .bills()
                .create_bill(NewBill {
                    bill_date: today,
                    customer_name: customer,
                    customer_phone: phone,
                    employee_id: ctx.session.employee.id.clone(),
                    lines,
                    discount,
                    tax_rate,
                    invoice_prefix: ctx.config.invoice_prefix.clone(),
                })
                .await?;

            println!("Invoice {}", bill.invoice_number);
            for item in &bill_items {
                println!(
                    "  {} x{}  @ {}  = {}",
                    item.name_snapshot,
                    item.quantity,
                    item.unit_price(),
                    item.line_total()
                );
            }
            println!("  Subtotal: {}", bill.subtotal());
            if !bill.discount().is_zero() {
                println!("  Discount: {}", bill.discount());
            }
            println!(
                "  CGST: {}  SGST: {}  (@{}%)",
                bill.cgst(),
                bill.sgst(),
                bill.tax_rate().percentage()
            );
            println!("  Total: {}", bill.total());

            if !no_pdf {
                let company = ctx.config.company_profile();
                let path = kirana_pdf::write_invoice(
                    Path::new(&ctx.config.invoice_dir),
                    &InvoiceDocument {
                        company: &company,
                        bill: &bill,
                        items: &bill_items,
                        billed_by: &ctx.session.employee.full_name(),
                    },
                )?;
                println!("  PDF: {}", path.display());
            }
            Ok(())
        }

        BillCmd::Show {
            invoice_number,
            json,
        } => {
            let bill = ctx
                .db
                .bills()
                .get_by_invoice_number(&invoice_number)
                .await?
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("no invoice {}", invoice_number))
                })?;
            let items = ctx.db.bills().get_items(&bill.id).await?;

            if json {
                let doc = serde_json::json!({ "bill": bill, "items": items });
                println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
                return Ok(());
            }

            println!(
                "{}  {}  {:?}",
                bill.invoice_number, bill.bill_date, bill.status
            );
            println!("Customer: {}", bill.customer_name);
            for item in &items {
                println!(
                    "  {} x{}  @ {}  = {}",
                    item.name_snapshot,
                    item.quantity,
                    item.unit_price(),
                    item.line_total()
                );
            }
            println!(
                "Subtotal {}  Discount {}  Tax {}  Total {}",
                bill.subtotal(),
                bill.discount(),
                bill.tax(),
                bill.total()
            );
            Ok(())
        }

        BillCmd::List {
            term,
            from,
            to,
            limit,
        } => {
            let today = Local::now().date_naive();
            let to: NaiveDate = match to {
                Some(s) => parse_date(&s).map_err(CliError::InvalidArgument)?,
                None => today,
            };
            let from: NaiveDate = match from {
                Some(s) => parse_date(&s).map_err(CliError::InvalidArgument)?,
                None => today - chrono::Duration::days(29),
            };

            let bills = ctx.db.bills().search(&term, from, to, limit).await?;
            if bills.is_empty() {
                println!("No invoices found.");
                return Ok(());
            }

            let mut total = Money::zero();
            for bill in &bills {
                println!(
                    "{}  {}  {:<24}  {}  {:?}",
                    bill.invoice_number,
                    bill.bill_date,
                    bill.customer_name,
                    bill.total(),
                    bill.status
                );
                total += bill.total();
            }
            println!("{} invoices, {}", bills.len(), total);
            Ok(())
        }

        BillCmd::Void { invoice_number } => {
            ctx.session.require_admin()?;
            ctx.db.bills().void(&invoice_number).await?;
            println!("Voided {}", invoice_number);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = parse_line("RICE-500:4").unwrap();
        assert_eq!(line.sku, "RICE-500");
        assert_eq!(line.quantity, 4);

        assert!(parse_line("RICE-500").is_err());
        assert!(parse_line("RICE-500:four").is_err());
    }
}
