//! # kirana-pdf: GST Invoice Rendering for Kirana POS
//!
//! Renders a completed bill into a single-page A4 GST invoice.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Shop name / address / GSTIN          TAX INVOICE            │
//! │                                       INV-20260108-0001      │
//! │  ──────────────────────────────────────────────────────────  │
//! │  Bill To:                 Details:                           │
//! │  Customer name            Date / Billed by                   │
//! │                                                              │
//! │  #  Item           SKU        Qty    Rate       Amount       │
//! │  ──────────────────────────────────────────────────────────  │
//! │  1  Rice (500g)    RICE-500     4    45.50      182.00       │
//! │  ──────────────────────────────────────────────────────────  │
//! │                         Subtotal / Discount                  │
//! │                         CGST @ 9% / SGST @ 9%                │
//! │                         TOTAL                                │
//! │  Amount in words: ... Rupees Only                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Built-in Helvetica has no rupee glyph, so amounts print as `Rs.`.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use kirana_core::{Bill, BillItem, Money};

pub mod words;

pub use words::{amount_in_words, money_in_words};

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur while rendering or writing an invoice PDF.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// The line items do not fit on a single A4 page.
    #[error("Too many line items for one page: {count}")]
    TooManyItems { count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PdfResult<T> = Result<T, PdfError>;

// =============================================================================
// Inputs
// =============================================================================

/// Shop identity printed in the invoice header.
#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub shop_name: String,
    pub address: String,
    pub gstin: Option<String>,
    pub phone: Option<String>,
}

/// Everything needed to render one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDocument<'a> {
    pub company: &'a CompanyProfile,
    pub bill: &'a Bill,
    pub items: &'a [BillItem],
    /// Full name of the employee who rang up the sale.
    pub billed_by: &'a str,
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Formats money as `Rs. 1,06,200.00` style with Indian digit grouping
/// (last three digits, then pairs).
fn format_money(amount: Money) -> String {
    let rupees = amount.rupees().abs();
    let paise = amount.paise_part();
    let sign = if amount.is_negative() { "-" } else { "" };

    let digits = rupees.to_string();
    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
    }

    format!("{}Rs. {}.{:02}", sign, grouped, paise)
}

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(15.0), Mm(y)), false),
            (printpdf::Point::new(Mm(195.0), Mm(y)), false),
        ],
        is_closed: false,
    });
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a bill as PDF bytes. The caller decides where they go
/// (disk, email attachment, printer spool).
pub fn render_invoice(doc_input: &InvoiceDocument<'_>) -> PdfResult<Vec<u8>> {
    let bill = doc_input.bill;
    let company = doc_input.company;

    let (doc, page1, layer1) =
        PdfDocument::new(&bill.invoice_number, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    let mut y: f32 = 285.0;

    // Header: shop (left)
    push_line(&layer, &font_bold, &company.shop_name, 16.0, 15.0, y);
    y -= 7.0;
    push_line(&layer, &font, &company.address, 10.0, 15.0, y);
    y -= 5.0;
    if let Some(gstin) = &company.gstin {
        push_line(&layer, &font, &format!("GSTIN: {}", gstin), 10.0, 15.0, y);
        y -= 5.0;
    }
    if let Some(phone) = &company.phone {
        push_line(&layer, &font, &format!("Phone: {}", phone), 10.0, 15.0, y);
    }

    // Header: title (right)
    push_line(&layer, &font_bold, "TAX INVOICE", 22.0, 138.0, 285.0);
    push_line(&layer, &font_bold, &bill.invoice_number, 12.0, 138.0, 277.0);

    y = 263.0;
    divider(&layer, y);

    // Customer + invoice details
    y -= 10.0;
    push_line(&layer, &font_bold, "Bill To:", 12.0, 15.0, y);
    push_line(&layer, &font_bold, "Details:", 12.0, 120.0, y);

    y -= 7.0;
    push_line(&layer, &font, &bill.customer_name, 10.0, 15.0, y);
    push_line(
        &layer,
        &font,
        &format!("Date: {}", bill.bill_date.format("%d-%m-%Y")),
        10.0,
        120.0,
        y,
    );

    y -= 5.0;
    if let Some(phone) = &bill.customer_phone {
        push_line(&layer, &font, &format!("Phone: {}", phone), 10.0, 15.0, y);
    }
    push_line(
        &layer,
        &font,
        &format!("Billed by: {}", doc_input.billed_by),
        10.0,
        120.0,
        y,
    );

    y -= 12.0;

    // Items table header
    let x_idx = 15.0;
    let x_name = 23.0;
    let x_sku = 95.0;
    let x_qty = 130.0;
    let x_rate = 145.0;
    let x_total = 172.0;

    push_line(&layer, &font_bold, "#", 10.0, x_idx, y);
    push_line(&layer, &font_bold, "Item", 10.0, x_name, y);
    push_line(&layer, &font_bold, "SKU", 10.0, x_sku, y);
    push_line(&layer, &font_bold, "Qty", 10.0, x_qty, y);
    push_line(&layer, &font_bold, "Rate", 10.0, x_rate, y);
    push_line(&layer, &font_bold, "Amount", 10.0, x_total, y);

    y -= 3.5;
    divider(&layer, y);
    y -= 7.0;

    // Rows
    for (idx, item) in doc_input.items.iter().enumerate() {
        if y < 75.0 {
            return Err(PdfError::TooManyItems {
                count: doc_input.items.len(),
            });
        }

        push_line(&layer, &font, &format!("{}", idx + 1), 10.0, x_idx, y);
        push_line(&layer, &font, &item.name_snapshot, 10.0, x_name, y);
        push_line(&layer, &font, &item.sku_snapshot, 10.0, x_sku, y);
        push_line(&layer, &font, &item.quantity.to_string(), 10.0, x_qty, y);
        push_line(&layer, &font, &format_money(item.unit_price()), 10.0, x_rate, y);
        push_line(&layer, &font, &format_money(item.line_total()), 10.0, x_total, y);

        y -= 6.0;
    }

    y -= 4.0;
    divider(&layer, y);

    // Totals block (right-aligned labels at x_rate)
    let half_rate = bill.tax_rate().half_percentage();

    y -= 10.0;
    push_line(&layer, &font, "Subtotal:", 11.0, x_rate, y);
    push_line(&layer, &font, &format_money(bill.subtotal()), 11.0, x_total, y);

    if !bill.discount().is_zero() {
        y -= 7.0;
        push_line(&layer, &font, "Discount:", 11.0, x_rate, y);
        push_line(
            &layer,
            &font,
            &format!("-{}", format_money(bill.discount())),
            11.0,
            x_total,
            y,
        );
    }

    y -= 7.0;
    push_line(&layer, &font, &format!("CGST @ {}%:", half_rate), 11.0, x_rate, y);
    push_line(&layer, &font, &format_money(bill.cgst()), 11.0, x_total, y);

    y -= 7.0;
    push_line(&layer, &font, &format!("SGST @ {}%:", half_rate), 11.0, x_rate, y);
    push_line(&layer, &font, &format_money(bill.sgst()), 11.0, x_total, y);

    y -= 9.0;
    push_line(&layer, &font_bold, "TOTAL:", 13.0, x_rate, y);
    push_line(&layer, &font_bold, &format_money(bill.total()), 13.0, x_total, y);

    // Amount in words
    y -= 12.0;
    push_line(
        &layer,
        &font,
        &format!("Amount in words: {}", money_in_words(bill.total())),
        10.0,
        15.0,
        y,
    );

    // Footer
    push_line(&layer, &font, "Thank you, visit again!", 9.0, 15.0, 12.0);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| PdfError::Render(e.to_string()))?;

    debug!(
        invoice = %bill.invoice_number,
        bytes = bytes.len(),
        "Invoice rendered"
    );
    Ok(bytes)
}

/// Renders an invoice and writes it to `dir` as `{invoice_number}.pdf`.
/// Returns the path written.
pub fn write_invoice(dir: &Path, doc_input: &InvoiceDocument<'_>) -> PdfResult<PathBuf> {
    let bytes = render_invoice(doc_input)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.pdf", doc_input.bill.invoice_number));
    std::fs::write(&path, bytes)?;

    Ok(path)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use kirana_core::BillStatus;

    fn company() -> CompanyProfile {
        CompanyProfile {
            shop_name: "Gupta Kirana Store".to_string(),
            address: "12 MG Road, Pune 411001".to_string(),
            gstin: Some("27AAPFU0939F1ZV".to_string()),
            phone: Some("9876543210".to_string()),
        }
    }

    fn sample_bill() -> (Bill, Vec<BillItem>) {
        let bill = Bill {
            id: "b1".to_string(),
            invoice_number: "INV-20260108-0001".to_string(),
            bill_date: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
            customer_name: "Ramesh Kumar".to_string(),
            customer_phone: Some("9123456780".to_string()),
            employee_id: "e1".to_string(),
            subtotal_paise: 100_000,
            discount_paise: 10_000,
            tax_rate_bps: 1800,
            tax_paise: 16_200,
            cgst_paise: 8_100,
            sgst_paise: 8_100,
            total_paise: 106_200,
            status: BillStatus::Completed,
            created_at: Utc::now(),
        };
        let items = vec![BillItem {
            id: "i1".to_string(),
            bill_id: "b1".to_string(),
            variant_id: "v1".to_string(),
            sku_snapshot: "RICE-500".to_string(),
            name_snapshot: "Basmati Rice (500g)".to_string(),
            quantity: 4,
            unit_price_paise: 25_000,
            line_total_paise: 100_000,
        }];
        (bill, items)
    }

    #[test]
    fn test_format_money_indian_grouping() {
        assert_eq!(format_money(Money::from_paise(106_200)), "Rs. 1,062.00");
        assert_eq!(format_money(Money::from_paise(12_34_56_789)), "Rs. 12,34,567.89");
        assert_eq!(format_money(Money::from_paise(-550)), "-Rs. 5.50");
        assert_eq!(format_money(Money::zero()), "Rs. 0.00");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let profile = company();
        let (bill, items) = sample_bill();
        let bytes = render_invoice(&InvoiceDocument {
            company: &profile,
            bill: &bill,
            items: &items,
            billed_by: "Asha Verma",
        })
        .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_too_many_items_rejected() {
        let profile = company();
        let (bill, items) = sample_bill();
        let many: Vec<BillItem> = (0..60).map(|_| items[0].clone()).collect();

        let err = render_invoice(&InvoiceDocument {
            company: &profile,
            bill: &bill,
            items: &many,
            billed_by: "Asha Verma",
        })
        .unwrap_err();
        assert!(matches!(err, PdfError::TooManyItems { .. }));
    }

    #[test]
    fn test_write_invoice_to_dir() {
        let profile = company();
        let (bill, items) = sample_bill();
        let dir = std::env::temp_dir().join("kirana-pdf-test");

        let path = write_invoice(
            &dir,
            &InvoiceDocument {
                company: &profile,
                bill: &bill,
                items: &items,
                billed_by: "Asha Verma",
            },
        )
        .unwrap();

        assert!(path.ends_with("INV-20260108-0001.pdf"));
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }
}
