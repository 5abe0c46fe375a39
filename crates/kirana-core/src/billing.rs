//! # Billing Math
//!
//! Pure computation of bill totals: subtotal, fixed discount, GST, and the
//! CGST/SGST split.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line items (qty × unit price)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ line_total                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  taxable = subtotal - discount        (0 <= discount <= subtotal)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax = round_half_up(taxable × rate)  (integer paise, bps rate)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = taxable + tax                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CGST = tax / 2 (floor), SGST = tax - CGST  (re-sums exactly)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use kirana_core::billing::{compute_totals, LineItem};
//! use kirana_core::money::Money;
//! use kirana_core::types::TaxRate;
//!
//! let lines = vec![
//!     LineItem::new("RICE-500", "Basmati Rice 500g", 4, Money::from_rupees(250)),
//! ];
//! let totals = compute_totals(&lines, Money::from_rupees(100), TaxRate::from_bps(1800)).unwrap();
//!
//! assert_eq!(totals.subtotal, Money::from_rupees(1000));
//! assert_eq!(totals.tax, Money::from_rupees(162));
//! assert_eq!(totals.total, Money::from_rupees(1062));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Line Item
// =============================================================================

/// An input line for totals computation. Carries the snapshot fields the
/// bill will store alongside the amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            sku: sku.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total: quantity × unit price.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// The computed amounts of a bill. Every field is derived once here and
/// stored verbatim; nothing downstream recomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: Money,
    pub discount: Money,
    /// Subtotal after discount, the base for tax.
    pub taxable: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub total: Money,
}

/// Computes bill totals from line items, a fixed discount, and a tax rate.
///
/// ## Validation
/// - At least one line item (`EmptyBill`)
/// - Subtotal must be positive (`InvalidSubtotal`)
/// - `0 <= discount <= subtotal` (`InvalidDiscount`)
/// - Rate at most 10000 bps (`TaxRateTooHigh`)
pub fn compute_totals(
    lines: &[LineItem],
    discount: Money,
    tax_rate: TaxRate,
) -> CoreResult<BillTotals> {
    if lines.is_empty() {
        return Err(CoreError::EmptyBill);
    }

    if tax_rate.bps() > 10000 {
        return Err(CoreError::TaxRateTooHigh {
            bps: tax_rate.bps(),
        });
    }

    let mut subtotal = Money::zero();
    for line in lines {
        subtotal += line.line_total();
    }

    if !subtotal.is_positive() {
        return Err(CoreError::InvalidSubtotal {
            subtotal_paise: subtotal.paise(),
        });
    }

    if discount.is_negative() || discount > subtotal {
        return Err(CoreError::InvalidDiscount {
            discount_paise: discount.paise(),
            subtotal_paise: subtotal.paise(),
        });
    }

    let taxable = subtotal - discount;
    let tax = taxable.calculate_tax(tax_rate);
    let (cgst, sgst) = split_gst(tax);

    Ok(BillTotals {
        subtotal,
        discount,
        taxable,
        tax_rate,
        tax,
        cgst,
        sgst,
        total: taxable + tax,
    })
}

/// Splits a tax amount into CGST and SGST halves.
///
/// CGST takes the floor half; SGST takes the remainder, so
/// `cgst + sgst == tax` even for odd paise amounts.
///
/// ## Example
/// ```rust
/// use kirana_core::billing::split_gst;
/// use kirana_core::money::Money;
///
/// let (cgst, sgst) = split_gst(Money::from_paise(101));
/// assert_eq!(cgst.paise(), 50);
/// assert_eq!(sgst.paise(), 51);
/// ```
pub fn split_gst(tax: Money) -> (Money, Money) {
    let cgst = Money::from_paise(tax.paise() / 2);
    let sgst = tax - cgst;
    (cgst, sgst)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn single_line(paise: i64) -> Vec<LineItem> {
        vec![LineItem::new("SKU-1", "Item", 1, Money::from_paise(paise))]
    }

    #[test]
    fn test_reference_bill() {
        // Subtotal ₹1000, discount ₹100, 18% GST.
        let lines = vec![LineItem::new(
            "RICE-500",
            "Basmati Rice 500g",
            4,
            Money::from_rupees(250),
        )];
        let totals =
            compute_totals(&lines, Money::from_rupees(100), TaxRate::from_bps(1800)).unwrap();

        assert_eq!(totals.subtotal.paise(), 100_000);
        assert_eq!(totals.taxable.paise(), 90_000);
        assert_eq!(totals.tax.paise(), 16_200); // ₹162.00
        assert_eq!(totals.total.paise(), 106_200); // ₹1062.00
        assert_eq!(totals.cgst.paise(), 8_100);
        assert_eq!(totals.sgst.paise(), 8_100);
    }

    #[test]
    fn test_multiple_lines_sum() {
        let lines = vec![
            LineItem::new("A", "A", 2, Money::from_paise(2500)),
            LineItem::new("B", "B", 1, Money::from_paise(1500)),
            LineItem::new("C", "C", 3, Money::from_paise(1000)),
        ];
        let totals = compute_totals(&lines, Money::zero(), TaxRate::zero()).unwrap();
        assert_eq!(totals.subtotal.paise(), 9500);
        assert_eq!(totals.tax.paise(), 0);
        assert_eq!(totals.total.paise(), 9500);
    }

    #[test]
    fn test_empty_bill_rejected() {
        let err = compute_totals(&[], Money::zero(), TaxRate::zero()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyBill));
    }

    #[test]
    fn test_discount_bounds() {
        // Discount above subtotal.
        let err = compute_totals(
            &single_line(1000),
            Money::from_paise(1001),
            TaxRate::zero(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));

        // Negative discount.
        let err =
            compute_totals(&single_line(1000), Money::from_paise(-1), TaxRate::zero()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));

        // Discount equal to subtotal is allowed: everything taxed away.
        let totals = compute_totals(
            &single_line(1000),
            Money::from_paise(1000),
            TaxRate::from_bps(1800),
        )
        .unwrap();
        assert_eq!(totals.total.paise(), 0);
    }

    #[test]
    fn test_zero_subtotal_rejected() {
        let lines = vec![LineItem::new("FREE", "Free item", 1, Money::zero())];
        let err = compute_totals(&lines, Money::zero(), TaxRate::zero()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSubtotal { .. }));
    }

    #[test]
    fn test_tax_rate_above_100_percent_rejected() {
        let err = compute_totals(
            &single_line(1000),
            Money::zero(),
            TaxRate::from_bps(10001),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::TaxRateTooHigh { bps: 10001 }));
    }

    #[test]
    fn test_gst_split_even() {
        let (cgst, sgst) = split_gst(Money::from_paise(16_200));
        assert_eq!(cgst.paise(), 8_100);
        assert_eq!(sgst.paise(), 8_100);
    }

    #[test]
    fn test_gst_split_odd_resums_exactly() {
        for tax_paise in [1, 99, 101, 12_345] {
            let tax = Money::from_paise(tax_paise);
            let (cgst, sgst) = split_gst(tax);
            assert_eq!(cgst + sgst, tax, "split of {} must re-sum", tax_paise);
            assert!(sgst.paise() - cgst.paise() <= 1);
        }
    }

    #[test]
    fn test_totals_invariant_holds() {
        // total == subtotal - discount + tax across a spread of inputs.
        for (sub, disc, bps) in [
            (100_000, 10_000, 1800u32),
            (4_999, 0, 500),
            (77_777, 7_777, 1200),
            (1, 0, 10000),
        ] {
            let totals = compute_totals(
                &single_line(sub),
                Money::from_paise(disc),
                TaxRate::from_bps(bps),
            )
            .unwrap();
            assert_eq!(
                totals.total,
                totals.subtotal - totals.discount + totals.tax
            );
            assert_eq!(totals.cgst + totals.sgst, totals.tax);
        }
    }
}
