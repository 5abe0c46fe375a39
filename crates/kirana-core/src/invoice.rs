//! # Invoice Number Formatting
//!
//! Pure formatting of invoice numbers. The daily sequence itself lives in
//! the database (`invoice_sequence` table) and is advanced inside the
//! bill-creation transaction; this module only turns (prefix, date, seq)
//! into the printed form.

use chrono::NaiveDate;

/// Default invoice prefix; overridable through configuration.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

/// Formats an invoice number: `{prefix}-{YYYYMMDD}-{seq:04}`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use kirana_core::invoice::format_invoice_number;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
/// assert_eq!(format_invoice_number("INV", date, 3), "INV-20260108-0003");
/// ```
pub fn format_invoice_number(prefix: &str, date: NaiveDate, sequence: i64) -> String {
    format!("{}-{}-{:04}", prefix, date.format("%Y%m%d"), sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(
            format_invoice_number("INV", date(2026, 1, 8), 1),
            "INV-20260108-0001"
        );
    }

    #[test]
    fn test_sequence_padding() {
        assert_eq!(
            format_invoice_number("INV", date(2026, 1, 8), 42),
            "INV-20260108-0042"
        );
        // Wider than four digits keeps going rather than truncating.
        assert_eq!(
            format_invoice_number("INV", date(2026, 1, 8), 12345),
            "INV-20260108-12345"
        );
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(
            format_invoice_number("KIRANA", date(2026, 12, 31), 7),
            "KIRANA-20261231-0007"
        );
    }
}
