//! # Amounts in Words
//!
//! Indian-numbering spellout for invoice footers. Groups follow the
//! crore/lakh/thousand scale, not the western million/billion one.
//!
//! ## Example
//! ```
//! use kirana_pdf::words::amount_in_words;
//!
//! assert_eq!(amount_in_words(1_062), "One Thousand Sixty Two");
//! assert_eq!(amount_in_words(2_50_000), "Two Lakh Fifty Thousand");
//! ```

use kirana_core::Money;

const UNITS: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spells out a two-digit group (0..=99).
fn two_digits(n: i64, out: &mut Vec<String>) {
    if n == 0 {
        return;
    }
    if n < 20 {
        out.push(UNITS[n as usize].to_string());
    } else {
        let tens = TENS[(n / 10) as usize];
        if n % 10 == 0 {
            out.push(tens.to_string());
        } else {
            out.push(format!("{} {}", tens, UNITS[(n % 10) as usize]));
        }
    }
}

/// Spells out a whole number in Indian numbering.
///
/// Negative amounts get a `Minus` prefix; callers render voided or
/// adjusted figures the same way the register tape would.
pub fn amount_in_words(n: i64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }
    if n < 0 {
        return format!("Minus {}", amount_in_words(-n));
    }

    let mut parts: Vec<String> = Vec::new();
    let mut n = n;

    let crore = n / 1_00_00_000;
    n %= 1_00_00_000;
    if crore > 0 {
        // A crore count can itself exceed two digits (arab and beyond
        // are spelled as "x Crore" on Indian invoices).
        parts.push(format!("{} Crore", amount_in_words(crore)));
    }

    let lakh = n / 1_00_000;
    n %= 1_00_000;
    if lakh > 0 {
        let mut group = Vec::new();
        two_digits(lakh, &mut group);
        parts.push(format!("{} Lakh", group.join(" ")));
    }

    let thousand = n / 1_000;
    n %= 1_000;
    if thousand > 0 {
        let mut group = Vec::new();
        two_digits(thousand, &mut group);
        parts.push(format!("{} Thousand", group.join(" ")));
    }

    let hundred = n / 100;
    n %= 100;
    if hundred > 0 {
        parts.push(format!("{} Hundred", UNITS[hundred as usize]));
    }

    two_digits(n, &mut parts);

    parts.join(" ")
}

/// Spells out a money amount for the invoice footer.
///
/// ## Example
/// ```
/// use kirana_core::Money;
/// use kirana_pdf::words::money_in_words;
///
/// let m = Money::from_paise(1_06_200);
/// assert_eq!(money_in_words(m), "One Thousand Sixty Two Rupees Only");
/// ```
pub fn money_in_words(amount: Money) -> String {
    let rupees = amount.rupees();
    let paise = amount.paise_part();

    if paise == 0 {
        format!("{} Rupees Only", amount_in_words(rupees))
    } else {
        format!(
            "{} Rupees and {} Paise Only",
            amount_in_words(rupees),
            amount_in_words(paise)
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(amount_in_words(0), "Zero");
        assert_eq!(amount_in_words(7), "Seven");
        assert_eq!(amount_in_words(13), "Thirteen");
        assert_eq!(amount_in_words(40), "Forty");
        assert_eq!(amount_in_words(99), "Ninety Nine");
    }

    #[test]
    fn test_hundreds_and_thousands() {
        assert_eq!(amount_in_words(100), "One Hundred");
        assert_eq!(amount_in_words(1_062), "One Thousand Sixty Two");
        assert_eq!(amount_in_words(45_000), "Forty Five Thousand");
        assert_eq!(amount_in_words(99_999), "Ninety Nine Thousand Nine Hundred Ninety Nine");
    }

    #[test]
    fn test_lakh_and_crore() {
        assert_eq!(amount_in_words(2_50_000), "Two Lakh Fifty Thousand");
        assert_eq!(amount_in_words(1_00_00_000), "One Crore");
        assert_eq!(
            amount_in_words(1_23_45_678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight"
        );
    }

    #[test]
    fn test_negative() {
        assert_eq!(amount_in_words(-42), "Minus Forty Two");
    }

    #[test]
    fn test_money_with_and_without_paise() {
        assert_eq!(
            money_in_words(Money::from_paise(1_06_200)),
            "One Thousand Sixty Two Rupees Only"
        );
        assert_eq!(
            money_in_words(Money::from_paise(1_06_250)),
            "One Thousand Sixty Two Rupees and Fifty Paise Only"
        );
    }
}
