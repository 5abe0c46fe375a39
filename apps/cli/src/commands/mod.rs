//! Command handlers, one module per subcommand group.

pub mod bill;
pub mod catalog;
pub mod employee;
pub mod product;
pub mod report;
pub mod stock;
pub mod supplier;
pub mod tax;

use kirana_core::Money;

/// Parses a rupee amount like "45.50" or "100" into money.
pub fn parse_money(s: &str) -> Result<Money, String> {
    let s = s.trim().trim_start_matches('₹');
    let negative = s.starts_with('-');
    let s = s.trim_start_matches('-');

    let (rupees_str, paise_str) = match s.split_once('.') {
        Some((r, p)) => (r, p),
        None => (s, ""),
    };

    let rupees: i64 = if rupees_str.is_empty() {
        0
    } else {
        rupees_str
            .parse()
            .map_err(|_| format!("invalid amount: {}", s))?
    };

    let paise: i64 = match paise_str.len() {
        0 => 0,
        1 => {
            10 * paise_str
                .parse::<i64>()
                .map_err(|_| format!("invalid amount: {}", s))?
        }
        2 => paise_str
            .parse()
            .map_err(|_| format!("invalid amount: {}", s))?,
        _ => return Err(format!("amounts use at most 2 decimal places: {}", s)),
    };

    let total = rupees * 100 + paise;
    Ok(Money::from_paise(if negative { -total } else { total }))
}

/// Parses a date in YYYY-MM-DD form.
pub fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date (expected YYYY-MM-DD): {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("45.50").unwrap(), Money::from_paise(4550));
        assert_eq!(parse_money("100").unwrap(), Money::from_paise(10000));
        assert_eq!(parse_money("0.5").unwrap(), Money::from_paise(50));
        assert_eq!(parse_money("₹12.05").unwrap(), Money::from_paise(1205));
        assert_eq!(parse_money("-5.50").unwrap(), Money::from_paise(-550));
        assert!(parse_money("1.234").is_err());
        assert!(parse_money("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-01-08").is_ok());
        assert!(parse_date("08-01-2026").is_err());
    }
}
