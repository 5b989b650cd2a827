//! pt-BR display formatting. All pipeline arithmetic stays in full-precision
//! [`Decimal`]; these helpers are the only place values are rounded.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount the way the ledger prints it: two fixed decimal places,
/// comma decimal separator, dot thousands separator ("1.999,99").
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{rounded:.2}");
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped},{frac_part}")
}

/// DD/MM/YYYY, as printed in the ledger's day column.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "MM/YYYY" period label for the ledger header.
pub fn format_period(date: NaiveDate) -> String {
    date.format("%m/%Y").to_string()
}
