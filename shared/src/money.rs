//! Money calculation utilities using rust_decimal for precision
//!
//! The backend serves prices and quantities as decimal strings. All
//! arithmetic is done in `Decimal`; values are formatted back to
//! two-decimal strings only when a total is stored or displayed.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Parse a decimal string from user input or a backend payload.
///
/// Negative or non-numeric input is treated as zero.
pub fn parse_decimal(value: &str) -> Decimal {
    match Decimal::from_str(value.trim()) {
        Ok(d) if d >= Decimal::ZERO => d,
        _ => Decimal::ZERO,
    }
}

/// Line total: `quantity * unit_price`.
///
/// No rounding is forced here; callers round at storage/display time.
#[inline]
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    quantity * unit_price
}

/// Left-to-right sum of line amounts.
pub fn sum_lines<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    lines.into_iter().fold(Decimal::ZERO, |acc, line| acc + line)
}

/// Format a monetary value to exactly two decimal places, half-up.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Normalize a user-edited quantity string.
///
/// Empty or unparseable input falls back to the editing surface's own
/// default (the draft editor and the materials picker use different ones),
/// so the fallback is the caller's choice. Valid input is kept verbatim.
pub fn normalize_quantity(input: &str, fallback: &str) -> String {
    let trimmed = input.trim();
    match Decimal::from_str(trimmed) {
        Ok(d) if d >= Decimal::ZERO => trimmed.to_string(),
        _ => fallback.to_string(),
    }
}
