//! Rupiah and number formatting for display.
//!
//! Indonesian grouping uses `.` for thousands and `,` for decimals.

use rust_decimal::prelude::*;

const THOUSANDS: char = '.';
const DECIMAL: char = ',';

/// `Rp 1.234.567`, negatives as `-Rp 1.234.567`. Rounded to whole rupiah,
/// halves away from zero.
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}Rp {}", sign, group_digits(&rounded.abs().trunc().to_string()))
}

/// Whole number with thousands separators, no currency prefix.
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_digits(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Two decimals: `1.234,50`.
pub fn format_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();
    let whole = group_digits(&abs.trunc().to_string());
    let cents = ((abs.fract() * Decimal::ONE_HUNDRED).trunc())
        .to_u32()
        .unwrap_or_default();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}{:02}", sign, whole, DECIMAL, cents)
}

/// Parse form input such as `Rp 1.500.000`, `1.500.000,50` or `-250`.
/// Returns `None` for anything that is not a number.
pub fn parse_rupiah(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let rest = rest
        .strip_prefix("Rp")
        .or_else(|| rest.strip_prefix("rp"))
        .or_else(|| rest.strip_prefix("RP"))
        .unwrap_or(rest)
        .trim_start_matches('.')
        .trim();

    if rest.is_empty() {
        return None;
    }

    let normalized: String = rest
        .chars()
        .filter(|c| *c != THOUSANDS && !c.is_whitespace())
        .map(|c| if c == DECIMAL { '.' } else { c })
        .collect();

    if !normalized.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS);
        }
        out.push(c);
    }
    out
}
