//! Wage unit resolution
//!
//! Wage exports publish either hourly rates or annual salaries, and not always
//! with a reliable marker. Every figure is converted to whole annual dollars:
//!
//! 1. Strip `$` and `,`, then read the leading decimal number. Anything
//!    unparseable is 0.
//! 2. The figure is annual if the row carries an annual hint, otherwise if it
//!    exceeds [`ANNUAL_THRESHOLD`].
//! 3. Annual figures are rounded; hourly figures are multiplied by
//!    [`ANNUAL_BASIS_HOURS`] and then rounded.
//!
//! The threshold rule is an approximation: an hourly rate above $1000 would be
//! taken as annual. It is kept as-is for compatibility with published maps.

use wagemap_common::api::types::ANNUAL_BASIS_HOURS;

/// Figures above this are assumed to be annual when the row has no annual hint
pub const ANNUAL_THRESHOLD: f64 = 1000.0;

/// What a wage row says about the unit of its figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitHint {
    /// Label mentions "annual" or an annual-specific column is populated
    Annual,
    /// Label present without mentioning "annual"
    Hourly,
    /// No label and no annual column
    Unknown,
}

impl UnitHint {
    /// Classify a row from its label text and whether an annual column was populated
    pub fn detect(label: &str, annual_column_populated: bool) -> Self {
        if annual_column_populated || label.to_lowercase().contains("annual") {
            UnitHint::Annual
        } else if !label.trim().is_empty() {
            UnitHint::Hourly
        } else {
            UnitHint::Unknown
        }
    }
}

/// Convert a raw wage cell to whole annual dollars
pub fn resolve_annual(raw: &str, hint: UnitHint) -> i64 {
    let value = parse_wage(raw);
    if value == 0.0 {
        return 0;
    }

    let is_annual = hint == UnitHint::Annual || value > ANNUAL_THRESHOLD;
    if is_annual {
        round_half_up(value)
    } else {
        round_half_up(value * ANNUAL_BASIS_HOURS as f64)
    }
}

/// Parse a wage cell, ignoring currency symbols and thousands separators
///
/// Reads the longest leading decimal number, so `"55.12 (est)"` is 55.12.
/// Returns 0.0 when no number is present.
pub fn parse_wage(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    let prefix = leading_number(cleaned);
    if prefix.is_empty() {
        return 0.0;
    }
    prefix.parse::<f64>().unwrap_or(0.0)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][(e|E)[+-]digits]`
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first().copied(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Round to the nearest integer, halves toward positive infinity
fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `round` takes negative halves away from zero
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_converted_with_basis_hours() {
        assert_eq!(resolve_annual("55.12", UnitHint::Unknown), 114650);
        assert_eq!(resolve_annual("20", UnitHint::Hourly), 41600);
    }

    #[test]
    fn test_large_value_without_hint_is_annual() {
        assert_eq!(resolve_annual("1000.01", UnitHint::Unknown), 1000);
        assert_eq!(resolve_annual("$85,000", UnitHint::Unknown), 85000);
        // exactly at the threshold is still hourly
        assert_eq!(resolve_annual("1000", UnitHint::Unknown), 2_080_000);
    }

    #[test]
    fn test_hourly_label_does_not_disable_threshold() {
        assert_eq!(resolve_annual("1500", UnitHint::Hourly), 1500);
    }

    #[test]
    fn test_annual_hint_skips_conversion_for_small_values() {
        assert_eq!(resolve_annual("950.4", UnitHint::Annual), 950);
        assert_eq!(resolve_annual("72,340.50", UnitHint::Annual), 72341);
    }

    #[test]
    fn test_unparseable_and_empty_are_zero() {
        assert_eq!(resolve_annual("", UnitHint::Unknown), 0);
        assert_eq!(resolve_annual("N/A", UnitHint::Annual), 0);
        assert_eq!(resolve_annual("$", UnitHint::Unknown), 0);
        assert_eq!(resolve_annual("0", UnitHint::Unknown), 0);
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert_eq!(resolve_annual("-2", UnitHint::Unknown), -4160);
        assert_eq!(resolve_annual("-2.5", UnitHint::Annual), -2);
    }

    #[test]
    fn test_parse_wage_reads_leading_number() {
        assert_eq!(parse_wage(" $1,234.50 "), 1234.5);
        assert_eq!(parse_wage("55.12 (est)"), 55.12);
        assert_eq!(parse_wage(".5"), 0.5);
        assert_eq!(parse_wage("1e3"), 1000.0);
        assert_eq!(parse_wage("12e"), 12.0);
        assert_eq!(parse_wage("-"), 0.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(114649.6), 114650);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497);
    }

    #[test]
    fn test_detect_hint() {
        assert_eq!(UnitHint::detect("ANNUAL WAGE", false), UnitHint::Annual);
        assert_eq!(UnitHint::detect("", true), UnitHint::Annual);
        assert_eq!(UnitHint::detect("Hourly", false), UnitHint::Hourly);
        assert_eq!(UnitHint::detect("", false), UnitHint::Unknown);
    }
}
