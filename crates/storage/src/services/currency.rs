use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as Turkish lira the way `tr-TR` currency formatting does:
/// symbol first, `.` for thousands, `,` before exactly two decimals.
///
/// ```
/// use rust_decimal::Decimal;
/// use storefront_storage::services::currency::format_try;
///
/// assert_eq!(format_try(Decimal::new(125, 1)), "₺12,50");
/// assert_eq!(format_try(Decimal::new(123450, 2)), "₺1.234,50");
/// ```
pub fn format_try(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut plain = rounded.abs();
    plain.rescale(2);
    let text = plain.to_string();
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}₺{},{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Reads a price the way `parseFloat` does: leading whitespace is skipped and
/// the longest numeric prefix is used. Anything unparsable becomes zero.
pub fn parse_price(input: &str) -> Decimal {
    let prefix = float_prefix(input.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    // `.5`, `-.5` and `3.` are valid for parseFloat but not for Decimal.
    let (sign, unsigned) = match prefix.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", prefix.strip_prefix('+').unwrap_or(prefix)),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => unsigned.split_at(at),
        None => (unsigned, ""),
    };
    let mantissa = mantissa.trim_end_matches('.');
    let literal = if mantissa.starts_with('.') {
        format!("{sign}0{mantissa}{exponent}")
    } else {
        format!("{sign}{mantissa}{exponent}")
    };

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&literal)
    } else {
        Decimal::from_scientific(&literal)
    };
    parsed.unwrap_or(Decimal::ZERO).normalize()
}

/// Reads an id the way `parseInt(_, 10)` does. Anything unparsable becomes zero.
pub fn parse_id(input: &str) -> i64 {
    let text = input.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

fn float_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_try() {
        assert_eq!(format_try(Decimal::new(125, 1)), "₺12,50");
        assert_eq!(format_try(Decimal::ZERO), "₺0,00");
        assert_eq!(format_try(Decimal::new(999, 0)), "₺999,00");
        assert_eq!(format_try(Decimal::new(1_234_567_891, 2)), "₺12.345.678,91");
        assert_eq!(format_try(Decimal::new(-3, 0)), "-₺3,00");
    }

    #[test]
    fn test_format_try_rounds_half_away_from_zero() {
        assert_eq!(format_try(Decimal::new(10_005, 3)), "₺10,01");
        assert_eq!(format_try(Decimal::new(-10_005, 3)), "-₺10,01");
        assert_eq!(format_try(Decimal::new(-1, 3)), "₺0,00");
    }

    #[test]
    fn test_parse_price_like_parse_float() {
        assert_eq!(parse_price("12.5"), Decimal::new(125, 1));
        assert_eq!(parse_price("  7"), Decimal::new(7, 0));
        assert_eq!(parse_price("12.5 TL"), Decimal::new(125, 1));
        assert_eq!(parse_price(".5"), Decimal::new(5, 1));
        assert_eq!(parse_price("3."), Decimal::new(3, 0));
        assert_eq!(parse_price("1e3"), Decimal::new(1000, 0));
        assert_eq!(parse_price("-2.25"), Decimal::new(-225, 2));
    }

    #[test]
    fn test_parse_price_non_numeric_is_zero() {
        assert_eq!(parse_price("abc"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("."), Decimal::ZERO);
        assert_eq!(parse_price("-"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_comma_stops_at_separator() {
        assert_eq!(parse_price("12,5"), Decimal::new(12, 0));
    }

    #[test]
    fn test_parse_id_like_parse_int() {
        assert_eq!(parse_id("42"), 42);
        assert_eq!(parse_id(" 7abc"), 7);
        assert_eq!(parse_id(""), 0);
        assert_eq!(parse_id("x1"), 0);
        assert_eq!(parse_id("-3"), -3);
    }
}
