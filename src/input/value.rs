//! Element values with SI suffixes.

/// Parse a value with an optional SI suffix: `10k`, `100n`, `4.7u`, `1e-9`.
///
/// Recognized suffixes are `p n u µ m k K M G`. Returns `None` if the text is
/// not a number.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => return text.parse().ok(),
    };

    let mantissa: f64 = text[..text.len() - last.len_utf8()].trim_end().parse().ok()?;
    Some(scale(mantissa, multiplier))
}

/// Multiply by a power of ten without picking up binary noise for the
/// common cases: `4.7 * 1e-6` is `4.700000000000001e-6`, `4.7e-6` is not.
fn scale(mantissa: f64, multiplier: f64) -> f64 {
    let exponent = multiplier.log10().round() as i32;
    format!("{}e{}", mantissa, exponent)
        .parse()
        .unwrap_or(mantissa * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(parse_value("10k"), Some(10_000.0));
        assert_eq!(parse_value("100n"), Some(100e-9));
        assert_eq!(parse_value("4.7u"), Some(4.7e-6));
        assert_eq!(parse_value("4.7µ"), Some(4.7e-6));
        assert_eq!(parse_value("1M"), Some(1_000_000.0));
        assert_eq!(parse_value("10m"), Some(0.01));
        assert_eq!(parse_value("2.2"), Some(2.2));
        assert_eq!(parse_value("1e-9"), Some(1e-9));
        assert_eq!(parse_value("-5"), Some(-5.0));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("k"), None);
        assert_eq!(parse_value("ten"), None);
        assert_eq!(parse_value("1x"), None);
    }
}
