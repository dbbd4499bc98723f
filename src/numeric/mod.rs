//! Numeric notation sub-parsers.
//!
//! Independent recognizers for the accepted ways of writing a number:
//! plain decimals, simple fractions, mixed numbers, percentages, and
//! scientific notation. All of them run on normalized text (lowercase, no
//! whitespace), are pure, and return `None` on anything that does not match.

pub(crate) mod tolerance;

/// Plain signed decimal: `5`, `-3.2`, `+.75`, `0033`.
///
/// Gated by a regex rather than `str::parse` alone so that `inf`, `nan`, and
/// exponent forms are not claimed here.
pub(crate) fn parse_plain(input: &str) -> Option<f64> {
    if !regex!(r"^[+-]?(\d+\.?\d*|\.\d+)$").is_match(input) {
        return None;
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Simple fraction: `-3/4`. `None` when the denominator is zero.
pub(crate) fn parse_fraction(input: &str) -> Option<f64> {
    let caps = regex!(r"^([+-]?\d+)/(\d+)$").captures(input)?;
    let numerator = caps[1].parse::<f64>().ok()?;
    let denominator = caps[2].parse::<f64>().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Mixed number in canonical hyphen form: `1-1/2` is one and a half,
/// `-2-3/4` is negative two and three quarters. The normalizer rewrites the
/// spoken `1 1/2` spelling into this form before whitespace removal.
pub(crate) fn parse_mixed_number(input: &str) -> Option<f64> {
    let caps = regex!(r"^(-?)(\d+)-(\d+)/(\d+)$").captures(input)?;
    let whole = caps[2].parse::<f64>().ok()?;
    let numerator = caps[3].parse::<f64>().ok()?;
    let denominator = caps[4].parse::<f64>().ok()?;
    if denominator == 0.0 {
        return None;
    }
    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    Some(sign * (whole + numerator / denominator))
}

/// Percentage: `50%` is 0.5, `-12.5%` is -0.125.
pub(crate) fn parse_percentage(input: &str) -> Option<f64> {
    let caps = regex!(r"^([+-]?(\d+\.?\d*|\.\d+))%$").captures(input)?;
    let value = caps[1].parse::<f64>().ok()?;
    Some(value / 100.0)
}

/// Scientific notation in either spelling: `1.2e5` / `3E-4`, or the written
/// out `3*10^4` (students also type `3x10^4`, which survives normalization).
pub(crate) fn parse_scientific(input: &str) -> Option<f64> {
    let caps = regex!(r"^([+-]?(?:\d+\.?\d*|\.\d+))(?:e|[x*]10\^)\(?([+-]?\d+)\)?$")
        .captures(input)?;
    let mantissa = caps[1].parse::<f64>().ok()?;
    let exponent = caps[2].parse::<i32>().ok()?;
    let value = mantissa * 10f64.powi(exponent);
    value.is_finite().then_some(value)
}

/// Convert any accepted numeric notation to its decimal value. This is the
/// single definition of "writes a number" used by the equivalence tiers and
/// the anti-gaming classifier.
pub(crate) fn to_decimal(input: &str) -> Option<f64> {
    parse_plain(input)
        .or_else(|| parse_fraction(input))
        .or_else(|| parse_mixed_number(input))
        .or_else(|| parse_percentage(input))
        .or_else(|| parse_scientific(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_plain("5"), Some(5.0));
        assert_eq!(parse_plain("-3.2"), Some(-3.2));
        assert_eq!(parse_plain(".75"), Some(0.75));
        assert_eq!(parse_plain("0033"), Some(33.0));
        assert_eq!(parse_plain("1e5"), None);
        assert_eq!(parse_plain("inf"), None);
        assert_eq!(parse_plain("nan"), None);
        assert_eq!(parse_plain("1/2"), None);
    }

    #[test]
    fn fractions() {
        assert_eq!(parse_fraction("1/2"), Some(0.5));
        assert_eq!(parse_fraction("-3/4"), Some(-0.75));
        assert_eq!(parse_fraction("20/100"), Some(0.2));
        assert_eq!(parse_fraction("1/0"), None);
        assert_eq!(parse_fraction("1.5/2"), None);
        assert_eq!(parse_fraction("0.5"), None);
    }

    #[test]
    fn mixed_numbers() {
        assert_eq!(parse_mixed_number("1-1/2"), Some(1.5));
        assert_eq!(parse_mixed_number("-2-3/4"), Some(-2.75));
        assert_eq!(parse_mixed_number("1-1/0"), None);
        assert_eq!(parse_mixed_number("1/2"), None);
    }

    #[test]
    fn percentages() {
        assert_eq!(parse_percentage("50%"), Some(0.5));
        assert_eq!(parse_percentage("-12.5%"), Some(-0.125));
        assert_eq!(parse_percentage("100%"), Some(1.0));
        assert_eq!(parse_percentage("50"), None);
        assert_eq!(parse_percentage("%"), None);
    }

    fn close(got: Option<f64>, want: f64) -> bool {
        got.is_some_and(|v| (v - want).abs() < 1e-9)
    }

    #[test]
    fn scientific_notation() {
        assert!(close(parse_scientific("1.2e5"), 120_000.0));
        assert!(close(parse_scientific("3e-4"), 0.0003));
        assert!(close(parse_scientific("3*10^4"), 30_000.0));
        assert!(close(parse_scientific("3x10^4"), 30_000.0));
        assert!(close(parse_scientific("3*10^(-2)"), 0.03));
        assert_eq!(parse_scientific("e5"), None);
        assert_eq!(parse_scientific("5"), None);
    }

    #[test]
    fn to_decimal_covers_every_notation() {
        assert_eq!(to_decimal("5"), Some(5.0));
        assert_eq!(to_decimal("1/2"), Some(0.5));
        assert_eq!(to_decimal("1-1/2"), Some(1.5));
        assert_eq!(to_decimal("50%"), Some(0.5));
        assert!(close(to_decimal("1.2e3"), 1200.0));
        assert_eq!(to_decimal("two"), None);
        assert_eq!(to_decimal(""), None);
    }
}
