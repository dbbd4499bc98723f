//! Layered equivalence decisions.
//!
//! This module is the operational core of the engine: both sides of a
//! comparison are normalized, then walked through an ordered ladder of
//! equivalence tiers until one succeeds. The tier that matched is reported
//! so callers can audit *why* an answer was accepted.
//!
//! ```text
//! normalize both sides
//!      │
//!      ▼
//! (1) exact string equality
//! (2) fraction ─ percentage ─ scientific ─ mixed number   (notation tiers)
//! (3) plain numbers within the tolerance band
//! (4) expression equivalence by point sampling            (permissive only)
//! (5) alternates list
//! ```
//!
//! Strict mode skips the percentage, scientific, and expression tiers; see
//! [`MatchingMode`](crate::MatchingMode).

use tracing::trace;

use crate::api::{MatchType, MatchingMode, Options};
use crate::expr::{constant_value, expressions_equivalent, is_unevaluated_expression};
use crate::normalize::normalize_math_answer;
use crate::numeric::tolerance::{smart_tolerance, values_close, values_close_banded};
use crate::numeric::{
    parse_fraction, parse_mixed_number, parse_percentage, parse_plain, parse_scientific, to_decimal,
};

/// Run the full ladder for two free-typed answers and report the first tier
/// that matched.
pub(crate) fn math_match(a: &str, b: &str, alternates: &[String], options: &Options) -> MatchType {
    let na = normalize_math_answer(a);
    let nb = normalize_math_answer(b);

    if na == nb {
        trace!(answer = %na, "exact match after normalization");
        return MatchType::Exact;
    }

    if let Some(tier) = notation_match(&na, &nb, options.matching_mode) {
        trace!(?tier, %na, %nb, "notation tier matched");
        return tier;
    }

    if let (Some(x), Some(y)) = (parse_plain(&na), parse_plain(&nb)) {
        if values_close_banded(x, y) {
            trace!(%na, %nb, "plain numeric match within tolerance band");
            return MatchType::Numeric;
        }
    }

    if options.matching_mode == MatchingMode::Permissive && expressions_equivalent(&na, &nb) {
        trace!(%na, %nb, "expression equivalence by sampling");
        return MatchType::Expression;
    }

    for alternate in alternates {
        if normalize_math_answer(alternate) == na {
            trace!(%na, "matched alternates list");
            return MatchType::Alternate;
        }
    }

    MatchType::None
}

/// The fixed-notation tiers, in precedence order. Either side may carry the
/// notation; the other side contributes any accepted numeric value. The
/// tolerance band is keyed to the larger magnitude so the comparison stays
/// symmetric.
fn notation_match(na: &str, nb: &str, mode: MatchingMode) -> Option<MatchType> {
    let permissive = mode == MatchingMode::Permissive;

    let tiers: [(fn(&str) -> Option<f64>, MatchType, bool); 4] = [
        (parse_fraction, MatchType::Fraction, true),
        (parse_percentage, MatchType::Percentage, permissive),
        (parse_scientific, MatchType::Scientific, permissive),
        (parse_mixed_number, MatchType::MixedNumber, true),
    ];

    for (parse, tier, enabled) in tiers {
        if !enabled {
            continue;
        }
        let forward = parse(na).zip(to_decimal(nb));
        let backward = parse(nb).zip(to_decimal(na));
        for (lhs, rhs) in forward.into_iter().chain(backward) {
            if values_close_banded(lhs, rhs) {
                return Some(tier);
            }
        }
    }
    None
}

/// Decide whether a free-typed answer denotes `expected`, applying the
/// anti-gaming classifier first: for numeric questions, `"2^5"` is not an
/// answer to 32 even though it evaluates to it.
pub(crate) fn numeric_match(
    answer: &str,
    expected: f64,
    tolerance: Option<f64>,
    options: &Options,
) -> MatchType {
    let normalized = normalize_math_answer(answer);
    if normalized.is_empty() {
        return MatchType::None;
    }

    if !options.allow_expressions && is_unevaluated_expression(&normalized) {
        trace!(answer = %normalized, "rejected unevaluated expression");
        return MatchType::None;
    }

    let parsed = parse_plain(&normalized)
        .map(|v| (v, MatchType::Numeric))
        .or_else(|| parse_fraction(&normalized).map(|v| (v, MatchType::Fraction)))
        .or_else(|| parse_mixed_number(&normalized).map(|v| (v, MatchType::MixedNumber)))
        .or_else(|| parse_percentage(&normalized).map(|v| (v, MatchType::Percentage)))
        .or_else(|| parse_scientific(&normalized).map(|v| (v, MatchType::Scientific)))
        .or_else(|| {
            // With expressions explicitly allowed, a variable-free
            // expression may stand in for its value.
            if options.allow_expressions {
                constant_value(&normalized).map(|v| (v, MatchType::Expression))
            } else {
                None
            }
        });

    let Some((value, tier)) = parsed else {
        return MatchType::None;
    };

    let tol = tolerance.unwrap_or_else(|| smart_tolerance(expected));
    if values_close(value, expected, tol) { tier } else { MatchType::None }
}

/// Exact tier plus alternates, for answer types that allow no numeric
/// latitude.
pub(crate) fn exact_match(answer: &str, value: &str, alternates: &[String]) -> MatchType {
    let normalized = normalize_math_answer(answer);
    if normalized == normalize_math_answer(value) {
        return MatchType::Exact;
    }
    for alternate in alternates {
        if normalize_math_answer(alternate) == normalized {
            return MatchType::Alternate;
        }
    }
    MatchType::None
}
