//! Answer canonicalization.
//!
//! One pure function, [`normalize_math_answer`], rewrites every equivalent
//! textual form of an answer into a single representative string. The stages
//! run in a fixed order because later rules assume earlier ones already ran
//! (the unit stripper sees plain operators, the list canonicalizer sees
//! unit-free numbers, whitespace removal comes last).
//!
//! The function is total and idempotent: it never fails on malformed LaTeX
//! or hostile input, and `normalize(normalize(s)) == normalize(s)` for every
//! `s`.

mod latex;
mod symbols;
mod units;

#[cfg(test)]
mod tests;

use crate::sanitize::sanitize_answer_input;

/// Normalize a raw answer into canonical form.
///
/// # Example
/// ```
/// use equigrade::normalize_math_answer;
///
/// assert_eq!(normalize_math_answer("\\frac{1}{2}"), "1/2");
/// assert_eq!(normalize_math_answer("3 × 4"), "3*4");
/// assert_eq!(normalize_math_answer("5 meters"), "5");
/// assert_eq!(normalize_math_answer("3, 1, 2"), "1,2,3");
/// ```
pub fn normalize_math_answer(input: &str) -> String {
    let s = sanitize_answer_input(input);
    let s = s.trim().to_lowercase();
    let s = latex::strip_delimiters(&s);
    let s = latex::rewrite_fractions(&s);
    let s = latex::rewrite_roots(&s);
    let s = latex::translate_commands(&s);
    let s = symbols::translate_symbols(&s);
    let s = symbols::wrap_bare_root_operands(&s);
    let s = units::strip_units(&s);
    let s = strip_variable_prefix(&s);
    let s = canonicalize_numeric_list(&s);
    let s = hyphenate_mixed_numbers(&s);
    strip_whitespace(&s)
}

/// Drop a leading `x =` so `"x = 5"` and `"5"` agree. Applied repeatedly:
/// pathological `x=x=5` still ends at `5` on the first pass, which keeps the
/// pipeline idempotent.
fn strip_variable_prefix(input: &str) -> String {
    regex!(r"^(?:x\s*=\s*)+").replace(input.trim_start(), "").into_owned()
}

/// Sort a bare comma-separated all-numeric list ascending and re-join with
/// bare commas, so `"3, 1, 2"` and `"1, 2, 3"` agree. Anything that is not a
/// pure numeric list (coordinates in parentheses, algebra, text) is left
/// untouched.
fn canonicalize_numeric_list(input: &str) -> String {
    if !input.contains(',') {
        return input.to_string();
    }
    let items: Vec<&str> = input.split(',').map(str::trim).collect();
    let mut parsed: Vec<(f64, &str)> = Vec::with_capacity(items.len());
    for item in &items {
        match item.parse::<f64>() {
            Ok(v) if v.is_finite() => parsed.push((v, *item)),
            _ => return input.to_string(),
        }
    }
    // Stable sort keeps textually-distinct spellings of equal values in
    // submission order, so re-normalizing cannot reshuffle them.
    parsed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    parsed.iter().map(|(_, text)| *text).collect::<Vec<_>>().join(",")
}

/// Rewrite `1 1/2` as `1-1/2` before whitespace removal; the hyphen is the
/// canonical mixed-number separator once spaces are gone.
fn hyphenate_mixed_numbers(input: &str) -> String {
    regex!(r"(\d)\s+(\d+/\d+)").replace_all(input, "$1-$2").into_owned()
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
