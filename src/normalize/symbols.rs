//! Unicode math symbol translation.
//!
//! Students paste answers from word processors, phone keyboards, and web
//! pages, so the same math arrives as `×`, `÷`, `−`, `½`, `π`, `√`, and the
//! blackboard-bold set letters. Every entry here rewrites to the same
//! canonical token the LaTeX table produces, so `"\\frac{1}{2}"` and `"½"`
//! meet in the middle.

use once_cell::sync::Lazy;

/// Ordered `(symbol, replacement)` pairs. Applied top to bottom; multi-char
/// entries and symbols that are prefixes of nothing can appear in any order,
/// but keep related groups together for review.
static SYMBOL_TABLE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        // Multiplication and division
        ("\u{00D7}", "*"), // ×
        ("\u{22C5}", "*"), // ⋅ dot operator
        ("\u{00B7}", "*"), // · middle dot
        ("\u{2217}", "*"), // ∗ asterisk operator
        ("\u{00F7}", "/"), // ÷
        // Minus-like dashes
        ("\u{2212}", "-"), // − minus sign
        ("\u{2013}", "-"), // – en dash
        ("\u{2014}", "-"), // — em dash
        ("\u{00B1}", "+-"), // ±
        // Superscript digits
        ("\u{00B9}", "^1"), // ¹
        ("\u{00B2}", "^2"), // ²
        ("\u{00B3}", "^3"), // ³
        // Vulgar fractions become decimal literals
        ("\u{00BD}", "0.5"), // ½
        ("\u{00BC}", "0.25"), // ¼
        ("\u{00BE}", "0.75"), // ¾
        ("\u{2153}", "0.333"), // ⅓
        ("\u{2154}", "0.667"), // ⅔
        // Greek letters (lowercase and the common capitals)
        ("\u{03C0}", "pi"), // π
        ("\u{03B8}", "theta"), // θ
        ("\u{03B1}", "alpha"), // α
        ("\u{03B2}", "beta"), // β
        ("\u{03B3}", "gamma"), // γ
        ("\u{03B4}", "delta"), // δ
        ("\u{03B5}", "epsilon"), // ε
        ("\u{03BB}", "lambda"), // λ
        ("\u{03BC}", "mu"), // μ
        ("\u{03C3}", "sigma"), // σ
        ("\u{03C6}", "phi"), // φ
        ("\u{03C9}", "omega"), // ω
        ("\u{0394}", "delta"), // Δ
        ("\u{03A3}", "sigma"), // Σ
        ("\u{03A9}", "omega"), // Ω
        ("\u{0398}", "theta"), // Θ
        ("\u{03A0}", "pi"), // Π
        // Set notation becomes word tokens
        ("\u{2208}", " in "), // ∈
        ("\u{222A}", " union "), // ∪
        ("\u{2229}", " intersect "), // ∩
        ("\u{2282}", " subset "), // ⊂
        ("\u{2283}", " superset "), // ⊃
        ("\u{2205}", "emptyset"), // ∅
        ("\u{221E}", "infinity"), // ∞
        // Roots
        ("\u{221B}", "cbrt"), // ∛
        ("\u{221A}", "sqrt"), // √
        // Blackboard bold set letters. Lowercase on purpose: the pipeline has
        // already case-folded, so an uppercase replacement would break
        // normalize-twice stability.
        ("\u{211D}", "r"), // ℝ
        ("\u{2124}", "z"), // ℤ
        ("\u{2115}", "n"), // ℕ
        ("\u{2102}", "c"), // ℂ
        // Comparison
        ("\u{2264}", "<="), // ≤
        ("\u{2265}", ">="), // ≥
        ("\u{2260}", "!="), // ≠
        // Degree marks are dropped like units
        ("\u{00B0}", ""), // °
    ]
});

/// Rewrite every known Unicode math symbol to its canonical ASCII token.
pub(crate) fn translate_symbols(input: &str) -> String {
    // Fast path: pure-ASCII answers (the overwhelming majority) skip the
    // whole table walk.
    if input.is_ascii() {
        return input.to_string();
    }

    let mut out = input.to_string();
    for (symbol, replacement) in SYMBOL_TABLE.iter() {
        if out.contains(symbol) {
            out = out.replace(symbol, replacement);
        }
    }
    out
}

/// `√9` arrives as `sqrt9` and a typed `sqrt 9` collapses the same way once
/// whitespace is removed, while `\sqrt{9}` becomes `sqrt(9)`. Wrap a bare
/// number or single-letter operand so all three spellings share one canonical
/// form. Already-parenthesized operands are left alone.
pub(crate) fn wrap_bare_root_operands(input: &str) -> String {
    regex!(r"\b(sqrt|cbrt)\s*(pi\b|[0-9][0-9.]*|[a-z]\b)")
        .replace_all(input, "$1($2)")
        .into_owned()
}
