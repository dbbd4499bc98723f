//! Canonical-to-LaTeX rendering.
//!
//! The inverse-direction convenience for tutor-review tooling: take a
//! canonical string (the normalizer's output, or anything close to it) and
//! dress it back up as LaTeX with math delimiters. Best effort and total; a
//! string with no recognized structure is returned inside delimiters
//! unchanged.

/// Render a canonical answer string as displayable LaTeX.
///
/// # Example
/// ```
/// use equigrade::format_math_for_display;
///
/// assert_eq!(format_math_for_display("1/2"), "\\(\\frac{1}{2}\\)");
/// assert_eq!(format_math_for_display("sqrt(2)"), "\\(\\sqrt{2}\\)");
/// assert_eq!(format_math_for_display("2pi"), "\\(2\\pi\\)");
/// ```
pub fn format_math_for_display(canonical: &str) -> String {
    let trimmed = canonical.trim();

    // A whole-string simple fraction renders as \frac.
    if let Some(caps) = regex!(r"^(-?\d+)/(\d+)$").captures(trimmed) {
        return format!("\\(\\frac{{{}}}{{{}}}\\)", &caps[1], &caps[2]);
    }

    let mut out = rewrite_root_calls(trimmed, "sqrt", "\\sqrt");
    out = rewrite_root_calls(&out, "cbrt", "\\sqrt[3]");
    out = regex!(r"[a-z]+")
        .replace_all(&out, |caps: &regex::Captures| {
            let word = &caps[0];
            if GREEK_NAMES.contains(&word) { format!("\\{word} ") } else { word.to_string() }
        })
        .into_owned();
    out = out.replace("+-", "\\pm ");
    out = out.replace("<=", "\\leq ");
    out = out.replace(">=", "\\geq ");
    out = out.replace("!=", "\\neq ");
    out = out.replace('*', "\\times ");
    format!("\\({}\\)", out.trim_end())
}

const GREEK_NAMES: [&str; 12] = [
    "pi", "theta", "alpha", "beta", "gamma", "delta", "epsilon", "lambda", "mu", "sigma", "phi",
    "omega",
];

/// Rewrite `name(arg)` calls into `command{arg}` by matching the balancing
/// closing parenthesis. Unbalanced input is left as-is.
fn rewrite_root_calls(input: &str, name: &str, command: &str) -> String {
    let needle = format!("{name}(");
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find(&needle) {
        // Only whole-word occurrences.
        let preceded_by_word = idx > 0
            && rest[..idx].chars().next_back().is_some_and(|c| c.is_ascii_alphanumeric());
        if preceded_by_word {
            out.push_str(&rest[..idx + needle.len()]);
            rest = &rest[idx + needle.len()..];
            continue;
        }
        match closing_paren(&rest[idx + needle.len()..]) {
            Some(end) => {
                let arg = &rest[idx + needle.len()..idx + needle.len() + end];
                out.push_str(&rest[..idx]);
                out.push_str(command);
                out.push('{');
                out.push_str(arg);
                out.push('}');
                rest = &rest[idx + needle.len() + end + 1..];
            }
            None => {
                out.push_str(&rest[..idx + needle.len()]);
                rest = &rest[idx + needle.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the parenthesis closing an already-opened group.
fn closing_paren(input: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_render() {
        assert_eq!(format_math_for_display("1/2"), "\\(\\frac{1}{2}\\)");
        assert_eq!(format_math_for_display("-3/4"), "\\(\\frac{-3}{4}\\)");
    }

    #[test]
    fn roots_render() {
        assert_eq!(format_math_for_display("sqrt(2)"), "\\(\\sqrt{2}\\)");
        assert_eq!(format_math_for_display("sqrt(x+1)"), "\\(\\sqrt{x+1}\\)");
        assert_eq!(format_math_for_display("cbrt(8)"), "\\(\\sqrt[3]{8}\\)");
    }

    #[test]
    fn symbols_render() {
        assert_eq!(format_math_for_display("2pi"), "\\(2\\pi\\)");
        assert_eq!(format_math_for_display("x<=5"), "\\(x\\leq 5\\)");
        assert_eq!(format_math_for_display("3*4"), "\\(3\\times 4\\)");
        assert_eq!(format_math_for_display("5+-1"), "\\(5\\pm 1\\)");
    }

    #[test]
    fn unrecognized_input_passes_through() {
        assert_eq!(format_math_for_display("hello"), "\\(hello\\)");
        assert_eq!(format_math_for_display("sqrt(unclosed"), "\\(sqrt(unclosed\\)");
        assert_eq!(format_math_for_display(""), "\\(\\)");
    }
}
