//! LaTeX command translation.
//!
//! Answers submitted through the equation editor arrive as LaTeX fragments
//! (`\frac{1}{2}`, `\sqrt{9}`, `\pi`). Everything here rewrites those into
//! the same plain-operator tokens the Unicode table produces. Malformed
//! input (unbalanced braces, unknown commands, a trailing `\`) is passed
//! through or dropped, never an error.

use once_cell::sync::Lazy;

/// Strip math-mode delimiters without touching the enclosed content.
pub(crate) fn strip_delimiters(input: &str) -> String {
    input
        .replace("\\(", "")
        .replace("\\)", "")
        .replace("\\[", "")
        .replace("\\]", "")
        .replace("$$", "")
        .replace('$', "")
}

/// Rewrite every `\frac{a}{b}` as `a/b`, recursing into the numerator and
/// denominator. A `\frac` without two balanced brace groups is left for the
/// unknown-command sweep to drop.
pub(crate) fn rewrite_fractions(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find("\\frac") {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + "\\frac".len()..];
        let groups = brace_group(after)
            .and_then(|(num, mid)| brace_group(mid).map(|(den, tail)| (num, den, tail)));
        match groups {
            Some((num, den, tail)) => {
                out.push_str(&rewrite_fractions(num));
                out.push('/');
                out.push_str(&rewrite_fractions(den));
                rest = tail;
            }
            None => {
                out.push_str("\\frac");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Rewrite `\sqrt{a}` as `sqrt(a)` and `\sqrt[n]{a}` as `root(a,n)`.
pub(crate) fn rewrite_roots(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find("\\sqrt") {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + "\\sqrt".len()..];
        let (index, after_index) = match bracket_group(after) {
            Some((n, tail)) => (Some(n), tail),
            None => (None, after),
        };
        match brace_group(after_index) {
            Some((radicand, tail)) => {
                let inner = rewrite_roots(radicand);
                match index {
                    Some(n) => {
                        out.push_str("root(");
                        out.push_str(&inner);
                        out.push(',');
                        out.push_str(n.trim());
                        out.push(')');
                    }
                    None => {
                        out.push_str("sqrt(");
                        out.push_str(&inner);
                        out.push(')');
                    }
                }
                rest = tail;
            }
            None => {
                out.push_str("\\sqrt");
                rest = after_index;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Ordered command table; longer commands come first so a shorter command is
/// never substituted inside a longer one (`\in` inside `\infty`).
static COMMAND_TABLE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("\\mathbb{r}", "r"),
        ("\\mathbb{z}", "z"),
        ("\\mathbb{n}", "n"),
        ("\\mathbb{c}", "c"),
        ("\\emptyset", "emptyset"),
        ("\\epsilon", "epsilon"),
        ("\\lambda", "lambda"),
        ("\\infty", "infinity"),
        ("\\left(", "("),
        ("\\right)", ")"),
        ("\\left[", "("),
        ("\\right]", ")"),
        ("\\times", "*"),
        ("\\theta", "theta"),
        ("\\alpha", "alpha"),
        ("\\gamma", "gamma"),
        ("\\delta", "delta"),
        ("\\sigma", "sigma"),
        ("\\omega", "omega"),
        ("\\subset", " subset "),
        ("\\supset", " superset "),
        ("\\beta", "beta"),
        ("\\cdot", "*"),
        ("\\div", "/"),
        ("\\leq", "<="),
        ("\\geq", ">="),
        ("\\neq", "!="),
        ("\\cup", " union "),
        ("\\cap", " intersect "),
        ("\\phi", "phi"),
        ("\\sin", "sin"),
        ("\\cos", "cos"),
        ("\\tan", "tan"),
        ("\\log", "log"),
        ("\\ln", "ln"),
        ("\\pm", "+-"),
        ("\\pi", "pi"),
        ("\\mu", "mu"),
        ("\\in", " in "),
    ]
});

/// Apply the command table, drop whatever commands remain unknown, and turn
/// leftover braces into parentheses (`x^{2}` → `x^(2)`).
pub(crate) fn translate_commands(input: &str) -> String {
    let mut out = input.to_string();
    if out.contains('\\') {
        for (command, replacement) in COMMAND_TABLE.iter() {
            if out.contains(command) {
                out = out.replace(command, replacement);
            }
        }
        // Unknown or malformed commands are dropped, never an error.
        out = regex!(r"\\[a-z]+").replace_all(&out, "").into_owned();
        out = out.replace('\\', "");
    }
    out.replace('{', "(").replace('}', ")")
}

/// Balanced `{...}` group at the start of `input` (leading whitespace
/// allowed). Returns the group body and the remainder after the closing
/// brace, or `None` when absent or unterminated.
fn brace_group(input: &str) -> Option<(&str, &str)> {
    delimited_group(input, '{', '}')
}

/// Balanced `[...]` group at the start of `input`, for `\sqrt[n]{a}`.
fn bracket_group(input: &str) -> Option<(&str, &str)> {
    delimited_group(input, '[', ']')
}

fn delimited_group(input: &str, open: char, close: char) -> Option<(&str, &str)> {
    let trimmed = input.trim_start();
    let mut chars = trimmed.char_indices();
    match chars.next() {
        Some((_, c)) if c == open => {}
        _ => return None,
    }
    let mut depth = 1usize;
    for (i, c) in chars {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&trimmed[open.len_utf8()..i], &trimmed[i + close.len_utf8()..]));
            }
        }
    }
    None
}
