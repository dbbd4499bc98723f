//! Input sanitization.
//!
//! The first stage of every comparison: strip invisible characters that would
//! make two visually identical answers compare unequal, and bound the input
//! length so downstream regex and parsing work stays cheap on hostile input.

/// Maximum number of characters kept from a raw answer. Longer input is
/// truncated, never rejected.
pub const MAX_ANSWER_CHARS: usize = 10_000;

/// Zero-width characters that can spoof "different but visually identical"
/// answers: ZWSP, ZWNJ, ZWJ, and the BOM/ZWNBSP.
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Remove zero-width and C0/C1 control characters, then truncate to
/// [`MAX_ANSWER_CHARS`].
///
/// # Example
/// ```
/// use equigrade::sanitize_answer_input;
///
/// assert_eq!(sanitize_answer_input("5\u{200B}"), "5");
/// assert_eq!(sanitize_answer_input("1\u{0007}/2"), "1/2");
/// ```
pub fn sanitize_answer_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !is_control(*c) && !ZERO_WIDTH.contains(c))
        .take(MAX_ANSWER_CHARS)
        .collect()
}

/// C0 controls (U+0000..U+001F), DEL, and C1 controls (U+0080..U+009F).
fn is_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}')
}
