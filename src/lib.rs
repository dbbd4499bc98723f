//! A deterministic answer equivalence engine for tutoring platforms.
//!
//! Given a student's raw, free-typed response (plain text, Unicode math
//! symbols, or LaTeX) and a canonical correct-answer spec, the engine
//! decides synchronously whether the two are the same answer, across
//! numeric, fractional, percentage, scientific-notation, mixed-number, and
//! limited algebraic-expression forms. It also actively rejects grading
//! games: for a numeric question, submitting `"2+3"` instead of `"5"` is
//! wrong even though it evaluates to the right value.
//!
//! Everything is a pure function of its inputs: no I/O, no shared state, no
//! panics on any input, and sub-millisecond cost on anything within the
//! 10,000-character input cap.
//!
//! ```
//! use equigrade::{compare_math_answers, validate_answer, AnswerSpec, Options};
//!
//! assert!(compare_math_answers("½", "0.5"));
//! assert!(compare_math_answers("\\frac{1}{2}", "2/4"));
//!
//! let spec = AnswerSpec::Numeric { value: 32.0, tolerance: None, unit: None, alternates: vec![] };
//! assert!(validate_answer("32", &spec, &Options::default()).is_correct);
//! assert!(!validate_answer("2^5", &spec, &Options::default()).is_correct);
//! ```

#[macro_use]
mod macros;

mod api;
mod display;
mod engine;
mod expr;
mod normalize;
mod numeric;
mod sanitize;
mod validate;

pub use api::{
    AnswerSpec, AnswerType, BlankSpec, Confidence, FillBlankReport, MatchPair, MatchType,
    MatchingMode, MatchingReport, Options, ValidationResult, compare_math_answers,
    compare_math_answers_with, compare_numeric_answers, compare_numeric_answers_with,
    validate_answer, validate_fill_blank, validate_matching,
};
pub use display::format_math_for_display;
pub use normalize::normalize_math_answer;
pub use sanitize::sanitize_answer_input;
