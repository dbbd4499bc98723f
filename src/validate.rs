//! Per-answer-type validation.
//!
//! [`validate_answer_impl`] dispatches on the [`AnswerSpec`] variant, so the
//! compiler guarantees every answer type is handled. The structured types
//! (multiple choice, true/false, fill-in-the-blank, matching) have their own
//! small validators; the free-typed types delegate to the equivalence
//! engine.

use tracing::debug;

use crate::api::{
    AnswerSpec, BlankSpec, FillBlankReport, MatchType, MatchingReport, Options, ValidationResult,
};
use crate::engine;
use crate::normalize::normalize_math_answer;
use crate::sanitize::sanitize_answer_input;

pub(crate) fn validate_answer_impl(
    student: &str,
    spec: &AnswerSpec,
    options: &Options,
) -> ValidationResult {
    let result = match spec {
        AnswerSpec::Exact { value, alternates } => {
            ValidationResult::from_match(engine::exact_match(student, value, alternates))
        }
        AnswerSpec::Numeric { value, tolerance, unit: _, alternates } => {
            let mut tier = engine::numeric_match(student, *value, *tolerance, options);
            if tier == MatchType::None {
                tier = alternate_match(student, alternates);
            }
            ValidationResult::from_match(tier)
        }
        AnswerSpec::MultipleChoice { choices: _, correct_index } => {
            let correct = parse_index(student) == Some(*correct_index);
            ValidationResult::from_match(if correct { MatchType::Exact } else { MatchType::None })
        }
        AnswerSpec::ShortAnswer { value, alternates }
        | AnswerSpec::Expression { value, alternates } => {
            ValidationResult::from_match(engine::math_match(student, value, alternates, options))
        }
        AnswerSpec::TrueFalse { value } => {
            let correct = validate_true_false(student, *value);
            ValidationResult::from_match(if correct { MatchType::Exact } else { MatchType::None })
        }
        AnswerSpec::LongAnswer {} => {
            ValidationResult::from_match(MatchType::ManualGradingRequired)
        }
        AnswerSpec::FillBlank { blanks } => {
            let parts = split_parts(student, options);
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            let report = fill_blank_report(&refs, blanks, options);
            ValidationResult::from_match(if report.is_correct {
                MatchType::Exact
            } else {
                MatchType::None
            })
        }
        AnswerSpec::Matching { pairs: _, correct_matches } => {
            let selected = parse_index_list(student, options);
            let report = matching_report(&selected, correct_matches);
            ValidationResult::from_match(if report.is_correct {
                MatchType::Exact
            } else {
                MatchType::None
            })
        }
    };
    debug!(
        answer_type = %spec.answer_type(),
        is_correct = result.is_correct,
        match_type = ?result.match_type,
        "validated answer"
    );
    result
}

/// The alternates tier on its own, for numeric specs whose primary
/// comparison already failed.
fn alternate_match(student: &str, alternates: &[String]) -> MatchType {
    let normalized = normalize_math_answer(student);
    for alternate in alternates {
        if normalize_math_answer(alternate) == normalized {
            return MatchType::Alternate;
        }
    }
    MatchType::None
}

/// Strict token check: only `true`/`false`, any casing, surrounding space
/// allowed. Abbreviations like `t`/`f` are rejected.
fn validate_true_false(student: &str, expected: bool) -> bool {
    match sanitize_answer_input(student).trim().to_lowercase().as_str() {
        "true" => expected,
        "false" => !expected,
        _ => false,
    }
}

/// Zero-based choice index. Any non-integer submission is simply incorrect.
fn parse_index(student: &str) -> Option<usize> {
    sanitize_answer_input(student).trim().parse::<usize>().ok()
}

fn split_parts(student: &str, options: &Options) -> Vec<String> {
    let sanitized = sanitize_answer_input(student);
    sanitized
        .split(|c: char| options.blank_delimiters.contains(&c))
        .map(|part| part.trim().to_string())
        .collect()
}

fn parse_index_list(student: &str, options: &Options) -> Vec<usize> {
    split_parts(student, options)
        .iter()
        // Unparseable entries become an out-of-range sentinel: the position
        // counts as wrong instead of failing the whole submission.
        .map(|part| part.parse::<usize>().unwrap_or(usize::MAX))
        .collect()
}

pub(crate) fn fill_blank_report(
    answers: &[&str],
    blanks: &[BlankSpec],
    options: &Options,
) -> FillBlankReport {
    let per_blank: Vec<bool> = blanks
        .iter()
        .enumerate()
        .map(|(i, blank)| match answers.get(i) {
            Some(answer) => {
                engine::math_match(answer, &blank.value, &blank.alternates, options).is_match()
            }
            // Fewer answers than blanks is never an error; the blank is
            // just wrong.
            None => false,
        })
        .collect();

    let blanks_correct = per_blank.iter().filter(|ok| **ok).count();
    let blanks_total = blanks.len();
    FillBlankReport {
        blanks_correct,
        blanks_total,
        is_correct: blanks_total > 0 && blanks_correct == blanks_total,
        per_blank,
    }
}

pub(crate) fn matching_report(selected: &[usize], correct: &[usize]) -> MatchingReport {
    let per_position: Vec<bool> = correct
        .iter()
        .enumerate()
        .map(|(i, want)| selected.get(i) == Some(want))
        .collect();

    let matches_correct = per_position.iter().filter(|ok| **ok).count();
    let matches_total = correct.len();
    MatchingReport {
        matches_correct,
        matches_total,
        is_correct: matches_total > 0 && matches_correct == matches_total,
        per_position,
    }
}
