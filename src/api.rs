//! Public API surface: option types, the answer data model, result types,
//! and the exported comparison/validation entry points.
//!
//! Every function here is deterministic, total, and safe to call from any
//! number of threads: the engine holds no state, performs no I/O, and never
//! panics on any input, including empty strings, malformed LaTeX, and
//! injection-shaped payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{engine, validate};

/// Which equivalence policy the engine applies.
///
/// The two policies return different verdicts on identical inputs
/// (`compare_math_answers_with("50%", "0.5", ..)` is `true` under
/// [`MatchingMode::Permissive`] and `false` under [`MatchingMode::Strict`]),
/// so the mode is an explicit configuration, not a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// The full multi-tier ladder: exact, fraction, percentage, scientific
    /// notation, mixed number, tolerance-banded numeric, sampled expression
    /// equivalence, alternates.
    #[default]
    Permissive,
    /// Rejects the cross-form tiers most likely to produce false positives:
    /// percentage, scientific notation, and expression equivalence. Exact,
    /// fraction, mixed-number, plain numeric, and alternates still apply.
    Strict,
}

/// Options that affect comparison and validation behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Equivalence policy. Defaults to [`MatchingMode::Permissive`].
    pub matching_mode: MatchingMode,
    /// Accept unevaluated expressions (`"2+3"`, `"sqrt(16)"`) as numeric
    /// answers. Off by default: students must submit the computed result.
    pub allow_expressions: bool,
    /// Delimiters used to split a fill-in-the-blank or matching submission
    /// into positional parts.
    pub blank_delimiters: Vec<char>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::Permissive,
            allow_expressions: false,
            blank_delimiters: vec![',', ';', '|'],
        }
    }
}

impl Options {
    /// Options with the given matching mode and everything else default.
    pub fn with_mode(matching_mode: MatchingMode) -> Self {
        Self { matching_mode, ..Self::default() }
    }
}

/// The kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Exact,
    Numeric,
    MultipleChoice,
    ShortAnswer,
    LongAnswer,
    Expression,
    TrueFalse,
    FillBlank,
    Matching,
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnswerType::Exact => "exact",
            AnswerType::Numeric => "numeric",
            AnswerType::MultipleChoice => "multiple_choice",
            AnswerType::ShortAnswer => "short_answer",
            AnswerType::LongAnswer => "long_answer",
            AnswerType::Expression => "expression",
            AnswerType::TrueFalse => "true_false",
            AnswerType::FillBlank => "fill_blank",
            AnswerType::Matching => "matching",
        };
        write!(f, "{name}")
    }
}

impl FromStr for AnswerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(AnswerType::Exact),
            "numeric" => Ok(AnswerType::Numeric),
            "multiple_choice" => Ok(AnswerType::MultipleChoice),
            "short_answer" => Ok(AnswerType::ShortAnswer),
            "long_answer" => Ok(AnswerType::LongAnswer),
            "expression" => Ok(AnswerType::Expression),
            "true_false" => Ok(AnswerType::TrueFalse),
            "fill_blank" => Ok(AnswerType::FillBlank),
            "matching" => Ok(AnswerType::Matching),
            other => Err(format!("unknown answer type: {other}")),
        }
    }
}

/// One blank of a fill-in-the-blank question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlankSpec {
    /// The canonical answer for this blank.
    pub value: String,
    /// Additional accepted spellings, compared after normalization.
    #[serde(default)]
    pub alternates: Vec<String>,
}

/// One left/right pair of a matching question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// The correct-answer specification attached to a question. A closed sum
/// type, one variant per [`AnswerType`], so validation dispatch is
/// exhaustive and each variant carries only its own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerSpec {
    /// Matches only after normalization (plus alternates).
    Exact {
        value: String,
        #[serde(default)]
        alternates: Vec<String>,
    },
    /// A computed numeric result.
    Numeric {
        value: f64,
        /// Absolute tolerance override. When absent the magnitude-scaled
        /// band applies.
        #[serde(default)]
        tolerance: Option<f64>,
        /// Expected unit, informational only: normalization strips units
        /// from both sides before comparison.
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        alternates: Vec<String>,
    },
    /// Answered by zero-based choice index.
    MultipleChoice {
        choices: Vec<String>,
        correct_index: usize,
    },
    /// Free-typed short answer, compared with the full equivalence ladder.
    ShortAnswer {
        value: String,
        #[serde(default)]
        alternates: Vec<String>,
    },
    /// Routed to manual review; never auto-graded.
    LongAnswer {},
    /// An algebraic expression, compared by point sampling.
    Expression {
        value: String,
        #[serde(default)]
        alternates: Vec<String>,
    },
    TrueFalse {
        value: bool,
    },
    FillBlank {
        blanks: Vec<BlankSpec>,
    },
    Matching {
        pairs: Vec<MatchPair>,
        /// For each left-side position, the index of the matching right-side
        /// entry.
        correct_matches: Vec<usize>,
    },
}

impl AnswerSpec {
    /// The [`AnswerType`] this spec answers for.
    pub fn answer_type(&self) -> AnswerType {
        match self {
            AnswerSpec::Exact { .. } => AnswerType::Exact,
            AnswerSpec::Numeric { .. } => AnswerType::Numeric,
            AnswerSpec::MultipleChoice { .. } => AnswerType::MultipleChoice,
            AnswerSpec::ShortAnswer { .. } => AnswerType::ShortAnswer,
            AnswerSpec::LongAnswer {} => AnswerType::LongAnswer,
            AnswerSpec::Expression { .. } => AnswerType::Expression,
            AnswerSpec::TrueFalse { .. } => AnswerType::TrueFalse,
            AnswerSpec::FillBlank { .. } => AnswerType::FillBlank,
            AnswerSpec::Matching { .. } => AnswerType::Matching,
        }
    }
}

/// Which equivalence rule produced a "correct" verdict. Recorded for audit
/// and surfaced in UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Fraction,
    Percentage,
    Scientific,
    MixedNumber,
    Numeric,
    Expression,
    Alternate,
    ManualGradingRequired,
    None,
}

impl MatchType {
    /// How confident the engine is in this verdict. Exact and fixed-notation
    /// matches are unambiguous; tolerance-banded and sampled matches leave
    /// room for coincidence; everything unresolved is low.
    pub fn confidence(self) -> Confidence {
        match self {
            MatchType::Exact
            | MatchType::Fraction
            | MatchType::Percentage
            | MatchType::Scientific
            | MatchType::MixedNumber
            | MatchType::Alternate => Confidence::High,
            MatchType::Numeric | MatchType::Expression => Confidence::Medium,
            MatchType::ManualGradingRequired | MatchType::None => Confidence::Low,
        }
    }

    /// Whether this match type counts as a correct answer.
    pub(crate) fn is_match(self) -> bool {
        !matches!(self, MatchType::ManualGradingRequired | MatchType::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Verdict for a single validated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_correct: bool,
    pub match_type: MatchType,
    pub confidence: Confidence,
}

impl ValidationResult {
    pub(crate) fn from_match(match_type: MatchType) -> Self {
        Self { is_correct: match_type.is_match(), match_type, confidence: match_type.confidence() }
    }
}

/// Per-blank detail for a fill-in-the-blank submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillBlankReport {
    pub blanks_correct: usize,
    pub blanks_total: usize,
    /// Verdict per blank, in question order.
    pub per_blank: Vec<bool>,
    pub is_correct: bool,
}

/// Per-position detail for a matching submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingReport {
    pub matches_correct: usize,
    pub matches_total: usize,
    /// Verdict per left-side position.
    pub per_position: Vec<bool>,
    pub is_correct: bool,
}

/// Decide whether two free-typed answers are the same answer, using the
/// default (permissive) options.
///
/// # Example
/// ```
/// use equigrade::compare_math_answers;
///
/// assert!(compare_math_answers("1/2", "0.5"));
/// assert!(compare_math_answers("\\frac{1}{2}", "0.5"));
/// assert!(!compare_math_answers("1/4", "1/2"));
/// ```
pub fn compare_math_answers(a: &str, b: &str) -> bool {
    compare_math_answers_with(a, b, &[], &Options::default())
}

/// [`compare_math_answers`] with an alternates list and explicit options.
///
/// Alternates are tutor-curated accepted spellings of the `b` side; the
/// comparison is symmetric in `a` and `b` only when `alternates` is empty.
pub fn compare_math_answers_with(
    a: &str,
    b: &str,
    alternates: &[String],
    options: &Options,
) -> bool {
    engine::math_match(a, b, alternates, options).is_match()
}

/// Decide whether a free-typed answer denotes the expected number, using the
/// default options (magnitude-scaled tolerance, expressions rejected).
///
/// # Example
/// ```
/// use equigrade::compare_numeric_answers;
///
/// assert!(compare_numeric_answers("32", 32.0));
/// assert!(compare_numeric_answers("50%", 0.5));
/// // Restating the computation is not an answer.
/// assert!(!compare_numeric_answers("2^5", 32.0));
/// ```
pub fn compare_numeric_answers(answer: &str, expected: f64) -> bool {
    compare_numeric_answers_with(answer, expected, None, &Options::default())
}

/// [`compare_numeric_answers`] with an explicit tolerance override and
/// options. `tolerance` replaces the magnitude-scaled band when present.
pub fn compare_numeric_answers_with(
    answer: &str,
    expected: f64,
    tolerance: Option<f64>,
    options: &Options,
) -> bool {
    engine::numeric_match(answer, expected, tolerance, options).is_match()
}

/// Validate a student's raw submission against a question's answer spec.
///
/// This is the single source of truth for correctness: callers must ignore
/// any client-asserted flag and record this verdict. Total and
/// deterministic; any unparseable or malformed input yields an incorrect
/// result, never an error.
///
/// # Example
/// ```
/// use equigrade::{validate_answer, AnswerSpec, MatchType, Options};
///
/// let spec = AnswerSpec::Numeric {
///     value: 0.5,
///     tolerance: None,
///     unit: None,
///     alternates: vec![],
/// };
/// let result = validate_answer("1/2", &spec, &Options::default());
/// assert!(result.is_correct);
/// assert_eq!(result.match_type, MatchType::Fraction);
/// ```
pub fn validate_answer(student: &str, spec: &AnswerSpec, options: &Options) -> ValidationResult {
    validate::validate_answer_impl(student, spec, options)
}

/// Validate pre-split fill-in-the-blank answers positionally against the
/// blanks of a question. Fewer submitted answers than blanks is not an
/// error; the unmatched blanks count as incorrect.
pub fn validate_fill_blank(
    answers: &[&str],
    blanks: &[BlankSpec],
    options: &Options,
) -> FillBlankReport {
    validate::fill_blank_report(answers, blanks, options)
}

/// Validate a matching submission: `selected[i]` is the student's chosen
/// right-side index for left-side position `i`.
pub fn validate_matching(selected: &[usize], correct: &[usize]) -> MatchingReport {
    validate::matching_report(selected, correct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_type_display_and_parse() {
        assert_eq!(AnswerType::Numeric.to_string(), "numeric");
        assert_eq!(AnswerType::FillBlank.to_string(), "fill_blank");
        assert_eq!("numeric".parse::<AnswerType>().unwrap(), AnswerType::Numeric);
        assert_eq!("true_false".parse::<AnswerType>().unwrap(), AnswerType::TrueFalse);
        assert!("essay".parse::<AnswerType>().is_err());
    }

    #[test]
    fn answer_spec_serde_roundtrip() {
        let spec = AnswerSpec::Numeric {
            value: 42.0,
            tolerance: Some(0.5),
            unit: Some("m".into()),
            alternates: vec!["forty-two".into()],
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: AnswerSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answer_type(), AnswerType::Numeric);

        let json = r#"{"type":"multiple_choice","choices":["a","b"],"correct_index":1}"#;
        let spec: AnswerSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.answer_type(), AnswerType::MultipleChoice);

        // Optional fields may be omitted entirely.
        let json = r#"{"type":"numeric","value":3.5}"#;
        let spec: AnswerSpec = serde_json::from_str(json).unwrap();
        match spec {
            AnswerSpec::Numeric { value, tolerance, unit, alternates } => {
                assert_eq!(value, 3.5);
                assert_eq!(tolerance, None);
                assert_eq!(unit, None);
                assert!(alternates.is_empty());
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn fill_blank_spec_roundtrip() {
        let json =
            r#"{"type":"fill_blank","blanks":[{"value":"5"},{"value":"10","alternates":["ten"]}]}"#;
        let spec: AnswerSpec = serde_json::from_str(json).unwrap();
        match spec {
            AnswerSpec::FillBlank { blanks } => {
                assert_eq!(blanks.len(), 2);
                assert_eq!(blanks[1].alternates, vec!["ten".to_string()]);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn confidence_mapping() {
        assert_eq!(MatchType::Exact.confidence(), Confidence::High);
        assert_eq!(MatchType::Fraction.confidence(), Confidence::High);
        assert_eq!(MatchType::Numeric.confidence(), Confidence::Medium);
        assert_eq!(MatchType::Expression.confidence(), Confidence::Medium);
        assert_eq!(MatchType::None.confidence(), Confidence::Low);
    }

    #[test]
    fn matching_mode_default_is_permissive() {
        assert_eq!(Options::default().matching_mode, MatchingMode::Permissive);
        assert_eq!(Options::with_mode(MatchingMode::Strict).matching_mode, MatchingMode::Strict);
    }
}
