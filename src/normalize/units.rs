//! Measurement unit stripping.
//!
//! `"5 meters"` and `"5"` must normalize identically: the unit vocabulary is
//! fixed, and stripping is lossy. A unit is only removed when it trails a
//! number and is followed by a list delimiter, whitespace, a closing
//! parenthesis, or the end of the answer, so `2m+3` keeps its `m`, which is
//! a variable, not a measurement.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed vocabulary: length, time, mass, volume. Longest spellings first so
/// the regex alternation never stops at an embedded abbreviation.
const UNIT_WORDS: &[&str] = &[
    // length
    "kilometers",
    "kilometer",
    "kilometres",
    "kilometre",
    "centimeters",
    "centimeter",
    "centimetres",
    "centimetre",
    "millimeters",
    "millimeter",
    "millimetres",
    "millimetre",
    "meters",
    "meter",
    "metres",
    "metre",
    "inches",
    "inch",
    "miles",
    "mile",
    "yards",
    "yard",
    "feet",
    "foot",
    "km",
    "cm",
    "mm",
    "yd",
    "ft",
    "mi",
    "in",
    "m",
    // time
    "milliseconds",
    "millisecond",
    "seconds",
    "second",
    "minutes",
    "minute",
    "hours",
    "hour",
    "days",
    "day",
    "secs",
    "sec",
    "mins",
    "min",
    "hrs",
    "hr",
    "ms",
    "h",
    "s",
    // mass
    "kilograms",
    "kilogram",
    "milligrams",
    "milligram",
    "grams",
    "gram",
    "pounds",
    "pound",
    "ounces",
    "ounce",
    "kg",
    "mg",
    "lbs",
    "lb",
    "oz",
    "g",
    // volume
    "milliliters",
    "milliliter",
    "millilitres",
    "millilitre",
    "liters",
    "liter",
    "litres",
    "litre",
    "gallons",
    "gallon",
    "gal",
    "ml",
    "l",
    // angle marks behave like units on numeric answers
    "degrees",
    "degree",
    "deg",
];

static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    let words = UNIT_WORDS.join("|");
    // $1 keeps the digit that ends the number, $2 keeps the terminator so
    // list delimiters survive ("3 cm, 4 cm" -> "3, 4").
    Regex::new(&format!(r"(\d(?:\.\d+)?)\s*(?:{words})([\s,;)\]]|$)")).unwrap()
});

/// Remove a trailing measurement unit after each number.
pub(crate) fn strip_units(input: &str) -> String {
    UNIT_RE.replace_all(input, "$1$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_units_strip() {
        assert_eq!(strip_units("5 meters"), "5");
        assert_eq!(strip_units("5meters"), "5");
        assert_eq!(strip_units("3.5 kg"), "3.5");
        assert_eq!(strip_units("12 min"), "12");
        assert_eq!(strip_units("2.5l"), "2.5");
    }

    #[test]
    fn delimiters_survive() {
        assert_eq!(strip_units("3 cm, 4 cm"), "3, 4");
        assert_eq!(strip_units("(3 cm, 4 cm)"), "(3, 4)");
    }

    #[test]
    fn variables_are_not_units() {
        // `m` followed by an operator stays: it is algebra, not measurement.
        assert_eq!(strip_units("2m+3"), "2m+3");
        assert_eq!(strip_units("5s*2"), "5s*2");
    }

    #[test]
    fn units_only_strip_after_numbers() {
        assert_eq!(strip_units("meters"), "meters");
        assert_eq!(strip_units("x meters"), "x meters");
    }
}
