//! Evaluation and point-sampling equivalence.

use std::collections::{BTreeMap, BTreeSet};

use super::parser::parse;
use super::{BinaryOp, Constant, Expr, ExprError, Func};
use crate::numeric::to_decimal;
use crate::numeric::tolerance::{smart_tolerance, values_close};

/// Fixed sample values, one row per free variable (sorted by name). The
/// points are deliberately non-trivial: no 0 or 1, nothing that makes `x^n`
/// or `n*x` collapse to the same value by accident.
const SAMPLE_POINTS: [[f64; 3]; 2] = [[1.37, 2.59, 0.73], [2.11, 0.59, 3.23]];

fn eval(expr: &Expr, vars: &BTreeMap<&str, f64>) -> Result<f64, ExprError> {
    let value = match expr {
        Expr::Number(n) => *n,
        Expr::Constant(Constant::Pi) => std::f64::consts::PI,
        Expr::Constant(Constant::E) => std::f64::consts::E,
        Expr::Variable(name) => *vars.get(name.as_str()).ok_or(ExprError::Domain)?,
        Expr::Unary(inner) => -eval(inner, vars)?,
        Expr::Binary(op, lhs, rhs) => {
            let l = eval(lhs, vars)?;
            let r = eval(rhs, vars)?;
            match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => {
                    if r == 0.0 {
                        return Err(ExprError::Domain);
                    }
                    l / r
                }
                BinaryOp::Pow => l.powf(r),
            }
        }
        Expr::Call(func, args) => {
            let a = eval(&args[0], vars)?;
            match func {
                Func::Sqrt => {
                    if a < 0.0 {
                        return Err(ExprError::Domain);
                    }
                    a.sqrt()
                }
                Func::Cbrt => a.cbrt(),
                Func::Root => {
                    let n = eval(&args[1], vars)?;
                    nth_root(a, n)?
                }
                Func::Sin => a.sin(),
                Func::Cos => a.cos(),
                Func::Tan => a.tan(),
                Func::Log => {
                    if a <= 0.0 {
                        return Err(ExprError::Domain);
                    }
                    a.log10()
                }
                Func::Ln => {
                    if a <= 0.0 {
                        return Err(ExprError::Domain);
                    }
                    a.ln()
                }
            }
        }
    };
    if value.is_finite() { Ok(value) } else { Err(ExprError::Domain) }
}

/// `root(a, n)`: odd integer roots of negatives are real, even roots of
/// negatives and a zero index are domain errors.
fn nth_root(a: f64, n: f64) -> Result<f64, ExprError> {
    if n == 0.0 {
        return Err(ExprError::Domain);
    }
    if a < 0.0 {
        let is_odd_integer = n.fract() == 0.0 && (n as i64) % 2 != 0;
        if !is_odd_integer {
            return Err(ExprError::Domain);
        }
        return Ok(-(-a).powf(1.0 / n));
    }
    Ok(a.powf(1.0 / n))
}

fn free_vars(expr: &Expr, out: &mut BTreeSet<String>) {
    match expr {
        Expr::Number(_) | Expr::Constant(_) => {}
        Expr::Variable(name) => {
            out.insert(name.clone());
        }
        Expr::Unary(inner) => free_vars(inner, out),
        Expr::Binary(_, lhs, rhs) => {
            free_vars(lhs, out);
            free_vars(rhs, out);
        }
        Expr::Call(_, args) => {
            for arg in args {
                free_vars(arg, out);
            }
        }
    }
}

/// True when the tree performs any computation a student should have carried
/// out: a binary operation, a function call, or negation of anything more
/// than a bare literal (`-5` is a signed number, `-(2+3)` is not).
fn contains_operation(expr: &Expr) -> bool {
    match expr {
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable(_) => false,
        Expr::Unary(inner) => !matches!(**inner, Expr::Number(_)),
        Expr::Binary(..) | Expr::Call(..) => true,
    }
}

/// Decide whether two normalized strings are equivalent algebraic
/// expressions by evaluating both at fixed sample points.
///
/// Fails closed: any parse failure, more than two free variables between the
/// two sides, or a domain error at any sample point means "not equivalent".
pub(crate) fn expressions_equivalent(a: &str, b: &str) -> bool {
    let (Ok(ea), Ok(eb)) = (parse(a), parse(b)) else {
        return false;
    };

    let mut names = BTreeSet::new();
    free_vars(&ea, &mut names);
    free_vars(&eb, &mut names);
    if names.len() > SAMPLE_POINTS.len() {
        tracing::trace!(vars = names.len(), "too many free variables for sampling");
        return false;
    }
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    for k in 0..3 {
        let mut bindings = BTreeMap::new();
        for (i, name) in names.iter().enumerate() {
            bindings.insert(*name, SAMPLE_POINTS[i][k]);
        }
        let (Ok(va), Ok(vb)) = (eval(&ea, &bindings), eval(&eb, &bindings)) else {
            return false;
        };
        if !values_close(va, vb, smart_tolerance(va.abs().max(vb.abs()))) {
            return false;
        }
    }
    true
}

/// Evaluate a variable-free expression to its value. `None` on parse
/// failure, free variables, or domain errors.
pub(crate) fn constant_value(normalized: &str) -> Option<f64> {
    let expr = parse(normalized).ok()?;
    eval(&expr, &BTreeMap::new()).ok()
}

/// Classify a normalized string as an unevaluated expression: not one of the
/// accepted numeric notations, yet a variable-free expression that still
/// contains work to do. `"2+3"` and `"sqrt(16)"` qualify; `"-5"`, `"1/2"`,
/// and `"2x+1"` do not.
pub(crate) fn is_unevaluated_expression(normalized: &str) -> bool {
    if to_decimal(normalized).is_some() {
        return false;
    }
    match parse(normalized) {
        Ok(expr) => {
            let mut names = BTreeSet::new();
            free_vars(&expr, &mut names);
            names.is_empty() && contains_operation(&expr)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_str(s: &str) -> Result<f64, ExprError> {
        eval(&parse(s).unwrap(), &BTreeMap::new())
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(eval_str("2+3*4").unwrap(), 14.0);
        assert_eq!(eval_str("2^5").unwrap(), 32.0);
        assert_eq!(eval_str("sqrt(16)").unwrap(), 4.0);
        assert!((eval_str("root(8,3)").unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(eval_str("-(2+3)").unwrap(), -5.0);
    }

    #[test]
    fn domain_errors_fail() {
        assert_eq!(eval_str("1/0"), Err(ExprError::Domain));
        assert_eq!(eval_str("sqrt(-4)"), Err(ExprError::Domain));
        assert_eq!(eval_str("ln(-1)"), Err(ExprError::Domain));
        assert_eq!(eval_str("log(0)"), Err(ExprError::Domain));
        assert_eq!(eval_str("root(-16,2)"), Err(ExprError::Domain));
    }

    #[test]
    fn odd_roots_of_negatives_are_real() {
        assert!((eval_str("root(-8,3)").unwrap() + 2.0).abs() < 1e-9);
        assert!((eval_str("cbrt(-27)").unwrap() + 3.0).abs() < 1e-9);
    }

    #[test]
    fn equivalent_polynomials() {
        assert!(expressions_equivalent("2x+3", "3+2x"));
        assert!(expressions_equivalent("(x+1)^2", "x^2+2x+1"));
        assert!(expressions_equivalent("x*x", "x^2"));
        assert!(!expressions_equivalent("2x+3", "2x+4"));
        assert!(!expressions_equivalent("x^2", "x^3"));
    }

    #[test]
    fn two_variable_expressions() {
        assert!(expressions_equivalent("x+y", "y+x"));
        assert!(expressions_equivalent("2(x+y)", "2x+2y"));
        assert!(!expressions_equivalent("x-y", "y-x"));
    }

    #[test]
    fn different_variable_names_differ() {
        assert!(!expressions_equivalent("2x", "2y"));
    }

    #[test]
    fn three_variables_fail_closed() {
        assert!(!expressions_equivalent("x+y+z", "z+y+x"));
    }

    #[test]
    fn unparseable_sides_fail_closed() {
        assert!(!expressions_equivalent("2x+", "2x"));
        assert!(!expressions_equivalent("", ""));
    }

    #[test]
    fn unevaluated_expression_classification() {
        assert!(is_unevaluated_expression("2+3"));
        assert!(is_unevaluated_expression("2^5"));
        assert!(is_unevaluated_expression("6*7"));
        assert!(is_unevaluated_expression("sqrt(16)"));
        assert!(is_unevaluated_expression("-(2+3)"));

        // Accepted numeric notations are not "unevaluated".
        assert!(!is_unevaluated_expression("5"));
        assert!(!is_unevaluated_expression("-5"));
        assert!(!is_unevaluated_expression("1/2"));
        assert!(!is_unevaluated_expression("1-1/2"));
        assert!(!is_unevaluated_expression("50%"));
        assert!(!is_unevaluated_expression("1.2e3"));

        // Free variables mean algebra, not gaming.
        assert!(!is_unevaluated_expression("2x+1"));
        // Unparseable junk is simply not an expression.
        assert!(!is_unevaluated_expression("hello world!"));
    }
}
