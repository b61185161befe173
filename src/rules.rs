//! Term-by-term calculus rules: differentiation, integration, combining
//! results and definite-integral evaluation.

use serde::Serialize;

use crate::syntax::{variable_part, SolvedTerm, Term, TermKind, TermResult};
use crate::SolverError;

/// d/dx[c*x^n] = c*n*x^(n-1); constants vanish.
pub fn differentiate_terms(terms: &[Term]) -> Vec<SolvedTerm> {
  terms
    .iter()
    .map(|term| {
      let result = if term.kind == TermKind::Constant {
        TermResult::Derivative {
          coeff: 0,
          power: 0,
          display: "0".to_string(),
        }
      } else {
        let coeff = term.coeff * i64::from(term.power);
        let power = term.power.saturating_sub(1);
        let display = if coeff == 0 {
          "0".to_string()
        } else {
          derivative_display(coeff, power)
        };
        TermResult::Derivative {
          coeff,
          power,
          display,
        }
      };
      SolvedTerm {
        term: term.clone(),
        result,
      }
    })
    .collect()
}

/// `{coeff}{x^power}` with the usual omissions: a coefficient of 1 (or a
/// bare `-` for -1) disappears in front of a variable part, but a power-0
/// result keeps its numeral; `x^1` renders as plain `x`.
fn derivative_display(coeff: i64, power: u32) -> String {
  let coeff_part = if coeff == 1 && power != 0 {
    String::new()
  } else if coeff == -1 && power != 0 {
    "-".to_string()
  } else {
    coeff.to_string()
  };
  format!("{coeff_part}{}", variable_part(power))
}

/// Integral of c*x^n is (c/(n+1))*x^(n+1); the divisor n+1 is at least 1
/// because source powers are non-negative.
pub fn integrate_terms(terms: &[Term]) -> Vec<SolvedTerm> {
  terms
    .iter()
    .map(|term| {
      let power = term.power + 1;
      let denominator = i64::from(power);
      SolvedTerm {
        term: term.clone(),
        result: TermResult::Integral {
          numerator: term.coeff,
          denominator,
          power,
          display: integral_display(term.coeff, denominator, power),
        },
      }
    })
    .collect()
}

/// Whole-number quotients format like derivative terms; everything else
/// stays an explicit fraction `(c/d)x^n`.
fn integral_display(coeff: i64, divisor: i64, power: u32) -> String {
  if coeff % divisor == 0 {
    let whole = coeff / divisor;
    let coeff_part = if whole == 1 && power != 0 {
      String::new()
    } else {
      whole.to_string()
    };
    format!("{coeff_part}{}", variable_part(power))
  } else {
    format!("({coeff}/{divisor})x^{power}")
  }
}

/// Join the non-zero term results into the final expression string.
///
/// Signs come from the result strings themselves, so a negative term is
/// joined with ` - ` rather than producing `+ -`. An all-zero combination
/// collapses to `"0"`. Indefinite integrals get the trailing constant.
pub fn combine(terms: &[SolvedTerm], append_constant: bool) -> String {
  let mut combined = String::new();
  for solved in terms {
    let display = solved.result.display();
    if display == "0" {
      continue;
    }
    if combined.is_empty() {
      combined.push_str(display);
    } else if let Some(unsigned) = display.strip_prefix('-') {
      combined.push_str(" - ");
      combined.push_str(unsigned);
    } else {
      combined.push_str(" + ");
      combined.push_str(display);
    }
  }
  if combined.is_empty() {
    combined.push('0');
  } else if append_constant {
    combined.push_str(" + C");
  }
  combined
}

/// Values produced by evaluating a definite integral, kept separately so
/// the limit phases can show the substitution before the subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DefiniteEval {
  pub lower: f64,
  pub upper: f64,
  pub at_lower: f64,
  pub at_upper: f64,
  pub area: f64,
}

/// F(x) = sum of coeff/(power+1) * x^(power+1) over the source terms.
fn antiderivative_at(terms: &[Term], x: f64) -> f64 {
  terms
    .iter()
    .map(|term| {
      let power = term.power + 1;
      term.coeff as f64 / f64::from(power) * x.powi(power as i32)
    })
    .sum()
}

/// Evaluate F(upper) - F(lower) in floating point.
///
/// The divisor invariant makes division by zero unreachable, but a
/// non-finite value still fails closed instead of rendering as
/// `inf`/`NaN`.
pub fn evaluate_definite(
  terms: &[Term],
  lower: f64,
  upper: f64,
) -> Result<DefiniteEval, SolverError> {
  let at_upper = antiderivative_at(terms, upper);
  let at_lower = antiderivative_at(terms, lower);
  let area = at_upper - at_lower;
  if !at_upper.is_finite() || !at_lower.is_finite() || !area.is_finite() {
    return Err(SolverError::DegenerateLimits(lower, upper));
  }
  Ok(DefiniteEval {
    lower,
    upper,
    at_lower,
    at_upper,
    area,
  })
}
