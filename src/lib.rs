use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod narration;
pub mod numerical;
pub mod player;
pub mod rules;
pub mod stage;
pub mod syntax;
pub mod timeline;

use syntax::{Solution, Term, Topic};

#[derive(Parser)]
#[grammar = "polynomial.pest"]
pub struct PolynomialParser;

#[derive(Error, Debug)]
pub enum SolverError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("{0}")]
  UnsupportedQuestion(String),
  #[error("cannot evaluate definite integral over [{0}, {1}]")]
  DegenerateLimits(f64, f64),
}

impl PolynomialParser {
  pub fn parse_expression(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Expression, input).map_err(Box::new)
  }
}

/// Parse a polynomial expression into signed terms.
///
/// Whitespace is stripped first, then the grammar splits on `+`/`-` while
/// keeping the sign as a delimiter; the first term defaults to `+`. Term
/// bodies degrade permissively (see [`Term::from_source`]), but a bare
/// sign with no following term body is a parse error.
pub fn parse_terms(expression: &str) -> Result<Vec<Term>, SolverError> {
  let clean: String =
    expression.chars().filter(|c| !c.is_whitespace()).collect();
  if clean.is_empty() {
    return Err(SolverError::EmptyInput);
  }

  let mut pairs = PolynomialParser::parse_expression(&clean)?;
  let Some(expr) = pairs.next() else {
    return Err(SolverError::EmptyInput);
  };

  let mut terms = Vec::new();
  let mut negative = false;
  for pair in expr.into_inner() {
    match pair.as_rule() {
      Rule::Sign => negative = pair.as_str() == "-",
      Rule::Term => {
        terms.push(Term::from_source(pair.as_str(), negative));
        negative = false;
      }
      _ => {}
    }
  }
  Ok(terms)
}

/// Solve a request end to end, producing the [`Solution`] the timeline
/// builder consumes.
///
/// Calculus topics parse the expression and apply the matching rule per
/// term; the numerical-reasoning topic treats the input as a word problem.
pub fn solve(
  expression: &str,
  topic: Topic,
  limits: Option<(f64, f64)>,
) -> Result<Solution, SolverError> {
  if topic == Topic::NumericalReasoning {
    return numerical::solve(expression);
  }

  let terms = parse_terms(expression)?;
  let solved = if topic == Topic::Differentiation {
    rules::differentiate_terms(&terms)
  } else {
    rules::integrate_terms(&terms)
  };

  Ok(Solution {
    expression: expression.to_string(),
    topic,
    terms: solved,
    limits,
    steps: Vec::new(),
  })
}
