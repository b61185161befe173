use serde::{Deserialize, Serialize};

/// Walkthrough topic, as supplied by the request layer.
///
/// The caller validates the topic before it reaches the core; everything
/// downstream assumes one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
  Differentiation,
  Integration,
  NumericalReasoning,
}

impl std::fmt::Display for Topic {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let name = match self {
      Topic::Differentiation => "differentiation",
      Topic::Integration => "integration",
      Topic::NumericalReasoning => "numerical_reasoning",
    };
    write!(f, "{name}")
  }
}

impl std::str::FromStr for Topic {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "differentiation" => Ok(Topic::Differentiation),
      "integration" => Ok(Topic::Integration),
      "numerical_reasoning" => Ok(Topic::NumericalReasoning),
      other => Err(format!(
        "unknown topic '{other}' (expected differentiation, integration \
         or numerical_reasoning)"
      )),
    }
  }
}

/// Shape of one additive term of a polynomial. Exactly one kind holds per
/// term; `Constant` implies power 0 and `Linear` implies power 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
  Constant,
  Linear,
  Power,
}

/// One signed term of a parsed expression, e.g. `-3x^2`.
///
/// Coefficient and power are derived once at parse time and carried as
/// structured data through every later stage; display strings are never
/// re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
  /// Signed source text (leading `-` only when negative).
  pub original: String,
  pub coeff: i64,
  pub power: u32,
  pub kind: TermKind,
}

impl Term {
  /// Interpret one sign-free term body, e.g. `2x^2`, `x`, `3x`, `5`.
  ///
  /// Presence of `x` makes a variable term with default power 1; an
  /// explicit `^<digits>` exponent overrides it. The coefficient is the
  /// integer prefix of the text before `x` (the whole body for constants);
  /// empty or unreadable coefficient text falls back to magnitude 1.
  pub fn from_source(body: &str, negative: bool) -> Term {
    let has_var = body.contains('x');
    let mut power = 0;
    if has_var {
      power = 1;
      if let Some(caret) = body.find('^') {
        let digits: String = body[caret + 1..]
          .chars()
          .take_while(|c| c.is_ascii_digit())
          .collect();
        if let Ok(explicit) = digits.parse() {
          power = explicit;
        }
      }
    }

    let coeff_text = match body.find('x') {
      Some(at) => &body[..at],
      None => body,
    };
    let magnitude = leading_integer(coeff_text).unwrap_or(1);
    let coeff = if negative { -magnitude } else { magnitude };

    let kind = if !has_var {
      TermKind::Constant
    } else if power == 1 {
      TermKind::Linear
    } else {
      TermKind::Power
    };

    Term {
      original: format!("{}{body}", if negative { "-" } else { "" }),
      coeff,
      power,
      kind,
    }
  }

  pub fn is_constant(&self) -> bool {
    self.kind == TermKind::Constant
  }

  pub fn is_linear(&self) -> bool {
    self.kind == TermKind::Linear
  }
}

/// Integer prefix of a coefficient text: "12" -> 12, "2.5" -> 2
/// (fractional input is truncated to its integer part by design),
/// "abc" -> None.
fn leading_integer(text: &str) -> Option<i64> {
  let digits: String =
    text.chars().take_while(|c| c.is_ascii_digit()).collect();
  digits.parse().ok()
}

/// Outcome of applying a calculus rule to one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermResult {
  /// d/dx result: `coeff = old coeff * old power`, `power = old power - 1`.
  Derivative {
    coeff: i64,
    power: u32,
    #[serde(rename = "str")]
    display: String,
  },
  /// Antiderivative: `power = old power + 1`, `denominator = power` (always
  /// at least 1 since source powers are non-negative).
  Integral {
    numerator: i64,
    denominator: i64,
    power: u32,
    #[serde(rename = "str")]
    display: String,
  },
}

impl TermResult {
  pub fn display(&self) -> &str {
    match self {
      TermResult::Derivative { display, .. } => display,
      TermResult::Integral { display, .. } => display,
    }
  }
}

/// A parsed term together with its rule-application result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedTerm {
  #[serde(flatten)]
  pub term: Term,
  pub result: TermResult,
}

/// One scene of a numerical-reasoning walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
  pub scene: u32,
  pub text: String,
  pub visual: String,
}

/// The solver's output, consumed read-only by the timeline builder and
/// player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
  pub expression: String,
  pub topic: Topic,
  pub terms: Vec<SolvedTerm>,
  /// Definite-integral bounds `[lower, upper]`, passed through from the
  /// request.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub limits: Option<(f64, f64)>,
  /// Numerical-reasoning scenes; empty for calculus topics.
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub steps: Vec<ReasoningStep>,
}

impl Solution {
  /// The parsed source terms, without their attached results.
  pub fn source_terms(&self) -> Vec<Term> {
    self.terms.iter().map(|solved| solved.term.clone()).collect()
  }
}

/// Reassemble an expression from term source texts, inserting `+` where
/// the following term carries no sign of its own.
pub fn joined_originals(terms: &[Term]) -> String {
  let mut joined = String::new();
  for term in terms {
    if !joined.is_empty() && !term.original.starts_with('-') {
      joined.push('+');
    }
    joined.push_str(&term.original);
  }
  joined
}

/// The variable part of a formatted term: "" for power 0, "x" for power 1,
/// "x^n" otherwise.
pub fn variable_part(power: u32) -> String {
  match power {
    0 => String::new(),
    1 => "x".to_string(),
    n => format!("x^{n}"),
  }
}

/// Format an evaluation result for display: integral values print without
/// a fractional part, everything else is rounded to at most two decimals.
pub fn format_real(value: f64) -> String {
  let rounded = (value * 100.0).round() / 100.0;
  if rounded.fract() == 0.0 {
    format!("{}", rounded as i64)
  } else {
    format!("{rounded}")
  }
}
