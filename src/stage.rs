//! Plain-text rendering of what each phase shows on screen.
//!
//! A phase with nothing to draw yields `None`; playback carries on over a
//! blank frame rather than stopping.

use crate::rules;
use crate::syntax::{format_real, Solution, SolvedTerm, TermKind, Topic};
use crate::timeline::Phase;

/// Render the visual frame for the active phase, if it has one.
pub fn phase_display(solution: &Solution, phase: &Phase) -> Option<String> {
  let id = phase.id.as_str();

  if id == "INTRO" {
    return Some(format!(
      "{}: Step-by-Step Visualization",
      solution.topic.to_string().to_uppercase()
    ));
  }
  if id == "RULE_INTRO" || id == "RULE_DEMO" {
    return Some(rule_formula(solution.topic));
  }
  if id == "QUESTION_SHOW" {
    return Some(solution.expression.clone());
  }
  if id == "SPLIT" {
    let row: Vec<&str> = solution
      .terms
      .iter()
      .map(|solved| solved.term.original.as_str())
      .collect();
    return Some(row.join("   "));
  }

  if id.starts_with("SCENE_") {
    let visual = phase.visual.clone()?;
    return match phase.scene_number {
      Some(scene) => Some(format!("Step {scene}: {visual}")),
      None => Some(visual),
    };
  }

  if id.starts_with("PARALLEL_") {
    let frames: Vec<String> = solution
      .terms
      .iter()
      .filter_map(|solved| {
        let suffix = parallel_suffix(id, solved.term.kind)?;
        granular_frame(solved, suffix)
      })
      .collect();
    if frames.is_empty() {
      return None;
    }
    return Some(frames.join("   |   "));
  }

  if id.starts_with("SOLVE_TERM") {
    let solved = solution.terms.get(phase.term_index?)?;
    if id.ends_with("_INTEGRATE") {
      return Some(format!("∫ {} dx", solved.term.original));
    }
    let base = format!("SOLVE_TERM_{}_", phase.term_index?);
    let suffix = id.strip_prefix(base.as_str())?;
    return granular_frame(solved, suffix);
  }

  if id == "COMBINE" || id == "FINAL_ANSWER" {
    return Some(combined_answer(solution));
  }

  if id.starts_with("LIMITS") {
    return limits_frame(solution, id);
  }

  None
}

/// The rule card shown before the worked example.
fn rule_formula(topic: Topic) -> String {
  match topic {
    Topic::Integration => {
      "Integration Power Rule: ∫ x^n dx = x^(n+1) / (n+1)".to_string()
    }
    _ => {
      "Differentiation Power Rule: if y = x^n, then dy/dx = n · x^(n-1)"
        .to_string()
    }
  }
}

/// Granular sub-step a term shows during each parallel phase.
fn parallel_suffix(phase_id: &str, kind: TermKind) -> Option<&'static str> {
  let (linear, power, constant) = match phase_id {
    "PARALLEL_STEP_1" => ("LINEAR_SETUP", "SHOW", "SHOW"),
    "PARALLEL_STEP_2" => ("LINEAR_RULE", "POWER_RULE", "CONST_ZERO"),
    "PARALLEL_STEP_3" => ("LINEAR_SUBTRACT", "SUBTRACT", "CONST_ZERO"),
    "PARALLEL_STEP_4" => ("LINEAR_ZERO", "SIMPLIFY", "CONST_ZERO"),
    "PARALLEL_STEP_5" | "PARALLEL_HOLD" => {
      ("LINEAR_FINAL", "POWER_FINAL", "CONST_ZERO")
    }
    _ => return None,
  };
  Some(match kind {
    TermKind::Linear => linear,
    TermKind::Power => power,
    TermKind::Constant => constant,
  })
}

/// One frame of a term's granular derivation.
fn granular_frame(solved: &SolvedTerm, suffix: &str) -> Option<String> {
  let coeff = solved.term.coeff;
  let power = solved.term.power;
  let shown_coeff = |separator: &str| {
    if coeff == 1 {
      String::new()
    } else {
      format!("{coeff}{separator}")
    }
  };

  let frame = match solved.term.kind {
    TermKind::Linear => match suffix {
      "LINEAR_SETUP" => format!("{}x^1", shown_coeff("")),
      "LINEAR_RULE" => format!("{}1 · x^1", shown_coeff(" × ")),
      "LINEAR_SUBTRACT" => format!("{}1 · x^(1 - 1)", shown_coeff(" × ")),
      "LINEAR_ZERO" => format!("{}x^0   (x^0 = 1)", shown_coeff(" · ")),
      "LINEAR_FINAL" => solved.result.display().to_string(),
      _ => return None,
    },
    TermKind::Power => match suffix {
      "SHOW" => format!("{}x^{power}", shown_coeff("")),
      "POWER_RULE" => format!("{power} · {}x^{power}", shown_coeff("")),
      "SUBTRACT" => {
        format!("{}x^({power} - 1)", i64::from(power) * coeff)
      }
      "SIMPLIFY" => format!(
        "{}x^{}",
        i64::from(power) * coeff,
        power.saturating_sub(1)
      ),
      "POWER_FINAL" => solved.result.display().to_string(),
      _ => return None,
    },
    TermKind::Constant => match suffix {
      "SHOW" => solved.term.original.clone(),
      _ => "0".to_string(),
    },
  };
  Some(frame)
}

/// The combined final expression, with the topic's reading prefix.
fn combined_answer(solution: &Solution) -> String {
  if solution.topic == Topic::Integration {
    let combined =
      rules::combine(&solution.terms, solution.limits.is_none());
    format!("∫ = {combined}")
  } else {
    format!("dy/dx = {}", rules::combine(&solution.terms, false))
  }
}

/// Definite-limit frames: the bracketed antiderivative, then the
/// substitution and subtraction. Evaluation failures render nothing.
fn limits_frame(solution: &Solution, id: &str) -> Option<String> {
  let (lower, upper) = solution.limits?;
  let source = solution.source_terms();

  if id == "LIMITS_SETUP" {
    let antiderivative = if solution.topic == Topic::Integration {
      rules::combine(&solution.terms, false)
    } else {
      rules::combine(&rules::integrate_terms(&source), false)
    };
    return Some(format!(
      "[ {antiderivative} ]  from {} to {}",
      format_real(lower),
      format_real(upper)
    ));
  }

  if id == "LIMITS_CALC" {
    let eval = rules::evaluate_definite(&source, lower, upper).ok()?;
    return Some(format!(
      "({}) - ({}) = {}",
      format_real(eval.at_upper),
      format_real(eval.at_lower),
      format_real(eval.area)
    ));
  }

  None
}
