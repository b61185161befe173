//! Phase timelines: the fully precomputed, contiguous sequence of timed
//! segments a walkthrough plays through.

use serde::Serialize;

use crate::syntax::{Solution, TermKind, Topic};

/// Kind of work a per-term phase performs; parallel and framing phases
/// carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
  Constant,
  Linear,
  Power,
  Integration,
}

/// One named, time-boxed segment of the walkthrough. `end` is always
/// `start + duration`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
  pub id: String,
  pub label: String,
  pub start: u64,
  pub duration: u64,
  pub end: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub term_index: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub step_kind: Option<StepKind>,
  /// Literal narration text; takes precedence over the key lookup.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub visual: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scene_number: Option<u32>,
}

/// The ordered phase sequence for one solution, immutable once built.
/// Phases are contiguous: each starts where the previous one ends, the
/// first at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
  pub phases: Vec<Phase>,
  pub total_duration: u64,
}

/// Appends phases back to back, advancing a clock so contiguity holds by
/// construction.
#[derive(Default)]
struct PhaseCursor {
  phases: Vec<Phase>,
  clock: u64,
}

impl PhaseCursor {
  fn push(
    &mut self,
    id: impl Into<String>,
    duration: u64,
    label: impl Into<String>,
  ) -> usize {
    let start = self.clock;
    self.clock += duration;
    self.phases.push(Phase {
      id: id.into(),
      label: label.into(),
      start,
      duration,
      end: start + duration,
      term_index: None,
      step_kind: None,
      text: None,
      visual: None,
      scene_number: None,
    });
    self.phases.len() - 1
  }

  fn push_term(
    &mut self,
    id: String,
    duration: u64,
    label: String,
    index: usize,
    kind: StepKind,
  ) {
    let at = self.push(id, duration, label);
    self.phases[at].term_index = Some(index);
    self.phases[at].step_kind = Some(kind);
  }

  fn finish(self) -> Timeline {
    Timeline {
      phases: self.phases,
      total_duration: self.clock,
    }
  }
}

impl Timeline {
  /// Precompute the walkthrough for a solution. Pure: the same solution
  /// always yields the same phase list, and rebuilding is only needed
  /// when the solution changes.
  pub fn build(solution: &Solution) -> Timeline {
    let mut cursor = PhaseCursor::default();

    // Numerical reasoning plays its provided scenes and nothing else.
    if solution.topic == Topic::NumericalReasoning {
      for (index, step) in solution.steps.iter().enumerate() {
        let at = cursor.push(
          format!("SCENE_{}_{index}", step.scene),
          6000,
          format!("Step {}", step.scene),
        );
        cursor.phases[at].text = Some(step.text.clone());
        cursor.phases[at].visual = Some(step.visual.clone());
        cursor.phases[at].scene_number = Some(step.scene);
      }
      return cursor.finish();
    }

    cursor.push("INTRO", 3000, format!("Topic: {}", solution.topic));
    cursor.push("RULE_INTRO", 4000, "The Rule");
    cursor.push("QUESTION_SHOW", 4000, "The Problem");

    let multi_term = solution.terms.len() > 1;
    if multi_term && solution.topic == Topic::Differentiation {
      // Parallel track: every term advances through the same granular
      // sub-steps in lockstep.
      cursor.push("SPLIT", 3000, "Split Terms");
      cursor.push("PARALLEL_STEP_1", 4000, "Setup Terms");
      cursor.push("PARALLEL_STEP_2", 4000, "Apply Rule");
      cursor.push("PARALLEL_STEP_3", 4000, "Subtract Powers");
      cursor.push("PARALLEL_STEP_4", 4000, "Simplify");
      cursor.push("PARALLEL_STEP_5", 3000, "Finalize Terms");
      cursor.push("PARALLEL_HOLD", 3000, "Review Results");
    } else {
      // Sequential track: one term at a time, sub-sequence shaped by the
      // term kind.
      for (index, solved) in solution.terms.iter().enumerate() {
        let base = format!("SOLVE_TERM_{index}");
        let nth = index + 1;
        if solution.topic == Topic::Differentiation {
          match solved.term.kind {
            TermKind::Linear => {
              cursor.push_term(
                format!("{base}_LINEAR_SETUP"),
                4000,
                format!("Term {nth}: Setup"),
                index,
                StepKind::Linear,
              );
              cursor.push_term(
                format!("{base}_LINEAR_RULE"),
                4000,
                format!("Term {nth}: Power Rule"),
                index,
                StepKind::Linear,
              );
              cursor.push_term(
                format!("{base}_LINEAR_SUBTRACT"),
                4000,
                format!("Term {nth}: Subtract"),
                index,
                StepKind::Linear,
              );
              cursor.push_term(
                format!("{base}_LINEAR_ZERO"),
                4000,
                format!("Term {nth}: Zero Power"),
                index,
                StepKind::Linear,
              );
              cursor.push_term(
                format!("{base}_LINEAR_FINAL"),
                3000,
                format!("Term {nth}: Simplified"),
                index,
                StepKind::Linear,
              );
            }
            TermKind::Constant => {
              cursor.push_term(
                format!("{base}_SHOW"),
                3000,
                format!("Term {nth}: Constant"),
                index,
                StepKind::Constant,
              );
              cursor.push_term(
                format!("{base}_CONST_ZERO"),
                3000,
                format!("Term {nth}: Becomes Zero"),
                index,
                StepKind::Constant,
              );
            }
            TermKind::Power => {
              cursor.push_term(
                format!("{base}_SHOW"),
                3000,
                format!("Term {nth}: Setup"),
                index,
                StepKind::Power,
              );
              cursor.push_term(
                format!("{base}_POWER_RULE"),
                4000,
                format!("Term {nth}: Power Rule"),
                index,
                StepKind::Power,
              );
              cursor.push_term(
                format!("{base}_SUBTRACT"),
                4000,
                format!("Term {nth}: Subtract"),
                index,
                StepKind::Power,
              );
              cursor.push_term(
                format!("{base}_SIMPLIFY"),
                4000,
                format!("Term {nth}: Simplify"),
                index,
                StepKind::Power,
              );
              cursor.push_term(
                format!("{base}_POWER_FINAL"),
                3000,
                format!("Term {nth}: Final"),
                index,
                StepKind::Power,
              );
            }
          }
        } else {
          cursor.push_term(
            format!("{base}_INTEGRATE"),
            5000,
            format!("Integrate: {}", solved.term.original),
            index,
            StepKind::Integration,
          );
        }
      }
    }

    cursor.push("COMBINE", 4000, "Combine Result");
    cursor.push("FINAL_ANSWER", 4000, "Final Answer");

    if solution.limits.is_some() {
      cursor.push("LIMITS_SETUP", 3000, "Limits Setup");
      cursor.push("LIMITS_CALC", 5000, "Calculate Area");
    }

    cursor.finish()
  }

  /// The phase whose `[start, end)` window contains `time`. At or past
  /// the total duration the last phase stays active.
  pub fn phase_at(&self, time: f64) -> Option<&Phase> {
    for phase in &self.phases {
      if time >= phase.start as f64 && time < phase.end as f64 {
        return Some(phase);
      }
    }
    self.phases.last()
  }
}
