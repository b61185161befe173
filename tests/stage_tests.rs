use calcwalk::solve;
use calcwalk::stage::phase_display;
use calcwalk::syntax::{Solution, Topic};
use calcwalk::timeline::{Phase, Timeline};

fn phase<'a>(timeline: &'a Timeline, id: &str) -> &'a Phase {
  timeline
    .phases
    .iter()
    .find(|p| p.id == id)
    .unwrap_or_else(|| panic!("missing phase {id}"))
}

fn solved(expression: &str, topic: Topic) -> (Solution, Timeline) {
  let solution = solve(expression, topic, None).unwrap();
  let timeline = Timeline::build(&solution);
  (solution, timeline)
}

#[test]
fn question_phase_shows_the_expression() {
  let (solution, timeline) = solved("2x^2 + 3x - 5", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "QUESTION_SHOW")),
    Some("2x^2 + 3x - 5".to_string())
  );
}

#[test]
fn split_phase_lists_the_terms() {
  let (solution, timeline) = solved("2x^2 + 2x", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SPLIT")),
    Some("2x^2   2x".to_string())
  );
}

#[test]
fn granular_power_frames_walk_the_rule() {
  let (solution, timeline) = solved("3x^2", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_SHOW")),
    Some("3x^2".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_POWER_RULE")),
    Some("2 · 3x^2".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_SUBTRACT")),
    Some("6x^(2 - 1)".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_SIMPLIFY")),
    Some("6x^1".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_POWER_FINAL")),
    Some("6x".to_string())
  );
}

#[test]
fn granular_linear_frames_reach_the_constant() {
  let (solution, timeline) = solved("4x", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_LINEAR_SETUP")),
    Some("4x^1".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_LINEAR_RULE")),
    Some("4 × 1 · x^1".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_LINEAR_FINAL")),
    Some("4".to_string())
  );
}

#[test]
fn constant_frames_show_then_vanish() {
  let (solution, timeline) = solved("5", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_SHOW")),
    Some("5".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_CONST_ZERO")),
    Some("0".to_string())
  );
}

#[test]
fn parallel_frames_advance_every_term_together() {
  let (solution, timeline) = solved("2x^2 + 2x", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "PARALLEL_STEP_2")),
    Some("2 · 2x^2   |   2 × 1 · x^1".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "PARALLEL_HOLD")),
    Some("4x   |   2".to_string())
  );
}

#[test]
fn combine_phase_shows_the_final_expression() {
  let (solution, timeline) = solved("2x^2 + 3x - 5", Topic::Differentiation);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "COMBINE")),
    Some("dy/dx = 4x + 3".to_string())
  );
}

#[test]
fn indefinite_integral_carries_its_constant() {
  let (solution, timeline) = solved("4x", Topic::Integration);
  assert_eq!(
    phase_display(&solution, phase(&timeline, "FINAL_ANSWER")),
    Some("∫ = 2x^2 + C".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "SOLVE_TERM_0_INTEGRATE")),
    Some("∫ 4x dx".to_string())
  );
}

#[test]
fn definite_integral_frames_substitute_the_bounds() {
  let solution =
    solve("3x^2", Topic::Integration, Some((0.0, 2.0))).unwrap();
  let timeline = Timeline::build(&solution);

  // No "+ C" once limits are attached.
  assert_eq!(
    phase_display(&solution, phase(&timeline, "COMBINE")),
    Some("∫ = x^3".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "LIMITS_SETUP")),
    Some("[ x^3 ]  from 0 to 2".to_string())
  );
  assert_eq!(
    phase_display(&solution, phase(&timeline, "LIMITS_CALC")),
    Some("(8) - (0) = 8".to_string())
  );
}

#[test]
fn scene_phases_render_their_visual() {
  let solution = solve(
    "What is 20 percent of 50?",
    Topic::NumericalReasoning,
    None,
  )
  .unwrap();
  let timeline = Timeline::build(&solution);
  assert_eq!(
    phase_display(&solution, &timeline.phases[0]),
    Some("Step 1: Find 20% of 50".to_string())
  );
}

#[test]
fn rule_phase_matches_the_topic() {
  let (solution, timeline) = solved("x^2", Topic::Integration);
  let frame =
    phase_display(&solution, phase(&timeline, "RULE_INTRO")).unwrap();
  assert!(frame.contains("Integration Power Rule"));

  let (solution, timeline) = solved("x^2", Topic::Differentiation);
  let frame =
    phase_display(&solution, phase(&timeline, "RULE_INTRO")).unwrap();
  assert!(frame.contains("dy/dx = n · x^(n-1)"));
}
