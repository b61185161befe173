//! Narration lines for walkthrough phases, kept short and calming.

use crate::syntax::Topic;
use crate::timeline::Phase;

/// Phase context handed to a narration lookup alongside the normalized
/// key.
#[derive(Debug, Clone, Copy)]
pub struct NarrationContext<'a> {
  pub topic: Topic,
  pub phase: &'a Phase,
}

/// Pure text lookup for a phase. An empty string means "no narration for
/// this phase".
pub trait NarrationSource {
  fn narration_text(&self, key: &str, ctx: &NarrationContext) -> String;
}

/// The built-in narration table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultNarration;

impl NarrationSource for DefaultNarration {
  fn narration_text(&self, key: &str, ctx: &NarrationContext) -> String {
    narration_text(key, ctx)
  }
}

/// Look up the narration line for a normalized phase key.
pub fn narration_text(key: &str, ctx: &NarrationContext) -> String {
  if key.is_empty() {
    return String::new();
  }

  // Fallback for term phases that never got a granular mapping.
  if key.starts_with("SOLVE_TERM") {
    return "Now we solve this part.".to_string();
  }

  if key == "INTRO" {
    return format!("Let's solve this {} together.", ctx.topic);
  }

  let line = match key {
    "RULE_INTRO" => "First, let's remember the rule.",
    "RULE_DEMO" => "We use a simple rule for powers.",
    "QUESTION_SHOW" => "Now we apply the rule to this expression.",
    "SPLIT" => "We split the expression into separate terms.",

    // Granular power-term steps.
    "TERM_SHOW" => "Let's look at this term.",
    "TERM_POWER_RULE" => "We bring the power down.",
    "TERM_SUBTRACT" => "And reduce the power by one.",
    "TERM_SIMPLIFY" => "Simplify to get the result.",
    "TERM_POWER_FINAL" => "Here is the result for this term.",

    // Linear terms (ax -> a).
    "TERM_LINEAR_SETUP" => "The power of x is one.",
    "TERM_LINEAR_RULE" => "Bring the power down.",
    "TERM_LINEAR_SUBTRACT" => "The power reduces by one.",
    "TERM_LINEAR_ZERO" => "x power zero equals one.",
    "TERM_LINEAR_FINAL" => "So we are left with just the constant.",

    "TERM_CONST_ZERO" => "The constant becomes zero.",
    "TERM_INTEGRATE" => "Add one to the power, then divide by the new power.",

    "COMBINE" => "Now we combine both results.",
    "FINAL_ANSWER" => "This is the final answer.",

    "LIMITS_SETUP" => "We put brackets around our answer.",
    "LIMITS_CALC" => "Subtract to get the final area.",

    // Parallel track.
    "PARALLEL_STEP_1" => "We focus on both parts together.",
    "PARALLEL_STEP_2" => {
      "We apply the same steps to both parts at the same time."
    }
    "PARALLEL_STEP_3" => "Reduce the powers step by step.",
    "PARALLEL_STEP_4" => "Simplify the results.",
    "PARALLEL_STEP_5" => "Here are the answers for each part.",
    "PARALLEL_HOLD" => "Now we look at the results from both sides.",

    _ => "",
  };
  line.to_string()
}
