//! Rule-based solver for basic numerical reasoning word problems:
//! percentages, unit cost, speed and distance, clock differences and
//! plain arithmetic.

use std::sync::LazyLock;

use regex::Regex;

use crate::syntax::{format_real, ReasoningStep, Solution, Topic};
use crate::SolverError;

static WORD_NUMBERS: LazyLock<Vec<(Regex, &'static str)>> =
  LazyLock::new(|| {
    [
      ("one", "1"),
      ("two", "2"),
      ("three", "3"),
      ("four", "4"),
      ("five", "5"),
      ("six", "6"),
      ("seven", "7"),
      ("eight", "8"),
      ("nine", "9"),
      ("ten", "10"),
      ("twenty", "20"),
      ("thirty", "30"),
      ("fifty", "50"),
      ("hundred", "100"),
    ]
    .iter()
    .map(|(word, digits)| {
      (Regex::new(&format!(r"\b{word}\b")).unwrap(), *digits)
    })
    .collect()
  });

static PERCENT_OF: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\d+)\s*(?:percent|%)\s*of\s*(\d+)").unwrap()
});

static UNIT_COST: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"1\s+([a-z]+)\s+costs?\s+(\d+(?:\.\d+)?)").unwrap()
});

static SPEED: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\d+)\s*(?:km|miles|m)\s*in\s*(\d+)\s*(?:hour|hr|min|minute|sec)")
    .unwrap()
});

static TARGET_TIME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"how\s*far\s*in\s*(\d+)\s*(?:hour|hr|min|minute|sec)").unwrap()
});

static CLOCK_RANGE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\d{1,2}):(\d{2})\s*to\s*(\d{1,2}):(\d{2})").unwrap()
});

static ARITHMETIC: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(\d+)\s*([+*/-])\s*(\d+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionKind {
  Percentage,
  UnitaryCost,
  DistanceSpeed,
  TimeDiff,
  BasicArithmetic,
  Unknown,
}

/// Lowercase the question and replace spelled-out numbers with digits.
fn normalize(question: &str) -> String {
  let mut text = question.trim().to_lowercase();
  for (pattern, digits) in WORD_NUMBERS.iter() {
    text = pattern.replace_all(&text, *digits).into_owned();
  }
  text
}

fn detect(text: &str) -> QuestionKind {
  if text.contains("percent") || text.contains('%') {
    QuestionKind::Percentage
  } else if text.contains("cost")
    || text.contains("buy")
    || text.contains("price")
  {
    QuestionKind::UnitaryCost
  } else if text.contains("walk")
    || text.contains("run")
    || text.contains("speed")
    || text.contains("km")
    || text.contains("miles")
  {
    QuestionKind::DistanceSpeed
  } else if text.contains("from")
    && text.contains("to")
    && (text.contains("minutes")
      || text.contains("hours")
      || text.contains(':'))
  {
    QuestionKind::TimeDiff
  } else if ARITHMETIC.is_match(text) {
    QuestionKind::BasicArithmetic
  } else {
    QuestionKind::Unknown
  }
}

/// Classify a word problem and produce its scene-by-scene walkthrough.
/// Unmatched questions come back as guidance errors telling the student
/// what the solver can handle.
pub fn solve(question: &str) -> Result<Solution, SolverError> {
  let normalized = normalize(question);
  let steps = match detect(&normalized) {
    QuestionKind::Percentage => percentage_steps(&normalized)
      .ok_or_else(|| {
        guidance("I can help with questions like 'What is 20 percent of 50?'")
      })?,
    QuestionKind::UnitaryCost => {
      unitary_cost_steps(&normalized).ok_or_else(|| {
        guidance(
          "Please ask in the format: 'If 1 pen costs 10, how much do 4 \
           pens cost?'",
        )
      })?
    }
    QuestionKind::DistanceSpeed => {
      distance_steps(&normalized).ok_or_else(|| {
        guidance(
          "I can help with questions like 'A car goes 50 km in 1 hour. \
           How far in 3 hours?'",
        )
      })?
    }
    QuestionKind::TimeDiff => time_diff_steps(&normalized).ok_or_else(|| {
      guidance(
        "I can help with time questions like 'How many minutes from 2:30 \
         to 3:15?'",
      )
    })?,
    QuestionKind::BasicArithmetic => arithmetic_steps(&normalized)
      .ok_or_else(|| {
        guidance(
          "I can help with numerical reasoning like percentages, costs, \
           distance, and time.",
        )
      })?,
    QuestionKind::Unknown => {
      return Err(guidance(
        "I can help with numerical reasoning like percentages, costs, \
         distance, and time.",
      ));
    }
  };

  Ok(Solution {
    expression: question.to_string(),
    topic: Topic::NumericalReasoning,
    terms: Vec::new(),
    limits: None,
    steps,
  })
}

fn guidance(message: &str) -> SolverError {
  SolverError::UnsupportedQuestion(message.to_string())
}

fn step(scene: u32, text: &str, visual: String) -> ReasoningStep {
  ReasoningStep {
    scene,
    text: text.to_string(),
    visual,
  }
}

fn capture_f64(caps: &regex::Captures, at: usize) -> Option<f64> {
  caps.get(at)?.as_str().parse().ok()
}

fn percentage_steps(text: &str) -> Option<Vec<ReasoningStep>> {
  let caps = PERCENT_OF.captures(text)?;
  let pct = capture_f64(&caps, 1)?;
  let val = capture_f64(&caps, 2)?;
  let hundredth = val / 100.0;
  let result = pct / 100.0 * val;

  let (pct, val, hundredth, result) = (
    format_real(pct),
    format_real(val),
    format_real(hundredth),
    format_real(result),
  );
  Some(vec![
    step(
      1,
      "Let us understand the information.",
      format!("Find {pct}% of {val}"),
    ),
    step(
      2,
      "We interpret 'percent' as 'per 100'.",
      format!("{pct}% means {pct}/100"),
    ),
    step(
      3,
      "We set up the multiplication.",
      format!("{pct}/100 × {val}"),
    ),
    step(
      3,
      "First, divide by 100.",
      format!("{pct} × ({val} / 100) = {pct} × {hundredth}"),
    ),
    step(4, "Now multiply.", format!("{pct} × {hundredth} = {result}")),
    step(5, "This is the final answer.", format!("Answer: {result}")),
  ])
}

fn unitary_cost_steps(text: &str) -> Option<Vec<ReasoningStep>> {
  let caps = UNIT_COST.captures(text)?;
  let item = caps.get(1)?.as_str().to_string();
  let unit_price = capture_f64(&caps, 2)?;

  // Find the quantity being asked about: the first count of the same item
  // that is not the unit line itself.
  let quantity_pattern = Regex::new(&format!(r"(\d+)\s+{item}s?")).ok()?;
  let target_qty = quantity_pattern
    .captures_iter(text)
    .filter_map(|qty_caps| capture_f64(&qty_caps, 1))
    .find(|qty| *qty != 1.0)?;

  let total = unit_price * target_qty;
  let (unit_price, target_qty, total) = (
    format_real(unit_price),
    format_real(target_qty),
    format_real(total),
  );
  Some(vec![
    step(
      1,
      "Let us understand the information.",
      format!("1 {item} = {unit_price}"),
    ),
    step(
      2,
      "We need to find the cost of multiple items.",
      format!("Find cost of {target_qty} {item}s"),
    ),
    step(
      3,
      &format!("Since 1 costs {unit_price}, we multiply by {target_qty}."),
      format!("{unit_price} × {target_qty}"),
    ),
    step(
      4,
      "Perform the multiplication.",
      format!("{unit_price} × {target_qty} = {total}"),
    ),
    step(5, "This is the final answer.", format!("Total: {total}")),
  ])
}

fn distance_steps(text: &str) -> Option<Vec<ReasoningStep>> {
  let caps = SPEED.captures(text)?;
  let dist = capture_f64(&caps, 1)?;
  let time = capture_f64(&caps, 2)?;
  let target = capture_f64(&TARGET_TIME.captures(text)?, 1)?;

  // Only unit-rate speeds ("per 1 hour") are supported.
  if time != 1.0 {
    return None;
  }
  let total = dist * target;

  let (dist, time, target, total) = (
    format_real(dist),
    format_real(time),
    format_real(target),
    format_real(total),
  );
  Some(vec![
    step(
      1,
      "Understand the speed.",
      format!("Speed: {dist} km per {time} hour"),
    ),
    step(
      2,
      "Identify the goal.",
      format!("Find distance for {target} hours"),
    ),
    step(3, "Multiply speed by time.", format!("{dist} × {target}")),
    step(
      4,
      "Calculate the result.",
      format!("{dist} × {target} = {total}"),
    ),
    step(5, "Final Answer.", format!("{total} km")),
  ])
}

fn time_diff_steps(text: &str) -> Option<Vec<ReasoningStep>> {
  let caps = CLOCK_RANGE.captures(text)?;
  let h1: i64 = caps.get(1)?.as_str().parse().ok()?;
  let m1: i64 = caps.get(2)?.as_str().parse().ok()?;
  let h2: i64 = caps.get(3)?.as_str().parse().ok()?;
  let m2: i64 = caps.get(4)?.as_str().parse().ok()?;

  let start = h1 * 60 + m1;
  let mut end = h2 * 60 + m2;
  // 12-hour clock: an "earlier" end time means we wrapped past noon.
  if end < start {
    end += 12 * 60;
  }
  let diff = end - start;

  Some(vec![
    step(
      1,
      "Identify start and end times.",
      format!("{h1}:{m1:02} → {h2}:{m2:02}"),
    ),
    step(
      2,
      "We interpret this as finding the difference.",
      "Target - Start".to_string(),
    ),
    step(
      3,
      "Subtract hours and minutes.",
      format!("Count from {h1}:{m1:02} to {h2}:{m2:02}"),
    ),
    step(4, "Calculate total minutes.", format!("{diff} minutes")),
    step(5, "Final Answer.", format!("{diff} minutes")),
  ])
}

fn arithmetic_steps(text: &str) -> Option<Vec<ReasoningStep>> {
  let caps = ARITHMETIC.captures(text)?;
  let a = capture_f64(&caps, 1)?;
  let op = caps.get(2)?.as_str();
  let b = capture_f64(&caps, 3)?;

  let result = match op {
    "+" => a + b,
    "-" => a - b,
    "*" => a * b,
    "/" if b != 0.0 => a / b,
    _ => return None,
  };

  let (a, b, result) = (format_real(a), format_real(b), format_real(result));
  Some(vec![
    step(
      1,
      "Let us understand the information.",
      format!("{a} {op} {b}"),
    ),
    step(
      2,
      "We work the operation out step by step.",
      format!("{a} {op} {b} = ?"),
    ),
    step(3, "Calculate the result.", format!("{a} {op} {b} = {result}")),
    step(4, "This is the final answer.", format!("Answer: {result}")),
  ])
}
