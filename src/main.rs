use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use calcwalk::narration::DefaultNarration;
use calcwalk::player::{NullSpeech, Player, PlayerState, PLAYBACK_RATES};
use calcwalk::solve;
use calcwalk::stage;
use calcwalk::syntax::Topic;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Solve an expression and print the solution as JSON
  Solve {
    /// The expression (or word problem) to solve
    expression: String,
    /// differentiation, integration or numerical_reasoning
    #[arg(long, default_value = "differentiation")]
    topic: String,
    /// Definite-integral bounds: --limits <LOWER> <UPPER>
    #[arg(long, num_args = 2, value_names = ["LOWER", "UPPER"])]
    limits: Option<Vec<f64>>,
  },
  /// Print the timed walkthrough, driving the playback state machine
  Walkthrough {
    /// The expression (or word problem) to walk through
    expression: String,
    /// differentiation, integration or numerical_reasoning
    #[arg(long, default_value = "differentiation")]
    topic: String,
    /// Definite-integral bounds: --limits <LOWER> <UPPER>
    #[arg(long, num_args = 2, value_names = ["LOWER", "UPPER"])]
    limits: Option<Vec<f64>>,
    /// Playback rate (0.5, 1, 1.5 or 2)
    #[arg(long, default_value_t = 1.0)]
    rate: f64,
  },
}

fn parse_topic(topic: &str) -> Result<Topic> {
  topic.parse().map_err(|message: String| anyhow!(message))
}

fn parse_limits(limits: Option<Vec<f64>>) -> Option<(f64, f64)> {
  limits.and_then(|bounds| match bounds.as_slice() {
    [lower, upper] => Some((*lower, *upper)),
    _ => None,
  })
}

fn run_walkthrough(
  expression: &str,
  topic: Topic,
  limits: Option<(f64, f64)>,
  rate: f64,
) -> Result<()> {
  let solution = solve(expression, topic, limits)?;

  let mut player = Player::new(NullSpeech, DefaultNarration);
  player.load(solution.clone());
  if PLAYBACK_RATES.contains(&rate) {
    for _ in 0..PLAYBACK_RATES.len() {
      if player.playback().playback_rate == rate {
        break;
      }
      player.cycle_rate();
    }
  }

  player.play();
  let mut shown: Option<String> = None;
  while player.state() == PlayerState::Playing {
    player.advance(250.0);
    let Some(phase) = player.active_phase() else {
      break;
    };
    if shown.as_deref() == Some(phase.id.as_str()) {
      continue;
    }
    println!(
      "[{:>6} ms - {:>6} ms] {} ({})",
      phase.start, phase.end, phase.label, phase.id
    );
    if let Some(frame) = stage::phase_display(&solution, phase) {
      println!("      {frame}");
    }
    let playback = player.playback();
    if playback.show_captions
      && playback.last_spoken_phase.as_deref() == Some(phase.id.as_str())
    {
      println!("      >> {}", playback.caption);
    }
    shown = Some(phase.id.clone());
  }

  println!("total: {} ms", player.timeline().total_duration);
  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Solve {
      expression,
      topic,
      limits,
    } => {
      let solution =
        solve(&expression, parse_topic(&topic)?, parse_limits(limits))?;
      println!("{}", serde_json::to_string_pretty(&solution)?);
    }
    Commands::Walkthrough {
      expression,
      topic,
      limits,
      rate,
    } => {
      run_walkthrough(
        &expression,
        parse_topic(&topic)?,
        parse_limits(limits),
        rate,
      )?;
    }
  }
  Ok(())
}
