//! Tick-driven playback over a phase timeline.
//!
//! The player is single-threaded and cooperative: the embedding render
//! loop calls [`Player::advance`] once per frame and only the clock moves
//! phases forward. Speech is a fire-and-forget side effect behind
//! [`SpeechPort`]; the player never waits for narration to finish.

use crate::narration::{NarrationContext, NarrationSource};
use crate::syntax::Solution;
use crate::timeline::{Phase, Timeline};

/// Discrete playback speeds the rate control cycles through.
pub const PLAYBACK_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Fire-and-forget speech sink. A new utterance must supersede any
/// in-flight one, so the player always cancels before it speaks.
pub trait SpeechPort {
  fn speak(&mut self, text: &str, rate: f64, volume: f64);
  fn cancel(&mut self);
}

/// Speech sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechPort for NullSpeech {
  fn speak(&mut self, _text: &str, _rate: f64, _volume: f64) {}
  fn cancel(&mut self) {}
}

/// Player lifecycle, derived from the playback fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
  Idle,
  Ready,
  Playing,
  Paused,
  Ended,
}

/// Mutable playback bookkeeping. Time and narration memory reset whenever
/// a new solution is loaded; rate, mute and caption settings persist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
  /// Milliseconds into the timeline, clamped to `[0, total_duration]`.
  pub current_time: f64,
  pub is_playing: bool,
  pub playback_rate: f64,
  pub is_muted: bool,
  pub show_captions: bool,
  /// Text of the most recent narration, mirrored for caption display.
  pub caption: String,
  pub last_spoken_phase: Option<String>,
}

impl Default for PlaybackState {
  fn default() -> Self {
    PlaybackState {
      current_time: 0.0,
      is_playing: false,
      playback_rate: 1.0,
      is_muted: false,
      show_captions: true,
      caption: String::new(),
      last_spoken_phase: None,
    }
  }
}

/// The walkthrough playback state machine.
pub struct Player<S: SpeechPort, N: NarrationSource> {
  solution: Option<Solution>,
  timeline: Timeline,
  playback: PlaybackState,
  speech: S,
  narration: N,
}

impl<S: SpeechPort, N: NarrationSource> Player<S, N> {
  pub fn new(speech: S, narration: N) -> Self {
    Player {
      solution: None,
      timeline: Timeline::default(),
      playback: PlaybackState::default(),
      speech,
      narration,
    }
  }

  /// Swap in a new solution. Timeline and playback cursor are replaced
  /// together so a fresh timeline can never run against a stale time, and
  /// narration memory is cleared.
  pub fn load(&mut self, solution: Solution) {
    self.timeline = Timeline::build(&solution);
    self.solution = Some(solution);
    self.playback.current_time = 0.0;
    self.playback.is_playing = false;
    self.playback.caption.clear();
    self.playback.last_spoken_phase = None;
    self.speech.cancel();
  }

  pub fn solution(&self) -> Option<&Solution> {
    self.solution.as_ref()
  }

  pub fn timeline(&self) -> &Timeline {
    &self.timeline
  }

  pub fn playback(&self) -> &PlaybackState {
    &self.playback
  }

  pub fn speech(&self) -> &S {
    &self.speech
  }

  pub fn state(&self) -> PlayerState {
    if self.solution.is_none() {
      return PlayerState::Idle;
    }
    if self.playback.is_playing {
      return PlayerState::Playing;
    }
    let total = self.timeline.total_duration as f64;
    if total > 0.0 && self.playback.current_time >= total {
      PlayerState::Ended
    } else if self.playback.current_time == 0.0 {
      PlayerState::Ready
    } else {
      PlayerState::Paused
    }
  }

  pub fn play(&mut self) {
    if self.solution.is_some() && self.state() != PlayerState::Ended {
      self.playback.is_playing = true;
    }
  }

  pub fn pause(&mut self) {
    self.playback.is_playing = false;
  }

  pub fn toggle_play(&mut self) {
    if self.playback.is_playing {
      self.pause();
    } else {
      self.play();
    }
  }

  /// Move the cursor, clamped to the timeline. Seeking never triggers
  /// narration by itself; only autonomous playback does.
  pub fn seek(&mut self, time_ms: f64) {
    let total = self.timeline.total_duration as f64;
    self.playback.current_time = time_ms.clamp(0.0, total);
  }

  /// Advance to the next entry of [`PLAYBACK_RATES`], wrapping around.
  pub fn cycle_rate(&mut self) {
    let next = PLAYBACK_RATES
      .iter()
      .position(|rate| *rate == self.playback.playback_rate)
      .map(|at| (at + 1) % PLAYBACK_RATES.len())
      .unwrap_or(0);
    self.playback.playback_rate = PLAYBACK_RATES[next];
  }

  pub fn toggle_mute(&mut self) {
    self.playback.is_muted = !self.playback.is_muted;
  }

  pub fn toggle_captions(&mut self) {
    self.playback.show_captions = !self.playback.show_captions;
  }

  /// The phase under the playback cursor; the last phase stays active at
  /// the very end.
  pub fn active_phase(&self) -> Option<&Phase> {
    if self.solution.is_none() {
      return None;
    }
    self.timeline.phase_at(self.playback.current_time)
  }

  /// One cooperative tick: advance the clock by `delta_ms` scaled by the
  /// playback rate, clamped to the timeline. Hitting the end stops
  /// playback. Narration fires on phase entry, exactly once per phase.
  pub fn advance(&mut self, delta_ms: f64) {
    if !self.playback.is_playing {
      return;
    }
    let total = self.timeline.total_duration as f64;
    let next =
      self.playback.current_time + delta_ms * self.playback.playback_rate;
    if next >= total {
      self.playback.current_time = total;
      self.playback.is_playing = false;
    } else {
      self.playback.current_time = next.max(0.0);
    }
    if self.playback.is_playing {
      self.narrate_active_phase();
    }
  }

  fn narrate_active_phase(&mut self) {
    let Some(solution) = self.solution.as_ref() else {
      return;
    };
    let Some(phase) = self.timeline.phase_at(self.playback.current_time)
    else {
      return;
    };
    if self.playback.last_spoken_phase.as_deref() == Some(phase.id.as_str()) {
      return;
    }

    // Phase-supplied literal text wins over the key lookup.
    let text = match &phase.text {
      Some(text) => text.clone(),
      None => {
        let key = narration_key(&phase.id);
        let ctx = NarrationContext {
          topic: solution.topic,
          phase,
        };
        self.narration.narration_text(&key, &ctx)
      }
    };
    if text.is_empty() {
      return;
    }

    let rate = 0.8 * self.playback.playback_rate;
    let volume = if self.playback.is_muted { 0.0 } else { 1.0 };
    self.speech.cancel();
    self.speech.speak(&text, rate, volume);
    self.playback.caption = text;
    self.playback.last_spoken_phase = Some(phase.id.clone());
  }
}

/// Narration lookup key for a phase id: `SOLVE_TERM_<n>_SUFFIX` maps to
/// `TERM_SUFFIX`; parallel and framing ids pass through unchanged.
pub fn narration_key(phase_id: &str) -> String {
  if let Some(rest) = phase_id.strip_prefix("SOLVE_TERM_") {
    let after_index =
      rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_index.len() < rest.len() {
      if let Some(suffix) = after_index.strip_prefix('_') {
        return format!("TERM_{suffix}");
      }
    }
  }
  phase_id.to_string()
}
