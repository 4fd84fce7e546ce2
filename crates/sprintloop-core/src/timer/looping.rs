//! Endless WORK/REST loop.
//!
//! Same tick contract as [`IntervalEngine`](super::IntervalEngine), but with
//! two phases whose lengths the user can change at any time. Changes are
//! picked up at the next boundary, never mid-phase.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::routine::PhaseKind;
use super::view::{clamp_secs, format_remaining, TimerView};
use super::Countdown;
use crate::cue::{Cue, CueEmitter};
use crate::events::Event;

pub const DEFAULT_WORK_SECS: u32 = 30;
pub const DEFAULT_REST_SECS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoopPhase {
    Work,
    Rest,
}

impl LoopPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            LoopPhase::Work => PhaseKind::Work,
            LoopPhase::Rest => PhaseKind::Rest,
        }
    }
}

/// Parse a user-typed duration; anything that is not a positive whole
/// number of seconds yields `default`.
pub fn parse_secs_or(text: &str, default: u32) -> u32 {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

/// Work and rest lengths, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopConfig {
    work_secs: u32,
    rest_secs: u32,
}

impl LoopConfig {
    /// Zero falls back to the default for that side.
    pub fn new(work_secs: u32, rest_secs: u32) -> Self {
        Self {
            work_secs: if work_secs == 0 { DEFAULT_WORK_SECS } else { work_secs },
            rest_secs: if rest_secs == 0 { DEFAULT_REST_SECS } else { rest_secs },
        }
    }

    pub fn from_text(work: &str, rest: &str) -> Self {
        Self {
            work_secs: parse_secs_or(work, DEFAULT_WORK_SECS),
            rest_secs: parse_secs_or(rest, DEFAULT_REST_SECS),
        }
    }

    pub fn work_secs(&self) -> u32 {
        self.work_secs
    }

    pub fn rest_secs(&self) -> u32 {
        self.rest_secs
    }

    fn secs_for(&self, phase: LoopPhase) -> u32 {
        match phase {
            LoopPhase::Work => self.work_secs,
            LoopPhase::Rest => self.rest_secs,
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECS, DEFAULT_REST_SECS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Paused,
}

pub struct LoopEngine {
    config: LoopConfig,
    phase: LoopPhase,
    remaining: i64,
    state: LoopState,
    cues: Arc<dyn CueEmitter>,
}

impl fmt::Debug for LoopEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("remaining", &self.remaining)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl LoopEngine {
    pub fn new(config: LoopConfig, cues: Arc<dyn CueEmitter>) -> Self {
        Self {
            config,
            phase: LoopPhase::Work,
            remaining: i64::from(config.work_secs),
            state: LoopState::Idle,
            cues,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> LoopConfig {
        self.config
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn is_idle(&self) -> bool {
        self.state == LoopState::Idle
    }

    pub fn view(&self) -> TimerView {
        let (label, headline) = match (self.state, self.phase) {
            (LoopState::Idle, _) => ("LOOP READY", "LOOP READY"),
            (_, LoopPhase::Work) => ("WORK", "WORK!"),
            (_, LoopPhase::Rest) => ("REST", "RESET..."),
        };
        TimerView {
            phase_label: label.to_string(),
            phase_kind: self.phase.kind(),
            headline: headline.to_string(),
            remaining_secs: clamp_secs(self.remaining),
            remaining_formatted: format_remaining(self.remaining),
            is_running: self.is_running(),
            is_finished: false,
            progress_pct: 0.0,
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Takes effect at the next WORK boundary. Zero keeps the default.
    pub fn set_work_secs(&mut self, secs: u32) {
        self.config = LoopConfig::new(secs, self.config.rest_secs);
        if self.is_idle() {
            self.remaining = i64::from(self.config.work_secs);
        }
    }

    /// Takes effect at the next REST boundary. Zero keeps the default.
    pub fn set_rest_secs(&mut self, secs: u32) {
        self.config = LoopConfig::new(self.config.work_secs, secs);
    }

    /// Apply raw text input; unparsable values fall back to the defaults.
    pub fn set_work_text(&mut self, text: &str) {
        self.set_work_secs(parse_secs_or(text, DEFAULT_WORK_SECS));
    }

    pub fn set_rest_text(&mut self, text: &str) {
        self.set_rest_secs(parse_secs_or(text, DEFAULT_REST_SECS));
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh loop at WORK. Only acts while idle: a paused loop
    /// continues through [`LoopEngine::resume`] instead.
    pub fn start(&mut self) -> Option<Event> {
        if !self.is_idle() {
            return None;
        }
        self.phase = LoopPhase::Work;
        self.remaining = i64::from(self.config.work_secs);
        self.state = LoopState::Running;
        self.cues.play(Cue::Beep);
        tracing::info!(
            work_secs = self.config.work_secs,
            rest_secs = self.config.rest_secs,
            "loop started"
        );
        Some(Event::LoopStarted {
            work_secs: self.config.work_secs,
            rest_secs: self.config.rest_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.state = LoopState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: clamp_secs(self.remaining),
            at: Utc::now(),
        })
    }

    /// Continue a paused loop; an idle loop starts fresh.
    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            LoopState::Paused => {
                self.state = LoopState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: clamp_secs(self.remaining),
                    at: Utc::now(),
                })
            }
            LoopState::Idle => self.start(),
            LoopState::Running => None,
        }
    }

    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.remaining -= 1;
        if self.remaining < 0 {
            return self.flip(false);
        }
        None
    }

    /// Flip immediately without waiting for the countdown. Ignored while idle.
    pub fn skip(&mut self) -> Option<Event> {
        if self.is_idle() {
            return None;
        }
        self.flip(true)
    }

    pub fn stop(&mut self) -> Option<Event> {
        if self.is_idle() {
            return None;
        }
        self.state = LoopState::Idle;
        self.phase = LoopPhase::Work;
        self.remaining = i64::from(self.config.work_secs);
        tracing::info!("loop stopped");
        Some(Event::LoopStopped { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flip(&mut self, forced: bool) -> Option<Event> {
        let (next, cue) = match self.phase {
            LoopPhase::Work => (LoopPhase::Rest, Cue::Buzzer),
            LoopPhase::Rest => (LoopPhase::Work, Cue::Beep),
        };
        let secs = self.config.secs_for(next);
        self.phase = next;
        self.remaining = i64::from(secs);
        self.cues.play(cue);
        tracing::debug!(phase = ?next, secs, forced, "loop flipped");
        Some(Event::LoopFlipped {
            phase: next,
            duration_secs: secs,
            cue,
            forced,
            at: Utc::now(),
        })
    }
}

impl Countdown for LoopEngine {
    fn tick(&mut self) -> Option<Event> {
        LoopEngine::tick(self)
    }

    fn pause(&mut self) -> Option<Event> {
        LoopEngine::pause(self)
    }

    fn resume(&mut self) -> Option<Event> {
        LoopEngine::resume(self)
    }

    fn is_running(&self) -> bool {
        LoopEngine::is_running(self)
    }

    fn view(&self) -> TimerView {
        LoopEngine::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::RecordingCues;

    fn engine(work: u32, rest: u32) -> (LoopEngine, Arc<RecordingCues>) {
        let cues = Arc::new(RecordingCues::new());
        (LoopEngine::new(LoopConfig::new(work, rest), cues.clone()), cues)
    }

    #[test]
    fn start_enters_work() {
        let (mut e, cues) = engine(30, 2);
        assert!(matches!(e.start(), Some(Event::LoopStarted { work_secs: 30, rest_secs: 2, .. })));
        assert_eq!(e.phase(), LoopPhase::Work);
        assert_eq!(e.remaining_secs(), 30);
        assert_eq!(cues.played(), vec![Cue::Beep]);
    }

    #[test]
    fn cycles_work_rest_work() {
        let (mut e, cues) = engine(2, 1);
        e.start();
        for _ in 0..3 {
            e.tick();
        }
        assert_eq!(e.phase(), LoopPhase::Rest);
        assert_eq!(e.remaining_secs(), 1);
        for _ in 0..2 {
            e.tick();
        }
        assert_eq!(e.phase(), LoopPhase::Work);
        assert_eq!(e.remaining_secs(), 2);
        assert_eq!(cues.played(), vec![Cue::Beep, Cue::Buzzer, Cue::Beep]);
    }

    #[test]
    fn skip_flips_without_waiting() {
        let (mut e, cues) = engine(30, 5);
        e.start();
        e.tick();
        let ev = e.skip();
        assert!(matches!(ev, Some(Event::LoopFlipped { phase: LoopPhase::Rest, forced: true, .. })));
        assert_eq!(e.phase(), LoopPhase::Rest);
        assert_eq!(e.remaining_secs(), 5);
        assert_eq!(cues.count(Cue::Buzzer), 1);
    }

    #[test]
    fn skip_is_ignored_when_idle() {
        let (mut e, cues) = engine(30, 5);
        assert!(e.skip().is_none());
        assert_eq!(e.phase(), LoopPhase::Work);
        assert!(cues.played().is_empty());
    }

    #[test]
    fn edits_apply_at_next_boundary() {
        let (mut e, _cues) = engine(3, 2);
        e.start();
        e.tick();
        e.set_work_secs(10);
        e.set_rest_secs(7);
        assert_eq!(e.remaining_secs(), 2, "current phase untouched");
        for _ in 0..3 {
            e.tick();
        }
        assert_eq!(e.phase(), LoopPhase::Rest);
        assert_eq!(e.remaining_secs(), 7);
        e.skip();
        assert_eq!(e.remaining_secs(), 10);
    }

    #[test]
    fn pause_freezes_phase_and_remaining() {
        let (mut e, _cues) = engine(5, 5);
        e.start();
        e.tick();
        e.pause();
        for _ in 0..10 {
            assert!(e.tick().is_none());
        }
        assert_eq!(e.remaining_secs(), 4);
        e.resume();
        assert!(e.is_running());
        assert_eq!(e.remaining_secs(), 4);
        assert_eq!(e.phase(), LoopPhase::Work);
    }

    #[test]
    fn start_while_paused_keeps_position() {
        let (mut e, cues) = engine(5, 2);
        e.start();
        e.skip();
        e.tick();
        e.pause();
        assert!(e.start().is_none());
        assert_eq!(e.phase(), LoopPhase::Rest);
        assert_eq!(e.remaining_secs(), 1);
        assert!(!e.is_running());
        assert_eq!(cues.played(), vec![Cue::Beep, Cue::Buzzer]);
        assert!(matches!(e.resume(), Some(Event::TimerResumed { remaining_secs: 1, .. })));
    }

    #[test]
    fn stop_goes_idle_at_work() {
        let (mut e, _cues) = engine(8, 3);
        e.start();
        e.skip();
        assert!(matches!(e.stop(), Some(Event::LoopStopped { .. })));
        assert!(e.is_idle());
        assert!(!e.is_running());
        assert_eq!(e.phase(), LoopPhase::Work);
        assert_eq!(e.remaining_secs(), 8);
        assert!(e.stop().is_none());
    }

    #[test]
    fn text_input_falls_back_to_defaults() {
        assert_eq!(parse_secs_or("45", 30), 45);
        assert_eq!(parse_secs_or(" 12 ", 30), 12);
        assert_eq!(parse_secs_or("abc", 30), 30);
        assert_eq!(parse_secs_or("", 2), 2);
        assert_eq!(parse_secs_or("0", 2), 2);
        assert_eq!(parse_secs_or("-4", 2), 2);

        let cfg = LoopConfig::from_text("x", "9");
        assert_eq!(cfg.work_secs(), DEFAULT_WORK_SECS);
        assert_eq!(cfg.rest_secs(), 9);
    }

    #[test]
    fn idle_view_shows_configured_work() {
        let (mut e, _cues) = engine(30, 2);
        e.set_work_text("45");
        let v = e.view();
        assert_eq!(v.headline, "LOOP READY");
        assert_eq!(v.remaining_formatted, "00:45");
        assert!(!v.is_running);
    }
}
