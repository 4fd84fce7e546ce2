//! Single countdown for timed exercises ("Plank (1 min)").
//!
//! Side planks run as side 1, a 10 second break, then side 2. Unlike the
//! interval engines, a hold stage ends when the countdown reaches zero.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::routine::PhaseKind;
use super::view::{clamp_secs, format_remaining, TimerView};
use super::Countdown;
use crate::cue::{Cue, CueEmitter};
use crate::events::Event;

pub const SIDE_PLANK_SECS: u32 = 60;
pub const SIDE_PLANK_BREAK_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoldMode {
    Simple,
    SidePlank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoldStage {
    Hold,
    SideOne,
    Break,
    SideTwo,
    Done,
}

impl HoldStage {
    pub fn label(&self) -> &'static str {
        match self {
            HoldStage::Hold => "TIMER",
            HoldStage::SideOne => "SIDE 1 (L)",
            HoldStage::Break => "BREAK",
            HoldStage::SideTwo => "SIDE 2 (R)",
            HoldStage::Done => "DONE",
        }
    }

    fn kind(&self) -> PhaseKind {
        match self {
            HoldStage::Hold | HoldStage::SideOne | HoldStage::SideTwo => PhaseKind::Work,
            HoldStage::Break => PhaseKind::Rest,
            HoldStage::Done => PhaseKind::Done,
        }
    }
}

pub struct HoldTimer {
    total: u32,
    mode: HoldMode,
    stage: HoldStage,
    remaining: i64,
    running: bool,
    /// Set by `set_time`: the next start announces the opening stage.
    armed: bool,
    cues: Arc<dyn CueEmitter>,
}

impl fmt::Debug for HoldTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoldTimer")
            .field("total", &self.total)
            .field("mode", &self.mode)
            .field("stage", &self.stage)
            .field("remaining", &self.remaining)
            .field("running", &self.running)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

impl HoldTimer {
    pub fn new(secs: u32, mode: HoldMode, cues: Arc<dyn CueEmitter>) -> Self {
        let mut timer = Self {
            total: secs,
            mode,
            stage: HoldStage::Hold,
            remaining: 0,
            running: false,
            armed: true,
            cues,
        };
        timer.set_time(secs, mode);
        timer
    }

    /// Rearm with a new length and mode; stops a running countdown.
    pub fn set_time(&mut self, secs: u32, mode: HoldMode) {
        self.total = secs;
        self.mode = mode;
        self.remaining = i64::from(secs);
        self.running = false;
        self.armed = true;
        self.stage = match mode {
            HoldMode::Simple => HoldStage::Hold,
            HoldMode::SidePlank => HoldStage::SideOne,
        };
    }

    pub fn stage(&self) -> HoldStage {
        self.stage
    }

    pub fn mode(&self) -> HoldMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.stage == HoldStage::Done
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            phase_label: self.stage.label().to_string(),
            phase_kind: self.stage.kind(),
            headline: self.stage.label().to_string(),
            remaining_secs: clamp_secs(self.remaining),
            remaining_formatted: format_remaining(self.remaining),
            is_running: self.running,
            is_finished: self.is_finished(),
            progress_pct: 0.0,
        }
    }

    /// Start or continue. A finished timer rearms with the same length first.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        if self.is_finished() {
            self.set_time(self.total, self.mode);
        }
        self.running = true;
        if self.armed {
            self.armed = false;
            tracing::debug!(stage = self.stage.label(), secs = self.total, "hold started");
            return Some(Event::HoldStageStarted {
                stage: self.stage,
                duration_secs: self.total,
                cue: None,
                at: Utc::now(),
            });
        }
        Some(Event::TimerResumed {
            remaining_secs: clamp_secs(self.remaining),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: clamp_secs(self.remaining),
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining -= 1;
        if self.remaining > 0 {
            return None;
        }
        match (self.mode, self.stage) {
            (HoldMode::SidePlank, HoldStage::SideOne) => {
                self.enter(HoldStage::Break, SIDE_PLANK_BREAK_SECS, Cue::Buzzer)
            }
            (HoldMode::SidePlank, HoldStage::Break) => {
                self.enter(HoldStage::SideTwo, self.total, Cue::Beep)
            }
            _ => {
                self.running = false;
                self.stage = HoldStage::Done;
                self.remaining = 0;
                self.cues.play(Cue::Beep);
                tracing::info!(secs = self.total, "hold finished");
                Some(Event::HoldFinished { at: Utc::now() })
            }
        }
    }

    fn enter(&mut self, stage: HoldStage, secs: u32, cue: Cue) -> Option<Event> {
        self.stage = stage;
        self.remaining = i64::from(secs);
        self.cues.play(cue);
        tracing::debug!(stage = stage.label(), secs, "hold stage started");
        Some(Event::HoldStageStarted {
            stage,
            duration_secs: secs,
            cue: Some(cue),
            at: Utc::now(),
        })
    }
}

impl Countdown for HoldTimer {
    fn tick(&mut self) -> Option<Event> {
        HoldTimer::tick(self)
    }

    fn pause(&mut self) -> Option<Event> {
        HoldTimer::pause(self)
    }

    fn resume(&mut self) -> Option<Event> {
        HoldTimer::start(self)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn view(&self) -> TimerView {
        HoldTimer::view(self)
    }
}
