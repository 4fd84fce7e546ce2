use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::timer::{HoldStage, LoopPhase, PhaseKind};

/// Every state change an engine makes produces an Event.
/// The CLI prints them in simulation mode and logs them otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// First start of a freshly loaded routine.
    WorkoutStarted {
        phases: usize,
        kind: PhaseKind,
        label: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The cursor moved onto a new phase (auto-advance, next or prev).
    PhaseStarted {
        index: usize,
        kind: PhaseKind,
        label: String,
        duration_secs: u32,
        cue: Cue,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// DONE reached (or the final phase ran out); the cursor is rearmed.
    WorkoutFinished {
        label: String,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    LoopStarted {
        work_secs: u32,
        rest_secs: u32,
        at: DateTime<Utc>,
    },
    LoopFlipped {
        phase: LoopPhase,
        duration_secs: u32,
        cue: Cue,
        /// True when the flip came from `skip()` rather than the countdown.
        forced: bool,
        at: DateTime<Utc>,
    },
    LoopStopped {
        at: DateTime<Utc>,
    },
    /// A hold stage began; no cue on the very first stage.
    HoldStageStarted {
        stage: HoldStage,
        duration_secs: u32,
        cue: Option<Cue>,
        at: DateTime<Utc>,
    },
    HoldFinished {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Cue fired alongside this event, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::WorkoutStarted { .. }
            | Event::LoopStarted { .. }
            | Event::HoldFinished { .. } => Some(Cue::Beep),
            Event::WorkoutFinished { .. } => Some(Cue::Buzzer),
            Event::PhaseStarted { cue, .. } | Event::LoopFlipped { cue, .. } => Some(*cue),
            Event::HoldStageStarted { cue, .. } => *cue,
            _ => None,
        }
    }
}
