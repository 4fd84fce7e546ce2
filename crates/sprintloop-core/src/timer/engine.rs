//! Interval engine.
//!
//! A tick-driven state machine over a [`Routine`]. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per second
//! while [`IntervalEngine::is_running`] is true.
//!
//! ## State Transitions
//!
//! ```text
//! Armed -> Running <-> Paused
//!            |
//!            +-> (DONE) Finished -> Armed
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalEngine::new(RoutineId::SevenFourTwoOneOne.build(), cues);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when a phase boundary is crossed
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::routine::{Phase, PhaseKind, Routine};
use super::view::{clamp_secs, format_remaining, TimerView};
use super::Countdown;
use crate::cue::{Cue, CueEmitter};
use crate::events::Event;

/// Position inside the routine plus countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub index: usize,
    /// Seconds left in the current phase; `-1` only transiently, inside `tick()`.
    pub remaining: i64,
    pub is_running: bool,
}

/// Core interval engine.
pub struct IntervalEngine {
    routine: Routine,
    index: usize,
    remaining: i64,
    running: bool,
    /// Set on load, reset and finish: the next `start()` beeps and loads phase 0.
    armed: bool,
    finished: bool,
    cues: Arc<dyn CueEmitter>,
}

impl fmt::Debug for IntervalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalEngine")
            .field("phases", &self.routine.len())
            .field("index", &self.index)
            .field("remaining", &self.remaining)
            .field("running", &self.running)
            .field("armed", &self.armed)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl IntervalEngine {
    /// Create an engine with `routine` loaded and the cursor at rest.
    pub fn new(routine: Routine, cues: Arc<dyn CueEmitter>) -> Self {
        Self {
            routine,
            index: 0,
            remaining: 0,
            running: false,
            armed: true,
            finished: false,
            cues,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            index: self.index,
            remaining: self.remaining,
            is_running: self.running,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.routine.get(self.index)
    }

    /// Phase shown on screen: the final phase once the workout has finished,
    /// the cursor's phase otherwise.
    pub fn displayed_phase(&self) -> Option<&Phase> {
        if self.finished {
            self.routine.phases().last()
        } else {
            self.current_phase()
        }
    }

    /// 0.0 .. 100.0 progress across the entire routine.
    pub fn progress_pct(&self) -> f64 {
        if self.finished {
            return 100.0;
        }
        let total = self.routine.total_secs() as f64;
        if total == 0.0 || self.armed {
            return 0.0;
        }
        let before: u64 = self
            .routine
            .phases()
            .iter()
            .take(self.index)
            .map(|p| u64::from(p.duration_secs))
            .sum();
        let current = self
            .current_phase()
            .map(|p| i64::from(p.duration_secs) - self.remaining.max(0))
            .unwrap_or(0)
            .max(0);
        ((before as f64 + current as f64) / total * 100.0).min(100.0)
    }

    pub fn view(&self) -> TimerView {
        let phase = self.displayed_phase();
        let remaining = if self.finished { 0 } else { self.remaining };
        TimerView {
            phase_label: phase.map(|p| p.label.clone()).unwrap_or_default(),
            phase_kind: phase.map(|p| p.kind).unwrap_or(PhaseKind::Ready),
            headline: phase.map(|p| p.headline()).unwrap_or_default(),
            remaining_secs: clamp_secs(remaining),
            remaining_formatted: format_remaining(remaining),
            is_running: self.running,
            is_finished: self.finished,
            progress_pct: self.progress_pct(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Install a new routine and rearm the cursor.
    pub fn load(&mut self, routine: Routine) {
        self.routine = routine;
        self.reset();
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.finished = false;

        if self.armed {
            self.armed = false;
            self.cues.play(Cue::Beep);
            self.load_phase(0);
            let phase = self.current_phase()?;
            tracing::info!(phases = self.routine.len(), label = %phase.label, "workout started");
            return Some(Event::WorkoutStarted {
                phases: self.routine.len(),
                kind: phase.kind,
                label: phase.label.clone(),
                duration_secs: phase.duration_secs,
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

    /// Continue after `pause()`. Same as `start()`: a paused cursor is never
    /// armed, so no opening beep and no reload.
    pub fn resume(&mut self) -> Option<Event> {
        self.start()
    }

    /// Call once per second. Returns an event when a phase boundary is crossed.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining -= 1;
        if self.remaining >= 0 {
            return None;
        }
        if self.index < self.routine.last_index() {
            self.next()
        } else {
            // Final phase is not DONE and just ran out.
            self.cues.play(Cue::Buzzer);
            self.remaining = 0;
            self.finish()
        }
    }

    pub fn next(&mut self) -> Option<Event> {
        if self.index >= self.routine.last_index() {
            return None;
        }
        self.index += 1;
        self.armed = false;
        self.finished = false;
        self.load_phase(self.index);

        let kind = self.current_phase()?.kind;
        if kind == PhaseKind::Done {
            self.cues.play(Cue::Buzzer);
            return self.finish();
        }
        self.cues.play(Cue::Beep);
        self.phase_started(Cue::Beep)
    }

    pub fn prev(&mut self) -> Option<Event> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.armed = false;
        self.finished = false;
        self.load_phase(self.index);
        self.cues.play(Cue::Beep);
        self.phase_started(Cue::Beep)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.index = 0;
        self.remaining = 0;
        self.armed = true;
        self.finished = false;
        Some(Event::TimerReset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load_phase(&mut self, index: usize) {
        self.remaining = self
            .routine
            .get(index)
            .map(|p| i64::from(p.duration_secs))
            .unwrap_or(0);
    }

    fn phase_started(&self, cue: Cue) -> Option<Event> {
        let phase = self.current_phase()?;
        tracing::debug!(index = self.index, kind = %phase.kind, label = %phase.label, "phase started");
        Some(Event::PhaseStarted {
            index: self.index,
            kind: phase.kind,
            label: phase.label.clone(),
            duration_secs: phase.duration_secs,
            cue,
            at: Utc::now(),
        })
    }

    /// Stop ticking and rearm the cursor; the routine itself is kept.
    fn finish(&mut self) -> Option<Event> {
        let label = self.current_phase().map(|p| p.label.clone()).unwrap_or_default();
        self.running = false;
        self.finished = true;
        self.armed = true;
        self.index = 0;
        tracing::info!(label = %label, "workout finished");
        Some(Event::WorkoutFinished {
            label,
            at: Utc::now(),
        })
    }
}

impl Countdown for IntervalEngine {
    fn tick(&mut self) -> Option<Event> {
        IntervalEngine::tick(self)
    }

    fn pause(&mut self) -> Option<Event> {
        IntervalEngine::pause(self)
    }

    fn resume(&mut self) -> Option<Event> {
        IntervalEngine::resume(self)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn view(&self) -> TimerView {
        IntervalEngine::view(self)
    }
}
