//! # Sprintloop Core Library
//!
//! Interval-training timers driven by an external one-second tick.
//! Everything runs through the `sprintloop` CLI binary; this crate holds the
//! state machines and leaves clocks, terminals and speakers to the caller.
//!
//! ## Architecture
//!
//! - **Routines**: fixed phase sequences (`7-4-2-1-1`, `20-minute`) ending in DONE
//! - **Engines**: [`IntervalEngine`] walks a routine, [`LoopEngine`] flips
//!   between work and rest forever, [`HoldTimer`] counts down one exercise
//! - **Cues**: engines announce transitions through an injected [`CueEmitter`]
//! - **Storage**: TOML configuration and the JSON rehab profile
//! - **Rehab**: exercise notes and the weekly plan
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: phase cursor with start/pause/next/prev/reset
//! - [`Countdown`]: what a tick driver needs from any engine
//! - [`Event`]: serializable record of every state change
//! - [`Config`]: application configuration management

pub mod cue;
pub mod error;
pub mod events;
pub mod rehab;
pub mod storage;
pub mod timer;

pub use cue::{Cue, CueEmitter, RecordingCues, SilentCues, TerminalBell};
pub use error::{ConfigError, CoreError, ProfileError, Result, RoutineError, ValidationError};
pub use events::Event;
pub use rehab::{workout_for, PlanLine, TimerHint};
pub use storage::{Config, Profile};
pub use timer::{
    Countdown, HoldMode, HoldTimer, IntervalEngine, LoopConfig, LoopEngine, LoopPhase, Phase,
    PhaseKind, Routine, RoutineId, TimerView,
};
