//! Rehab tracker: exercise notes and the weekly plan.

pub mod exercises;
mod plan;

pub use exercises::{Exercise, EXERCISES};
pub use plan::{is_section, parse_timer_hint, workout_for, PlanLine, TimerHint};
