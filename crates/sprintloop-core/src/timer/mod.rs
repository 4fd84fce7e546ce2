mod engine;
mod hold;
mod looping;
mod routine;
mod view;

pub use engine::{Cursor, IntervalEngine};
pub use hold::{HoldMode, HoldStage, HoldTimer, SIDE_PLANK_BREAK_SECS, SIDE_PLANK_SECS};
pub use looping::{
    parse_secs_or, LoopConfig, LoopEngine, LoopPhase, DEFAULT_REST_SECS, DEFAULT_WORK_SECS,
};
pub use routine::{
    seven_four_two_one_one, structured_twenty_minute, Phase, PhaseKind, Routine, RoutineId,
};
pub use view::{format_remaining, TimerView};

use crate::events::Event;

/// Anything a one-second tick source can drive.
///
/// The driver calls `tick()` only while `is_running()` is true and drops its
/// tick subscription while paused.
pub trait Countdown {
    fn tick(&mut self) -> Option<Event>;
    fn pause(&mut self) -> Option<Event>;
    fn resume(&mut self) -> Option<Event>;
    fn is_running(&self) -> bool;
    fn view(&self) -> TimerView;

    fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.resume()
        }
    }
}
