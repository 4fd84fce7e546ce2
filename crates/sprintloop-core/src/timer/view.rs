use serde::{Deserialize, Serialize};

use super::routine::PhaseKind;

/// What a screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub phase_label: String,
    pub phase_kind: PhaseKind,
    pub headline: String,
    pub remaining_secs: u32,
    pub remaining_formatted: String,
    pub is_running: bool,
    pub is_finished: bool,
    /// 0.0 .. 100.0 across the whole workout; loops report 0.
    pub progress_pct: f64,
}

/// `MM:SS`, clamped at zero.
///
/// Minutes are not wrapped into hours: 3600 renders as `60:00`.
pub fn format_remaining(remaining_secs: i64) -> String {
    let secs = remaining_secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub(crate) fn clamp_secs(remaining: i64) -> u32 {
    u32::try_from(remaining.max(0)).unwrap_or(u32::MAX)
}
