//! Phase sequences.
//!
//! A [`Routine`] is an ordered, immutable list of [`Phase`]s. Built-in
//! routines are pure functions of no input and are addressed by
//! [`RoutineId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoutineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseKind {
    Ready,
    Warmup,
    Work,
    Sprint,
    Rest,
    Done,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 6] = [
        PhaseKind::Ready,
        PhaseKind::Warmup,
        PhaseKind::Work,
        PhaseKind::Sprint,
        PhaseKind::Rest,
        PhaseKind::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Ready => "READY",
            PhaseKind::Warmup => "WARMUP",
            PhaseKind::Work => "WORK",
            PhaseKind::Sprint => "SPRINT",
            PhaseKind::Rest => "REST",
            PhaseKind::Done => "DONE",
        }
    }

    /// Large status line shown above the countdown.
    pub fn headline(&self, duration_secs: u32) -> String {
        match self {
            PhaseKind::Ready => "GET READY".to_string(),
            PhaseKind::Warmup => format!("WARM UP ({duration_secs}s)"),
            PhaseKind::Work => format!("CONTINUOUS WORK ({duration_secs}s)"),
            PhaseKind::Sprint => format!("SPRINT! ({duration_secs}s)"),
            PhaseKind::Rest => format!("REST / RECOVER ({duration_secs}s)"),
            PhaseKind::Done => "COMPLETE".to_string(),
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub duration_secs: u32,
    pub label: String,
}

impl Phase {
    pub fn new(kind: PhaseKind, duration_secs: u32, label: impl Into<String>) -> Self {
        Self {
            kind,
            duration_secs,
            label: label.into(),
        }
    }

    pub fn done(label: impl Into<String>) -> Self {
        Self::new(PhaseKind::Done, 0, label)
    }

    pub fn headline(&self) -> String {
        self.kind.headline(self.duration_secs)
    }
}

/// Ordered, non-empty, immutable phase list.
///
/// At most one `DONE` phase exists and, when present, it is the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routine {
    phases: Vec<Phase>,
}

impl Routine {
    /// Validate and wrap a phase list.
    pub fn new(phases: Vec<Phase>) -> Result<Self, RoutineError> {
        validate(&phases)?;
        Ok(Self { phases })
    }

    /// Wrap literal data whose shape is fixed at compile time.
    fn literal(phases: Vec<Phase>) -> Self {
        debug_assert!(validate(&phases).is_ok(), "built-in routine is malformed");
        Self { phases }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.phases.len().saturating_sub(1)
    }

    pub fn has_done(&self) -> bool {
        self.phases.last().is_some_and(|p| p.kind == PhaseKind::Done)
    }

    pub fn total_secs(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.duration_secs)).sum()
    }

    /// Seconds spent in phases of `kind`.
    pub fn secs_in(&self, kind: PhaseKind) -> u64 {
        self.phases
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| u64::from(p.duration_secs))
            .sum()
    }
}

fn validate(phases: &[Phase]) -> Result<(), RoutineError> {
    if phases.is_empty() {
        return Err(RoutineError::Empty);
    }
    let len = phases.len();
    for (index, phase) in phases.iter().enumerate() {
        if phase.kind != PhaseKind::Done {
            continue;
        }
        if index + 1 != len {
            return Err(RoutineError::DoneNotLast { index, len });
        }
        if phase.duration_secs != 0 {
            return Err(RoutineError::DoneWithDuration {
                duration: phase.duration_secs,
            });
        }
    }
    Ok(())
}

// ── Built-in routines ────────────────────────────────────────────────

/// Identifier of a built-in routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutineId {
    /// 7-4-2-1-1 sprint ladder.
    #[serde(rename = "7-4-2-1-1", alias = "ladder")]
    SevenFourTwoOneOne,
    /// 20-minute structured air-bike session.
    #[serde(rename = "20-minute", alias = "structured")]
    Structured20,
}

impl RoutineId {
    pub const ALL: [RoutineId; 2] = [RoutineId::SevenFourTwoOneOne, RoutineId::Structured20];

    pub fn slug(&self) -> &'static str {
        match self {
            RoutineId::SevenFourTwoOneOne => "7-4-2-1-1",
            RoutineId::Structured20 => "20-minute",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RoutineId::SevenFourTwoOneOne => "7-4-2-1-1 INTERVALS",
            RoutineId::Structured20 => "AIR BIKE WORKOUT (20 Minutes)",
        }
    }

    pub fn build(&self) -> Routine {
        match self {
            RoutineId::SevenFourTwoOneOne => seven_four_two_one_one(),
            RoutineId::Structured20 => structured_twenty_minute(),
        }
    }
}

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.slug())
    }
}

impl FromStr for RoutineId {
    type Err = RoutineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7-4-2-1-1" | "74211" | "ladder" => Ok(RoutineId::SevenFourTwoOneOne),
            "20-minute" | "20min" | "structured" | "airbike" => Ok(RoutineId::Structured20),
            other => Err(RoutineError::UnknownRoutine(other.to_string())),
        }
    }
}

/// READY, then 7/4/2/1 sprint-rest sets of growing length, a final sprint
/// and DONE.
pub fn seven_four_two_one_one() -> Routine {
    const SETS: [(u32, u32, u32); 4] = [(7, 10, 30), (4, 20, 60), (2, 30, 90), (1, 60, 180)];

    let mut r = vec![Phase::new(PhaseKind::Ready, 5, "GET READY")];
    for (set, &(reps, sprint, rest)) in SETS.iter().enumerate() {
        for rep in 1..=reps {
            let label = format!("SET {}: REP {rep} / {reps}", set + 1);
            r.push(Phase::new(PhaseKind::Sprint, sprint, label.clone()));
            r.push(Phase::new(PhaseKind::Rest, rest, label));
        }
    }
    r.push(Phase::new(PhaseKind::Sprint, 20, "SET 5: FINAL SPRINT"));
    r.push(Phase::done("COMPLETE"));
    Routine::literal(r)
}

/// Twenty minutes of warm-up ramp, threshold work, arms-only bursts,
/// sprint/cruise pairs, recovery, max intervals and a cooldown.
pub fn structured_twenty_minute() -> Routine {
    use PhaseKind::*;

    let mut r = vec![
        Phase::new(Ready, 5, "GET READY"),
        Phase::new(Warmup, 150, "WARM UP: BUILD (50-60%)"),
    ];
    for _ in 0..3 {
        r.push(Phase::new(Sprint, 5, "SPRINT: 80-90% EFFORT"));
        r.push(Phase::new(Warmup, 25, "WARM UP: 60% EFFORT"));
    }

    r.push(Phase::new(Work, 90, "PHASE 1: 70% THRESHOLD"));
    r.push(Phase::new(Sprint, 15, "PHASE 1: 90% SPRINT"));
    r.push(Phase::new(Work, 75, "PHASE 1: 70% THRESHOLD"));

    for _ in 0..2 {
        r.push(Phase::new(Sprint, 15, "ARMS ONLY: MAX EFFORT"));
        r.push(Phase::new(Work, 45, "HEAVY RESISTANCE GRIND"));
    }

    for i in 1..=4 {
        r.push(Phase::new(Sprint, 20, format!("PHASE 3: SPRINT {i}/4 (90%)")));
        r.push(Phase::new(Warmup, 10, format!("PHASE 3: CRUISE {i}/4 (50%)")));
    }

    r.push(Phase::new(Rest, 120, "RECOVERY: 40% (DON'T STOP)"));

    for i in 1..=4 {
        r.push(Phase::new(Sprint, 20, format!("INTERVAL {i}/4: 100% MAX EFFORT")));
        r.push(Phase::new(Rest, 40, format!("INTERVAL {i}/4: REST (0%)")));
    }

    r.push(Phase::new(Warmup, 180, "COOLDOWN: LIGHT FLUSH"));
    r.push(Phase::done("WORKOUT COMPLETE"));
    Routine::literal(r)
}
