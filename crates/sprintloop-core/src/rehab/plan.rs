//! Weekly rehab plan.
//!
//! Each weekday maps to a fixed list of lines. Upper-case headings split the
//! day into sections; the rest are exercise lines, with working weights
//! taken from the profile and an optional timer hint parsed from the text.

use chrono::Weekday;
use serde::Serialize;

use super::exercises::{self, Exercise};
use crate::storage::Profile;
use crate::timer::{HoldMode, SIDE_PLANK_SECS};

const SECTION_MARKERS: [&str; 8] = [
    "WARMUP", "SUPERSET", "COOL", "COMBAT", "FINISHER", "CIRCUIT", "CARDIO", "MORNING",
];

const MORNING_ROUTINE: [&str; 6] = [
    "MORNING ROUTINE",
    "Push-Ups (30 reps)",
    "Side Plank (1 min)",
    "Static Plank (1 min)",
    "Swiss Ball Bridge (1 min)",
    "Clam Shells (2 sets x 15/side)",
];

/// Which timer a plan line can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "timer", rename_all = "snake_case")]
pub enum TimerHint {
    /// The 20-minute air-bike interval routine.
    AirBike,
    /// Two-sided plank hold.
    SidePlank,
    /// Plain countdown of this many seconds.
    Hold { secs: u32 },
}

impl TimerHint {
    /// Hold-timer settings, or `None` for the interval routine.
    pub fn hold(&self) -> Option<(u32, HoldMode)> {
        match *self {
            TimerHint::AirBike => None,
            TimerHint::SidePlank => Some((SIDE_PLANK_SECS, HoldMode::SidePlank)),
            TimerHint::Hold { secs } => Some((secs, HoldMode::Simple)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanLine {
    Section {
        title: String,
    },
    Item {
        text: String,
        exercise: Option<&'static Exercise>,
        timer: Option<TimerHint>,
    },
}

impl PlanLine {
    fn classify(text: String) -> Self {
        if is_section(&text) {
            return PlanLine::Section {
                title: text.to_uppercase(),
            };
        }
        PlanLine::Item {
            exercise: exercises::mentioned_in(&text),
            timer: parse_timer_hint(&text),
            text,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            PlanLine::Section { title } => title,
            PlanLine::Item { text, .. } => text,
        }
    }
}

pub fn is_section(line: &str) -> bool {
    SECTION_MARKERS.iter().any(|m| line.contains(m))
}

/// Timer launched by a plan line, if any.
///
/// Air-bike mentions win over everything else, then side planks, then a
/// parenthesised duration such as `(2 mins)` or `(45 sec)`.
pub fn parse_timer_hint(line: &str) -> Option<TimerHint> {
    if line.contains("Air Bike") || line.contains("Assault Bike") {
        return Some(TimerHint::AirBike);
    }
    if line.contains("Side Plank") {
        return Some(TimerHint::SidePlank);
    }
    let lower = line.to_lowercase();
    lower
        .split('(')
        .skip(1)
        .find_map(|chunk| parse_paren_duration(chunk.split(')').next()?))
        .map(|secs| TimerHint::Hold { secs })
}

/// `"2 mins"` → 120, `"45s"` → 45.
fn parse_paren_duration(inner: &str) -> Option<u32> {
    let digits_end = inner
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(inner.len());
    if digits_end == 0 {
        return None;
    }
    let value: u32 = inner[..digits_end].parse().ok()?;
    match inner[digits_end..].trim_start() {
        "m" | "min" | "mins" => value.checked_mul(60),
        "s" | "sec" => Some(value),
        _ => None,
    }
}

/// The plan for `day`, weights filled in from `profile`.
pub fn workout_for(day: Weekday, profile: &Profile) -> Vec<PlanLine> {
    let w = |name: &str| profile.weight_label(name);
    let lines: Vec<String> = match day {
        Weekday::Mon => with_morning(vec![
            "WARMUP".into(),
            "Cat-Cow (30 reps)".into(),
            "Glute Bridge (2x15)".into(),
            "SUPERSET A".into(),
            format!("Hack Squat (3x8) {}", w("Hack Squat")),
            "Box Jumps (3x5)".into(),
            "SUPERSET B".into(),
            format!("Trap Bar Farmers Walk (3x40yds) {}", w("Trap Bar Farmers Walk")),
            "Air Bike Protocol (See Timer)".into(),
            "FINISHER".into(),
            format!("Seated Leg Curl (3x15) {}", w("Seated Leg Curl")),
            "COOL DOWN".into(),
            "90/90 Hip Flow (2 mins)".into(),
        ]),
        Weekday::Wed => with_morning(vec![
            "WARMUP".into(),
            "Pallof Press (3x10/side)".into(),
            "SUPERSET A".into(),
            format!("Dumbbell Bench Press (3x10) {}", w("Dumbbell Bench Press")),
            format!("Cable Row (3x12) {}", w("Cable Row")),
            "SUPERSET B".into(),
            format!("Tricep Pushdowns (3x15) {}", w("Tricep Pushdowns")),
            format!("Cable Face Pulls (3x15) {}", w("Cable Face Pulls")),
            "CARDIO".into(),
            "Air Bike Protocol (See Timer)".into(),
        ]),
        Weekday::Fri => with_morning(vec![
            "WARMUP".into(),
            "Bird Dog (3x10/side)".into(),
            "Split Squat BW (2x5/side)".into(),
            "CIRCUIT".into(),
            format!("1. Unilateral Leg Press (10/side) {}", w("Unilateral Leg Press")),
            format!("2. Cable Woodchoppers (12/side) {}", w("Cable Woodchoppers")),
            format!("3. Leg Extension (15 reps) {}", w("Leg Extension")),
            "4. Plank (1 min)".into(),
            "COOL DOWN".into(),
            "Couch Stretch (3x30s/side)".into(),
        ]),
        Weekday::Tue | Weekday::Thu | Weekday::Sat => [
            "PRE-COMBAT",
            "Lower Body Warm-Up (1 Round)",
            "Adductor Rock Back (1 min)",
            "ACTIVITY",
            "BJJ / Kickboxing Class",
            "POST-COMBAT",
            "Relaxation Breathing (5 mins)",
            "Malasana Squat (2 mins)",
        ]
        .map(String::from)
        .to_vec(),
        Weekday::Sun => ["Active Recovery", "Walk 45 Mins", "Meal Prep"]
            .map(String::from)
            .to_vec(),
    };
    lines.into_iter().map(PlanLine::classify).collect()
}

fn with_morning(rest: Vec<String>) -> Vec<String> {
    MORNING_ROUTINE
        .iter()
        .map(|s| s.to_string())
        .chain(rest)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[PlanLine]) -> Vec<&str> {
        lines.iter().map(PlanLine::text).collect()
    }

    #[test]
    fn timer_hints() {
        assert_eq!(
            parse_timer_hint("Air Bike Protocol (See Timer)"),
            Some(TimerHint::AirBike)
        );
        assert_eq!(parse_timer_hint("Assault Bike"), Some(TimerHint::AirBike));
        assert_eq!(
            parse_timer_hint("Side Plank (1 min)"),
            Some(TimerHint::SidePlank)
        );
        assert_eq!(
            parse_timer_hint("90/90 Hip Flow (2 mins)"),
            Some(TimerHint::Hold { secs: 120 })
        );
        assert_eq!(
            parse_timer_hint("Wall Sit (45 SEC)"),
            Some(TimerHint::Hold { secs: 45 })
        );
        assert_eq!(
            parse_timer_hint("Hold (30s)"),
            Some(TimerHint::Hold { secs: 30 })
        );
        assert_eq!(parse_timer_hint("Push-Ups (30 reps)"), None);
        assert_eq!(parse_timer_hint("Couch Stretch (3x30s/side)"), None);
        assert_eq!(parse_timer_hint("Walk 45 Mins"), None);
    }

    #[test]
    fn hint_hold_settings() {
        assert_eq!(TimerHint::AirBike.hold(), None);
        assert_eq!(
            TimerHint::SidePlank.hold(),
            Some((60, HoldMode::SidePlank))
        );
        assert_eq!(
            TimerHint::Hold { secs: 90 }.hold(),
            Some((90, HoldMode::Simple))
        );
    }

    #[test]
    fn sections_detected_by_keyword() {
        assert!(is_section("SUPERSET A"));
        assert!(is_section("POST-COMBAT"));
        assert!(is_section("COOL DOWN"));
        assert!(!is_section("ACTIVITY"));
        assert!(!is_section("Hack Squat (3x8)"));
    }

    #[test]
    fn monday_interpolates_weights() {
        let plan = workout_for(Weekday::Mon, &Profile::default());
        let lines = texts(&plan);
        assert_eq!(lines[0], "MORNING ROUTINE");
        assert!(lines.contains(&"Hack Squat (3x8) @ 76 lbs"));
        assert!(lines.contains(&"Trap Bar Farmers Walk (3x40yds) @ 100 lbs"));
        assert_eq!(*lines.last().unwrap(), "90/90 Hip Flow (2 mins)");
    }

    #[test]
    fn monday_air_bike_line_carries_hint() {
        let plan = workout_for(Weekday::Mon, &Profile::default());
        let bike = plan
            .iter()
            .find(|l| l.text().starts_with("Air Bike"))
            .unwrap();
        match bike {
            PlanLine::Item { exercise, timer, .. } => {
                assert_eq!(exercise.map(|e| e.name), Some("Air Bike Protocol"));
                assert_eq!(*timer, Some(TimerHint::AirBike));
            }
            PlanLine::Section { .. } => panic!("expected an item"),
        }
    }

    #[test]
    fn weights_follow_the_week() {
        let mut profile = Profile::default();
        profile.set_week(2).unwrap();
        let plan = workout_for(Weekday::Wed, &profile);
        assert!(texts(&plan).contains(&"Cable Row (3x12) @ 30 lbs"));
    }

    #[test]
    fn combat_days_share_a_plan() {
        let p = Profile::default();
        let tue = workout_for(Weekday::Tue, &p);
        assert_eq!(tue, workout_for(Weekday::Thu, &p));
        assert_eq!(tue, workout_for(Weekday::Sat, &p));
        assert_eq!(tue.len(), 8);
        assert!(matches!(tue[3], PlanLine::Item { .. }));
    }

    #[test]
    fn sunday_is_recovery() {
        let plan = workout_for(Weekday::Sun, &Profile::default());
        assert_eq!(texts(&plan), ["Active Recovery", "Walk 45 Mins", "Meal Prep"]);
        assert!(plan.iter().all(|l| matches!(l, PlanLine::Item { timer: None, .. })));
    }
}
