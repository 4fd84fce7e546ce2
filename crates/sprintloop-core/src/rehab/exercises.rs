use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub description: &'static str,
    pub cue: &'static str,
}

const fn ex(name: &'static str, description: &'static str, cue: &'static str) -> Exercise {
    Exercise {
        name,
        description,
        cue,
    }
}

/// Technique notes, in lookup order.
pub static EXERCISES: &[Exercise] = &[
    ex("Bird Dog", "Hands/knees. Brace core. Extend opposite limbs.", "Punch heel back. Keep spine stiff."),
    ex("Side Plank", "Lie on side. Lift hips. Hold.", "Focus on breathing. Complete both sides."),
    ex("Pallof Press", "Kneel on one knee. Press band forward.", "Don't let the band pull you sideways."),
    ex("Glute Bridge", "Back on floor. Lift hips.", "Squeeze glutes BEFORE lifting."),
    ex("Cat-Cow", "Arch/Round spine slowly.", "Move one vertebrae at a time."),
    ex("90/90 Hip Flow", "Sit with legs 90-deg. Lean forward/back.", "Focus on tight hip restrictions."),
    ex("Adductor Rock Back", "One leg out to side. Rock back.", "Deep stretch in groin/inner thigh."),
    ex("Couch Stretch", "Knee near wall. Squeeze glute.", "Don't arch back. 30s each side."),
    ex("Malasana Squat", "Deep squat. Breathe.", "Visualize pelvic floor dropping/relaxing."),
    ex(
        "Relaxation Breathing",
        "1. Lie on back. Hand on belly.\n2. Inhale DEEP expanding BELLY.\n3. Visualize floor bulging down.\n4. Exhale passively.",
        "Down-regulates pelvic tone.",
    ),
    ex("Hack Squat", "Feet shoulder width. Lower.", "Limit depth if hip clicks."),
    ex("Box Jumps", "Explosive jump. STEP DOWN.", "Land soft. Protect pelvic floor."),
    ex("Trap Bar Farmers Walk", "Lift bar. Walk short steps.", "Stay vertical. Targets QL."),
    ex("Dumbbell Bench Press", "Press DBs up.", "45-degree arm angle."),
    ex("Cable Row", "Seated row. Pull to stomach.", "Squeeze shoulder blades."),
    ex("Tricep Pushdowns", "Push rope down.", "Lockout elbows."),
    ex("Cable Face Pulls", "Pull rope to forehead.", "Thumbs back."),
    ex("Unilateral Leg Press", "One leg. Lower slowly.", "Fix Right Hip imbalance."),
    ex("Leg Extension", "Extend legs fully.", "Control the top."),
    ex("Seated Leg Curl", "Curl heels to butt.", "Squeeze hamstrings."),
    ex("Cable Woodchoppers", "High to low. Rotate torso.", "Rotate from ribs."),
    ex("Split Squat", "Lunge stance. Drop knee.", "Use plate under heel if hip clicks."),
    ex("Lower Body Warm-Up", "10 Squats + 5 Lunges.", "Open hips before walking on mats."),
    ex("Air Bike Protocol", "20-minute interval routine.", "Use the integrated timer."),
    ex("Static Plank", "Hold body straight.", "Squeeze glutes."),
    ex("Push-Ups", "Standard push-up. Chest to floor.", "Keep core tight."),
    ex("Swiss Ball Bridge", "Heels on ball. Lift hips. Hold.", "Static hold."),
    ex("Clam Shells", "Lie on side, knees bent. Lift top knee.", "Squeeze glute medius. 15 per side."),
];

/// Case-insensitive lookup by exact name.
pub fn find(name: &str) -> Option<&'static Exercise> {
    let name = name.trim();
    EXERCISES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// First exercise whose name appears in a plan line.
pub fn mentioned_in(line: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| line.contains(e.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_ignoring_case() {
        assert_eq!(find("hack squat").map(|e| e.name), Some("Hack Squat"));
        assert!(find("Deadlift").is_none());
    }

    #[test]
    fn matches_plan_lines() {
        assert_eq!(
            mentioned_in("Hack Squat (3x8) @ 76 lbs").map(|e| e.name),
            Some("Hack Squat")
        );
        assert_eq!(
            mentioned_in("Split Squat BW (2x5/side)").map(|e| e.name),
            Some("Split Squat")
        );
        assert!(mentioned_in("4. Plank (1 min)").is_none());
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = EXERCISES.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EXERCISES.len());
    }
}
