//! Integration tests for the work/rest loop and the hold timer.

use std::sync::Arc;

use proptest::prelude::*;
use sprintloop_core::{
    Countdown, Cue, Event, HoldMode, HoldTimer, LoopConfig, LoopEngine, LoopPhase, RecordingCues,
};

fn looper(work: u32, rest: u32) -> (LoopEngine, Arc<RecordingCues>) {
    let cues = Arc::new(RecordingCues::new());
    (LoopEngine::new(LoopConfig::new(work, rest), cues.clone()), cues)
}

fn drive(timer: &mut dyn Countdown, n: usize) -> Vec<Event> {
    (0..n).filter_map(|_| timer.tick()).collect()
}

#[test]
fn default_loop_flips_to_rest_after_work() {
    let (mut l, cues) = looper(30, 2);
    l.start();
    assert_eq!(cues.played(), vec![Cue::Beep]);

    let events = drive(&mut l, 31);
    assert_eq!(events.len(), 1);
    assert_eq!(l.phase(), LoopPhase::Rest);
    assert_eq!(l.remaining_secs(), 2);
    assert_eq!(cues.count(Cue::Buzzer), 1);
}

#[test]
fn loop_cycles_indefinitely() {
    let (mut l, cues) = looper(3, 1);
    l.start();
    // One cycle is (3 + 1) + (1 + 1) ticks.
    let events = drive(&mut l, 6 * 10);
    assert_eq!(events.len(), 20);
    assert_eq!(l.phase(), LoopPhase::Work);
    assert_eq!(cues.count(Cue::Buzzer), 10);
    assert_eq!(cues.count(Cue::Beep), 11);
    assert!(l.is_running());
}

#[test]
fn edited_durations_apply_at_next_boundary() {
    let (mut l, _) = looper(30, 2);
    l.start();
    drive(&mut l, 5);
    l.set_work_text("45");
    l.set_rest_text("abc");
    assert_eq!(l.remaining_secs(), 25);

    drive(&mut l, 26);
    assert_eq!(l.phase(), LoopPhase::Rest);
    assert_eq!(l.remaining_secs(), 2);
    drive(&mut l, 3);
    assert_eq!(l.phase(), LoopPhase::Work);
    assert_eq!(l.remaining_secs(), 45);
}

#[test]
fn skip_is_forced_flip() {
    let (mut l, cues) = looper(30, 2);
    assert_eq!(l.skip(), None);
    l.start();
    match l.skip() {
        Some(Event::LoopFlipped { phase, forced, cue, .. }) => {
            assert_eq!(phase, LoopPhase::Rest);
            assert!(forced);
            assert_eq!(cue, Cue::Buzzer);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(cues.played(), vec![Cue::Beep, Cue::Buzzer]);
}

#[test]
fn stop_returns_to_idle_work() {
    let (mut l, _) = looper(20, 5);
    l.start();
    drive(&mut l, 22);
    l.stop();
    assert!(l.is_idle());
    assert_eq!(l.phase(), LoopPhase::Work);
    assert_eq!(l.remaining_secs(), 20);
    assert_eq!(l.view().phase_label, "LOOP READY");
}

#[test]
fn side_plank_runs_both_sides() {
    let cues = Arc::new(RecordingCues::new());
    let mut h = HoldTimer::new(60, HoldMode::SidePlank, cues.clone());
    h.toggle();

    let events = drive(&mut h, 60 + 10 + 60);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[2], Event::HoldFinished { .. }));
    assert!(h.is_finished());
    assert!(!h.is_running());
    assert_eq!(cues.played(), vec![Cue::Buzzer, Cue::Beep, Cue::Beep]);
}

#[test]
fn simple_hold_ends_at_zero() {
    let cues = Arc::new(RecordingCues::new());
    let mut h = HoldTimer::new(120, HoldMode::Simple, cues.clone());
    h.start();
    assert!(drive(&mut h, 119).is_empty());
    assert_eq!(h.view().remaining_formatted, "00:01");
    assert_eq!(drive(&mut h, 1).len(), 1);
    assert_eq!(h.view().phase_label, "DONE");
    assert_eq!(cues.played(), vec![Cue::Beep]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn loop_pause_resume_preserves_countdown(work in 1u32..120, rest in 1u32..30, steps in 0usize..500) {
        let (mut l, _) = looper(work, rest);
        l.start();
        drive(&mut l, steps);
        let (phase, remaining) = (l.phase(), l.remaining_secs());

        l.pause();
        prop_assert!(drive(&mut l, 50).is_empty());
        l.resume();

        prop_assert_eq!(l.phase(), phase);
        prop_assert_eq!(l.remaining_secs(), remaining);
    }

    #[test]
    fn loop_remaining_stays_within_phase(work in 1u32..60, rest in 1u32..10, steps in 0usize..400) {
        let (mut l, _) = looper(work, rest);
        l.start();
        for _ in 0..steps {
            l.tick();
            let limit = match l.phase() {
                LoopPhase::Work => work,
                LoopPhase::Rest => rest,
            };
            prop_assert!((0..=i64::from(limit)).contains(&l.remaining_secs()));
        }
    }
}

#[test]
fn side_plank_events_report_the_cues_played() {
    let cues = Arc::new(RecordingCues::new());
    let mut t = HoldTimer::new(2, HoldMode::SidePlank, cues.clone());
    let mut events: Vec<Event> = t.start().into_iter().collect();
    events.extend(drive(&mut t, 20));
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].cue(), None);
    let reported: Vec<Cue> = events.iter().filter_map(Event::cue).collect();
    assert_eq!(reported, cues.played());
}

#[test]
fn loop_events_report_the_cues_played() {
    let (mut l, cues) = looper(2, 1);
    let mut events: Vec<Event> = l.start().into_iter().collect();
    events.extend(drive(&mut l, 12));
    let reported: Vec<Cue> = events.iter().filter_map(Event::cue).collect();
    assert_eq!(reported, cues.played());
}
