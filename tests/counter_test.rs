//! Scenario and property tests for the repetition counters


use fitness_counter::config::CounterConfig;
use fitness_counter::counters::{
    ExerciseCounter, LateralRaiseCounter, LateralRaisePhase, RepEvent, SingleSquatCounter, SquatPhase,
};
use fitness_counter::landmarks::{Landmark, LandmarkId};
use proptest::prelude::*;
use std::time::Duration;
use test_helpers::{arm_sequence, arms_frame, instant_config, legs_frame, FRAME_MS};

fn completions(events: &[RepEvent]) -> Vec<(u32, Duration, f64)> {
    events
        .iter()
        .filter_map(|event| match event {
            RepEvent::RepCompleted {
                total_reps,
                rep_duration,
                peak_angle,
            } => Some((*total_reps, *rep_duration, *peak_angle)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_lateral_raise_single_rep_with_defaults() {
    let mut counter = LateralRaiseCounter::new(CounterConfig::lateral_raise()).unwrap();
    let frames = arm_sequence(&[(10.0, 30), (45.0, 15), (85.0, 30), (50.0, 15), (10.0, 30)]);

    let events: Vec<RepEvent> = frames.iter().filter_map(|f| counter.process_pose(f)).collect();
    assert_eq!(events.first(), Some(&RepEvent::ExerciseStarted));

    let reps = completions(&events);
    assert_eq!(reps.len(), 1, "{events:?}");
    let (total, duration, peak) = reps[0];
    assert_eq!(total, 1);
    assert!((peak - 85.0).abs() < 0.5, "peak {peak}");
    assert!(duration >= Duration::from_millis(800) && duration <= Duration::from_millis(8000));

    assert_eq!(counter.state().rep_count, 1);
    assert_eq!(counter.state().phase, LateralRaisePhase::Down);
}

#[test]
fn test_phase_sequence_of_one_rep() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    let names: Vec<&str> = [(10.0, 0), (45.0, 400), (85.0, 800), (50.0, 1200)]
        .into_iter()
        .filter_map(|(angle, t)| match counter.process_pose(&arms_frame(angle, t)) {
            Some(RepEvent::PhaseChanged { phase_name, .. }) => Some(phase_name),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["rising", "up", "falling"]);
}

#[test]
fn test_too_fast_rep_is_not_counted() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    let mut events = Vec::new();
    for (angle, t) in [(10.0, 0), (45.0, 100), (85.0, 200), (50.0, 300), (10.0, 400)] {
        events.extend(counter.process_pose(&arms_frame(angle, t)));
    }
    assert!(completions(&events).is_empty());
    assert_eq!(counter.state().rep_count, 0);
    assert_eq!(counter.state().phase, LateralRaisePhase::Down);

    // A properly paced rep right after still counts
    for (angle, t) in [(45.0, 600), (85.0, 1000), (50.0, 1400), (10.0, 1800)] {
        events.extend(counter.process_pose(&arms_frame(angle, t)));
    }
    assert_eq!(completions(&events).len(), 1);
}

#[test]
fn test_too_slow_rep_returns_to_waiting() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    let mut events = Vec::new();
    for (angle, t) in [(10.0, 0), (45.0, 100), (85.0, 5_000), (50.0, 9_000), (10.0, 9_500)] {
        events.extend(counter.process_pose(&arms_frame(angle, t)));
    }
    assert!(completions(&events).is_empty());
    assert_eq!(counter.state().phase, LateralRaisePhase::Waiting);

    // Settling again re-arms with a phase change; the exercise already started
    match counter.process_pose(&arms_frame(10.0, 9_600)) {
        Some(RepEvent::PhaseChanged { phase_name, .. }) => assert_eq!(phase_name, "down"),
        other => panic!("expected phase change, got {other:?}"),
    }
    assert_eq!(counter.state().phase, LateralRaisePhase::Down);
}

#[test]
fn test_aborted_rep_returns_to_ready_silently() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    counter.process_pose(&arms_frame(10.0, 0));
    assert!(counter.process_pose(&arms_frame(45.0, 500)).is_some());

    assert_eq!(counter.process_pose(&arms_frame(15.0, 1000)), None);
    assert_eq!(counter.state().phase, LateralRaisePhase::Down);
    assert_eq!(counter.state().rep_count, 0);

    // The next rep is timed from its own start, not the aborted one
    let mut events = Vec::new();
    for (angle, t) in [(45.0, 20_000), (85.0, 20_400), (50.0, 20_800), (10.0, 21_200)] {
        events.extend(counter.process_pose(&arms_frame(angle, t)));
    }
    let reps = completions(&events);
    assert_eq!(reps.len(), 1);
    assert_eq!(reps[0].1, Duration::from_millis(1200));
}

#[test]
fn test_hysteresis_suppresses_chatter() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    counter.process_pose(&arms_frame(10.0, 0));

    // Just above rest but inside the hysteresis band
    for i in 1..20u64 {
        let angle = if i % 2 == 0 { 18.0 } else { 24.0 };
        assert_eq!(counter.process_pose(&arms_frame(angle, i * FRAME_MS)), None);
    }
    assert_eq!(counter.state().phase, LateralRaisePhase::Down);

    counter.process_pose(&arms_frame(45.0, 1_000));
    counter.process_pose(&arms_frame(85.0, 1_400));
    assert_eq!(counter.state().phase, LateralRaisePhase::Up);

    // Just below the top threshold but inside the band
    for i in 0..20u64 {
        let angle = if i % 2 == 0 { 77.0 } else { 82.0 };
        assert_eq!(counter.process_pose(&arms_frame(angle, 1_500 + i * FRAME_MS)), None);
    }
    assert_eq!(counter.state().phase, LateralRaisePhase::Up);
}

#[test]
fn test_frames_without_landmarks_change_nothing() {
    let mut counter = LateralRaiseCounter::new(instant_config(CounterConfig::lateral_raise())).unwrap();
    counter.process_pose(&arms_frame(10.0, 0));
    let before = counter.state().clone();

    let mut frame = arms_frame(60.0, 100);
    frame.insert(LandmarkId::RightElbow, Landmark::new(0.1, 0.1, 0.0, 0.2));
    assert_eq!(counter.process_pose(&frame), None);
    assert_eq!(counter.state(), &before);
}

#[test]
fn test_single_squat_counts_one_rep() {
    let mut counter = SingleSquatCounter::new(CounterConfig::single_squat()).unwrap();
    let holds = [(175.0, 30), (140.0, 10), (95.0, 30), (140.0, 10), (175.0, 30)];
    let frames = holds
        .iter()
        .flat_map(|&(angle, count)| std::iter::repeat(angle).take(count))
        .zip(0u64..)
        .map(|(angle, i)| legs_frame(angle, 178.0, i * FRAME_MS));

    let events: Vec<RepEvent> = frames.filter_map(|f| counter.process_pose(&f)).collect();
    let reps = completions(&events);
    assert_eq!(reps.len(), 1, "{events:?}");
    assert!((reps[0].2 - 95.0).abs() < 0.5, "lowest knee angle {}", reps[0].2);
    assert_eq!(counter.state().phase, SquatPhase::Standing);
}

#[test]
fn test_non_finite_landmark_does_not_poison_smoothing() {
    let mut counter = LateralRaiseCounter::new(CounterConfig::lateral_raise()).unwrap();
    let mut broken = arms_frame(10.0, 0);
    broken.insert(LandmarkId::LeftElbow, Landmark::new(f64::NAN, 0.5, 0.0, 0.9));
    counter.process_pose(&broken);
    assert!(counter.state().smoothed_angle.is_finite());

    let frames = arm_sequence(&[(10.0, 30), (45.0, 15), (85.0, 30), (50.0, 15), (10.0, 30)]);
    for frame in &frames {
        let mut shifted = frame.clone();
        shifted.timestamp += Duration::from_millis(FRAME_MS);
        counter.process_pose(&shifted);
        assert!(counter.state().smoothed_angle.is_finite());
    }
    assert_eq!(counter.state().rep_count, 1);
}

fn squat_counter() -> SingleSquatCounter {
    SingleSquatCounter::new(instant_config(CounterConfig::single_squat())).unwrap()
}

fn feed_squat(counter: &mut SingleSquatCounter, samples: &[(f64, u64)]) -> Vec<RepEvent> {
    samples
        .iter()
        .filter_map(|&(knee, t)| counter.process_pose(&legs_frame(knee, 178.0, t)))
        .collect()
}

#[test]
fn test_squat_aborted_before_bottom() {
    let mut counter = squat_counter();
    let events = feed_squat(&mut counter, &[(175.0, 0), (150.0, 500)]);
    assert_eq!(events.len(), 2);
    assert_eq!(counter.state().phase, SquatPhase::Descending);

    // Straightening up again without reaching the bottom
    assert!(feed_squat(&mut counter, &[(172.0, 1_000)]).is_empty());
    assert_eq!(counter.state().phase, SquatPhase::Standing);
    assert_eq!(counter.state().rep_count, 0);
}

#[test]
fn test_squat_too_fast_is_not_counted() {
    let mut counter = squat_counter();
    let events = feed_squat(
        &mut counter,
        &[(175.0, 0), (150.0, 100), (95.0, 200), (168.0, 300), (175.0, 400)],
    );
    assert!(completions(&events).is_empty());
    assert_eq!(counter.state().phase, SquatPhase::Standing);
    assert_eq!(counter.state().rep_count, 0);
}

#[test]
fn test_squat_too_slow_waits_then_rearms() {
    let mut counter = squat_counter();
    let events = feed_squat(
        &mut counter,
        &[(175.0, 0), (150.0, 100), (95.0, 5_000), (168.0, 9_000), (175.0, 9_500)],
    );
    assert!(completions(&events).is_empty());
    assert_eq!(counter.state().phase, SquatPhase::Waiting);

    match feed_squat(&mut counter, &[(175.0, 9_600)]).as_slice() {
        [RepEvent::PhaseChanged { phase_name, .. }] => assert_eq!(*phase_name, "standing"),
        other => panic!("expected phase change, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_rep_count_is_monotonic(angles in prop::collection::vec(0.0f64..180.0, 1..300)) {
        let mut counter = LateralRaiseCounter::new(CounterConfig::lateral_raise()).unwrap();
        let mut previous = 0;
        for (i, angle) in (0u64..).zip(angles) {
            let event = counter.process_pose(&arms_frame(angle, i * FRAME_MS));
            let count = counter.state().rep_count;
            let completed = matches!(event, Some(RepEvent::RepCompleted { .. }));

            prop_assert!(count >= previous);
            prop_assert_eq!(count - previous, u32::from(completed));
            previous = count;
        }
    }

    #[test]
    fn prop_counted_reps_are_complete(angles in prop::collection::vec(0.0f64..180.0, 1..300)) {
        let config = CounterConfig::lateral_raise();
        let mut counter = LateralRaiseCounter::new(config).unwrap();
        for (i, angle) in (0u64..).zip(angles) {
            if let Some(RepEvent::RepCompleted { rep_duration, peak_angle, .. }) =
                counter.process_pose(&arms_frame(angle, i * FRAME_MS))
            {
                prop_assert!(peak_angle >= config.top_threshold);
                prop_assert!(rep_duration >= config.min_rep_duration());
                prop_assert!(rep_duration <= config.max_rep_duration());
            }
        }
    }

    #[test]
    fn prop_resting_never_counts(angles in prop::collection::vec(0.0f64..20.0, 1..200)) {
        let mut counter = LateralRaiseCounter::new(CounterConfig::lateral_raise()).unwrap();
        for (i, angle) in (0u64..).zip(angles) {
            counter.process_pose(&arms_frame(angle, i * FRAME_MS));
        }
        prop_assert_eq!(counter.state().rep_count, 0);
    }
}
