use proptest::prelude::*;
use zwcd_srs::features::srs::engine::{MAX_INTERVAL, MIN_EASINESS, compute};
use zwcd_srs::{LearningStatus, MemoryState, Quality};

fn prior_state() -> impl Strategy<Value = MemoryState> {
    (1.3f64..4.0, 1i32..=MAX_INTERVAL, 0i32..30).prop_map(|(easiness, interval, repetition)| MemoryState {
        easiness,
        interval,
        repetition,
    })
}

proptest! {
    #[test]
    fn failure_resets_repetition(prior in prior_state(), quality in 0i32..3) {
        let next = compute(Quality::new(quality).unwrap(), prior);
        prop_assert_eq!(next.repetition, 0);
        prop_assert_eq!(next.interval, 1);
        prop_assert_eq!(next.status, LearningStatus::Learning);
        prop_assert_eq!(next.easiness, prior.easiness);
    }

    #[test]
    fn easiness_and_interval_stay_in_bounds(prior in prior_state(), quality in 0i32..=5) {
        let next = compute(Quality::new(quality).unwrap(), prior);
        prop_assert!(next.easiness >= MIN_EASINESS);
        prop_assert!(next.interval >= 1);
        prop_assert!(next.interval <= MAX_INTERVAL);
        prop_assert!(next.repetition >= 0);
    }

    #[test]
    fn success_walks_the_interval_ramp(prior in prior_state(), quality in 3i32..=5) {
        let next = compute(Quality::new(quality).unwrap(), prior);
        prop_assert_eq!(next.repetition, prior.repetition + 1);
        let expected = match prior.repetition {
            0 => 1,
            1 => 6,
            _ => ((prior.interval as f64 * next.easiness).round() as i32).min(MAX_INTERVAL),
        };
        prop_assert_eq!(next.interval, expected);
    }

    #[test]
    fn mastery_needs_strong_recall_and_long_interval(prior in prior_state(), quality in 0i32..=5) {
        let next = compute(Quality::new(quality).unwrap(), prior);
        prop_assert_eq!(
            next.status == LearningStatus::Mastered,
            quality >= 4 && next.interval > 21
        );
    }
}
