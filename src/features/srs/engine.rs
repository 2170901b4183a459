//! SM-2 interval engine.
//!
//! Pure scheduling math: given a quality rating and the prior memory
//! state, produce the next easiness, interval, repetition count and
//! learning status. No I/O, no clock.

use std::fmt;

use crate::data::models::LearningStatus;

pub const DEFAULT_EASINESS: f64 = 2.5;
pub const MIN_EASINESS: f64 = 1.3;
pub const INITIAL_INTERVAL: i32 = 1;
pub const SECOND_INTERVAL: i32 = 6;
/// Longest interval ever scheduled, in days (100 years)
pub const MAX_INTERVAL: i32 = 36_500;
/// Intervals longer than this (in days) count as mastered on a strong recall
pub const MASTERY_INTERVAL: i32 = 21;
pub const PASSING_QUALITY: u8 = 3;
pub const MAX_QUALITY: u8 = 5;

/// Self-reported recall score on the 0-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i32) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_QUALITY)
            .map(Quality)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl TryFrom<i32> for Quality {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Quality::new(value).ok_or(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The part of a review record the engine reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryState {
    pub easiness: f64,
    pub interval: i32,
    pub repetition: i32,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            easiness: DEFAULT_EASINESS,
            interval: INITIAL_INTERVAL,
            repetition: 0,
        }
    }
}

/// Engine output, applied verbatim to the review record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub easiness: f64,
    pub interval: i32,
    pub repetition: i32,
    pub status: LearningStatus,
}

/// Computes the next schedule for one review.
///
/// A failed recall (quality below 3) restarts the ramp at one day and
/// leaves easiness untouched. A successful recall adjusts easiness with
/// the SM-2 formula, then walks the 1 / 6 / geometric interval ramp using
/// the adjusted easiness. Intervals are capped at [`MAX_INTERVAL`].
pub fn compute(quality: Quality, prior: MemoryState) -> Schedule {
    if !quality.is_success() {
        return Schedule {
            easiness: prior.easiness,
            interval: INITIAL_INTERVAL,
            repetition: 0,
            status: LearningStatus::Learning,
        };
    }

    let easiness = next_easiness(quality, prior.easiness);
    let repetition = prior.repetition + 1;
    let interval = match repetition {
        1 => INITIAL_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => (prior.interval as f64 * easiness)
            .round()
            .clamp(INITIAL_INTERVAL as f64, MAX_INTERVAL as f64) as i32,
    };

    let status = if quality.value() >= 4 && interval > MASTERY_INTERVAL {
        LearningStatus::Mastered
    } else if repetition >= 2 {
        LearningStatus::Review
    } else {
        LearningStatus::Learning
    };

    Schedule {
        easiness,
        interval,
        repetition,
        status,
    }
}

fn next_easiness(quality: Quality, easiness: f64) -> f64 {
    let miss = (MAX_QUALITY - quality.value()) as f64;
    (easiness + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASINESS)
}
