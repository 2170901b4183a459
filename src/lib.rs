//! Spaced-repetition scheduling for vocabulary review.
//!
//! A learner grades each recall on a 0-5 scale; [`ReviewService`] feeds the
//! grade through the SM-2 [`engine`](features::srs::engine), persists the
//! learner's memory record together with the item's aggregate statistics,
//! and answers "what is due now" queries.
//!
//! ```no_run
//! use chrono::Utc;
//! use zwcd_srs::{DueItemsQuery, ReviewService, ReviewSubmission, SchedulerConfig, init_pool};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SchedulerConfig::from_env()?;
//! let pool = init_pool(&config)?;
//! let service = ReviewService::new(pool, &config);
//!
//! let now = Utc::now().naive_utc();
//! service.submit_review(&ReviewSubmission::new(1, 42, 4), now)?;
//! let due = service.due_items(&DueItemsQuery::new(1, 20), now)?;
//! # let _ = due;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod features;
pub mod schema;

pub use config::SchedulerConfig;
pub use data::models::{
    DueFilters, DueItem, DueItemsQuery, ItemAggregateStats, ItemKey, LearningStatus, NewWord,
    ReviewStatus, ReviewSubmission, Word,
};
pub use data::repositories::WordRepository;
pub use data::{DbPool, init_pool};
pub use features::srs::{MemoryState, Quality, ReviewError, ReviewService, Schedule, compute};
