pub mod review_models;
pub mod srs_models;
pub mod stats_models;
pub mod word_models;

pub use review_models::{DueFilters, DueItem, DueItemsQuery, ItemKey, ReviewSubmission};
pub use srs_models::{LearningStatus, ReviewStatus};
pub use stats_models::ItemAggregateStats;
pub use word_models::{NewWord, Word};
