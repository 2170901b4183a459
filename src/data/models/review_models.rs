use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::data::models::{ReviewStatus, Word};

/// A single graded recall, as submitted by the caller
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewSubmission {
    #[validate(range(min = 1, message = "Learner id must be positive"))]
    pub learner_id: i32,
    #[validate(range(min = 1, message = "Item id must be positive"))]
    pub item_id: i32,
    #[validate(range(min = 0, max = 5, message = "Quality must be between 0 and 5"))]
    pub quality: i32,
    #[validate(range(min = 0, message = "Time spent cannot be negative"))]
    #[serde(default)]
    pub time_spent_ms: Option<i64>,
}

impl ReviewSubmission {
    pub fn new(learner_id: i32, item_id: i32, quality: i32) -> Self {
        Self {
            learner_id,
            item_id,
            quality,
            time_spent_ms: None,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            learner_id: self.learner_id,
            item_id: self.item_id,
        }
    }

    pub fn with_time_spent(mut self, time_spent_ms: i64) -> Self {
        self.time_spent_ms = Some(time_spent_ms);
        self
    }
}

/// Identifies one learner's record for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Validate)]
pub struct ItemKey {
    #[validate(range(min = 1, message = "Learner id must be positive"))]
    pub learner_id: i32,
    #[validate(range(min = 1, message = "Item id must be positive"))]
    pub item_id: i32,
}

/// Catalog-side restrictions applied to a due-items query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueFilters {
    pub language: Option<String>,
    pub difficulty: Option<i32>,
    pub max_difficulty: Option<i32>,
    pub deck_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DueItemsQuery {
    #[validate(range(min = 1, message = "Learner id must be positive"))]
    pub learner_id: i32,
    #[validate(range(min = 0, message = "Limit cannot be negative"))]
    pub limit: i64,
    #[serde(default)]
    pub filters: DueFilters,
}

impl DueItemsQuery {
    pub fn new(learner_id: i32, limit: i64) -> Self {
        Self {
            learner_id,
            limit,
            filters: DueFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: DueFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// An item ready for presentation together with its memory record
#[derive(Debug, Clone, Serialize)]
pub struct DueItem {
    pub word: Word,
    pub status: ReviewStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_outside_scale_is_rejected() {
        assert!(ReviewSubmission::new(1, 1, 0).validate().is_ok());
        assert!(ReviewSubmission::new(1, 1, 5).validate().is_ok());
        assert!(ReviewSubmission::new(1, 1, 6).validate().is_err());
        assert!(ReviewSubmission::new(1, 1, -1).validate().is_err());
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        assert!(ReviewSubmission::new(0, 1, 3).validate().is_err());
        assert!(ReviewSubmission::new(1, -4, 3).validate().is_err());
        assert!(DueItemsQuery::new(0, 10).validate().is_err());
    }

    #[test]
    fn negative_time_spent_is_rejected() {
        let submission = ReviewSubmission::new(1, 1, 4).with_time_spent(-10);
        assert!(submission.validate().is_err());
        let submission = ReviewSubmission::new(1, 1, 4).with_time_spent(1_500);
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(DueItemsQuery::new(3, -1).validate().is_err());
        assert!(DueItemsQuery::new(3, 0).validate().is_ok());
    }
}
