use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::item_stats;

/// Running review metrics for one item across all learners
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset,
)]
#[diesel(table_name = item_stats)]
#[diesel(primary_key(item_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemAggregateStats {
    pub item_id: i32,
    pub total_reviews: i32,
    pub average_quality: f64,
    pub success_rate: i32,     // Whole percent, 0-100
    pub last_reviewed_at: NaiveDateTime,
}
