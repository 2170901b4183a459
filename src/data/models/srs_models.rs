use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Integer;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

use crate::features::srs::engine::{DEFAULT_EASINESS, INITIAL_INTERVAL, MemoryState};
use crate::schema::review_status;

/// Where a learner stands with an item.
///
/// Variants are declared in presentation priority: brand-new items come
/// before anything that is merely due. The rank is what gets stored, so
/// `ORDER BY status` in SQL follows the same order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Integer)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningStatus {
    New,
    Learning,
    Review,
    Mastered,
}

impl LearningStatus {
    pub fn rank(self) -> i32 {
        match self {
            LearningStatus::New => 0,
            LearningStatus::Learning => 1,
            LearningStatus::Review => 2,
            LearningStatus::Mastered => 3,
        }
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        match rank {
            0 => Some(LearningStatus::New),
            1 => Some(LearningStatus::Learning),
            2 => Some(LearningStatus::Review),
            3 => Some(LearningStatus::Mastered),
            _ => None,
        }
    }
}

impl ToSql<Integer, Sqlite> for LearningStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.rank());
        Ok(IsNull::No)
    }
}

impl FromSql<Integer, Sqlite> for LearningStatus {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let rank = <i32 as FromSql<Integer, Sqlite>>::from_sql(bytes)?;
        LearningStatus::from_rank(rank)
            .ok_or_else(|| format!("Unknown learning status rank: {}", rank).into())
    }
}

/// Memory record for one (learner, item) pair
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset,
)]
#[diesel(table_name = review_status)]
#[diesel(primary_key(learner_id, item_id))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewStatus {
    pub learner_id: i32,
    pub item_id: i32,
    pub status: LearningStatus,
    pub easiness: f64,
    #[diesel(column_name = interval_days)]
    pub interval: i32,
    pub repetition: i32,
    pub review_count: i32,
    pub correct_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_quality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<NaiveDateTime>,
    pub next_review_at: NaiveDateTime,
}

impl ReviewStatus {
    /// A never-reviewed record, due immediately
    pub fn new_item(learner_id: i32, item_id: i32, now: NaiveDateTime) -> Self {
        Self {
            learner_id,
            item_id,
            status: LearningStatus::New,
            easiness: DEFAULT_EASINESS,
            interval: INITIAL_INTERVAL,
            repetition: 0,
            review_count: 0,
            correct_count: 0,
            last_quality: None,
            last_reviewed_at: None,
            next_review_at: now,
        }
    }

    pub fn memory_state(&self) -> MemoryState {
        MemoryState {
            easiness: self.easiness,
            interval: self.interval,
            repetition: self.repetition,
        }
    }

    pub fn is_new(&self) -> bool {
        self.status == LearningStatus::New
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.is_new() || self.next_review_at <= now
    }
}
