use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use validator::Validate;

use crate::config::SchedulerConfig;
use crate::data::DbPool;
use crate::data::models::{
    DueItem, DueItemsQuery, ItemAggregateStats, ItemKey, ReviewStatus, ReviewSubmission,
};
use crate::data::repositories::{ItemStatsRepository, ReviewStatusRepository, WordRepository};
use crate::features::srs::engine::{self, Quality};
use crate::features::srs::{ReviewError, selector, stats};

/// Single entry point for mutating review state.
///
/// Each submission runs as one IMMEDIATE transaction: the write lock is
/// taken before the prior record is read, so read-compute-write for any
/// key is serialized and the status and aggregate writes commit or roll
/// back together.
#[derive(Clone)]
pub struct ReviewService {
    pool: DbPool,
    max_conflict_retries: u32,
}

impl ReviewService {
    pub fn new(pool: DbPool, config: &SchedulerConfig) -> Self {
        Self {
            pool,
            max_conflict_retries: config.max_conflict_retries,
        }
    }

    /// Applies one graded recall and returns the persisted record
    pub fn submit_review(
        &self,
        submission: &ReviewSubmission,
        now: NaiveDateTime,
    ) -> Result<ReviewStatus, ReviewError> {
        self.submit(submission, now, None)
    }

    /// Like [`submit_review`](Self::submit_review), but rolls back with
    /// [`ReviewError::Timeout`] if `timeout` elapses before commit.
    pub fn submit_review_with_timeout(
        &self,
        submission: &ReviewSubmission,
        now: NaiveDateTime,
        timeout: Duration,
    ) -> Result<ReviewStatus, ReviewError> {
        self.submit(submission, now, Some(Instant::now() + timeout))
    }

    fn submit(
        &self,
        submission: &ReviewSubmission,
        now: NaiveDateTime,
        deadline: Option<Instant>,
    ) -> Result<ReviewStatus, ReviewError> {
        submission.validate()?;
        let quality = Quality::new(submission.quality).ok_or_else(|| {
            ReviewError::Validation(format!("Quality {} is outside 0-5", submission.quality))
        })?;

        if let Some(time_spent_ms) = submission.time_spent_ms {
            log::debug!(
                "Learner {} spent {}ms on item {}",
                submission.learner_id,
                time_spent_ms,
                submission.item_id
            );
        }

        let record = self.write_with_retries(submission.key(), deadline, |conn| {
            apply_review(conn, submission, quality, now, deadline)
        })?;

        log::info!(
            "Review recorded: learner={} item={} quality={} status={:?} next={}",
            record.learner_id,
            record.item_id,
            quality,
            record.status,
            record.next_review_at
        );
        Ok(record)
    }

    /// Adds an item to a learner's study set as `NEW`.
    ///
    /// Returns the existing record untouched if the learner already has one.
    pub fn enroll_item(
        &self,
        learner_id: i32,
        item_id: i32,
        now: NaiveDateTime,
    ) -> Result<ReviewStatus, ReviewError> {
        let key = ItemKey {
            learner_id,
            item_id,
        };
        key.validate()?;

        self.write_with_retries(key, None, |conn| {
            if !WordRepository::exists(conn, item_id)? {
                return Err(ReviewError::NotFound(item_id));
            }

            let fresh = ReviewStatus::new_item(learner_id, item_id, now);
            if ReviewStatusRepository::insert_if_absent(conn, &fresh)? {
                log::info!("Enrolled item {} for learner {}", item_id, learner_id);
                return Ok(fresh);
            }

            ReviewStatusRepository::find(conn, learner_id, item_id)?
                .ok_or(ReviewError::DatabaseError(diesel::result::Error::NotFound))
        })
    }

    pub fn review_status(
        &self,
        learner_id: i32,
        item_id: i32,
    ) -> Result<Option<ReviewStatus>, ReviewError> {
        ItemKey {
            learner_id,
            item_id,
        }
        .validate()?;

        let mut conn = self.pool.get()?;
        Ok(ReviewStatusRepository::find(&mut conn, learner_id, item_id)?)
    }

    pub fn item_stats(&self, item_id: i32) -> Result<Option<ItemAggregateStats>, ReviewError> {
        if item_id < 1 {
            return Err(ReviewError::Validation(format!("Item id {} must be positive", item_id)));
        }

        let mut conn = self.pool.get()?;
        Ok(ItemStatsRepository::find(&mut conn, item_id)?)
    }

    /// Ranked due items for a learner. An empty list is a normal result.
    pub fn due_items(
        &self,
        query: &DueItemsQuery,
        now: NaiveDateTime,
    ) -> Result<Vec<DueItem>, ReviewError> {
        query.validate()?;

        let mut conn = self.pool.get()?;
        selector::due_items(&mut conn, query.learner_id, now, query.limit, &query.filters).map_err(
            |e| {
                log::error!("Failed to load due items for learner {}: {}", query.learner_id, e);
                ReviewError::from(e)
            },
        )
    }

    pub fn due_count(&self, learner_id: i32, now: NaiveDateTime) -> Result<i64, ReviewError> {
        if learner_id < 1 {
            return Err(ReviewError::Validation(format!(
                "Learner id {} must be positive",
                learner_id
            )));
        }

        let mut conn = self.pool.get()?;
        Ok(selector::due_count(&mut conn, learner_id, now)?)
    }

    /// Runs [`submit_review`](Self::submit_review) on the blocking pool
    pub async fn submit_review_async(
        &self,
        submission: ReviewSubmission,
        now: NaiveDateTime,
    ) -> Result<ReviewStatus, ReviewError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.submit_review(&submission, now)).await?
    }

    /// Runs [`due_items`](Self::due_items) on the blocking pool
    pub async fn due_items_async(
        &self,
        query: DueItemsQuery,
        now: NaiveDateTime,
    ) -> Result<Vec<DueItem>, ReviewError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.due_items(&query, now)).await?
    }

    /// Runs `op` in an IMMEDIATE transaction, re-running it from scratch
    /// while the store reports lock contention.
    fn write_with_retries<T, F>(
        &self,
        key: ItemKey,
        deadline: Option<Instant>,
        op: F,
    ) -> Result<T, ReviewError>
    where
        F: Fn(&mut SqliteConnection) -> Result<T, ReviewError>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            check_deadline(deadline)?;

            let mut conn = self.pool.get()?;
            let err = match conn.immediate_transaction(|conn| op(conn)) {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if err.is_busy() {
                if attempts <= self.max_conflict_retries {
                    log::warn!(
                        "Write conflict on learner {} item {} (attempt {}), retrying",
                        key.learner_id,
                        key.item_id,
                        attempts
                    );
                    continue;
                }
                log::error!(
                    "Giving up on learner {} item {} after {} attempts",
                    key.learner_id,
                    key.item_id,
                    attempts
                );
                return Err(ReviewError::Conflict {
                    learner_id: key.learner_id,
                    item_id: key.item_id,
                    attempts,
                });
            }

            match &err {
                ReviewError::Timeout => log::warn!(
                    "Review for learner {} item {} timed out, rolled back",
                    key.learner_id,
                    key.item_id
                ),
                ReviewError::DatabaseError(e) => log::error!("Database error: {}", e),
                ReviewError::PoolError(e) => log::error!("Connection pool error: {}", e),
                _ => {}
            }
            return Err(err);
        }
    }
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), ReviewError> {
    match deadline {
        Some(deadline) if Instant::now() >= deadline => Err(ReviewError::Timeout),
        _ => Ok(()),
    }
}

/// Catalog check through aggregate update, on a connection already inside the
/// transaction.
fn apply_review(
    conn: &mut SqliteConnection,
    submission: &ReviewSubmission,
    quality: Quality,
    now: NaiveDateTime,
    deadline: Option<Instant>,
) -> Result<ReviewStatus, ReviewError> {
    let ReviewSubmission {
        learner_id,
        item_id,
        ..
    } = *submission;

    if !WordRepository::exists(conn, item_id)? {
        return Err(ReviewError::NotFound(item_id));
    }

    let prior = ReviewStatusRepository::find(conn, learner_id, item_id)?;
    let prior_state = prior
        .as_ref()
        .map(ReviewStatus::memory_state)
        .unwrap_or_default();

    let schedule = engine::compute(quality, prior_state);
    log::debug!(
        "SM-2 for learner {} item {}: {:?} -> {:?}",
        learner_id,
        item_id,
        prior_state,
        schedule
    );

    let mut record = prior.unwrap_or_else(|| ReviewStatus::new_item(learner_id, item_id, now));
    record.status = schedule.status;
    record.easiness = schedule.easiness;
    record.interval = schedule.interval;
    record.repetition = schedule.repetition;
    record.review_count += 1;
    if quality.is_success() {
        record.correct_count += 1;
    }
    record.last_quality = Some(i32::from(quality.value()));
    record.last_reviewed_at = Some(now);
    record.next_review_at = now
        .checked_add_signed(chrono::Duration::days(i64::from(schedule.interval)))
        .ok_or(ReviewError::ScheduleOutOfRange(schedule.interval))?;

    ReviewStatusRepository::upsert(conn, &record)?;
    stats::record_review(conn, item_id, quality, now)?;

    check_deadline(deadline)?;
    Ok(record)
}
