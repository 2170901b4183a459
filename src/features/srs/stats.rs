//! Per-item aggregate statistics across all learners.

use chrono::NaiveDateTime;
use diesel::SqliteConnection;

use crate::data::models::ItemAggregateStats;
use crate::data::repositories::ItemStatsRepository;
use crate::features::srs::engine::Quality;

/// Folds one more review into an item's running metrics.
///
/// Keeps no per-review history: the mean is updated incrementally and the
/// success count is re-derived from the stored whole-percent rate, so long
/// histories accumulate some rounding drift.
pub fn fold_review(
    prior: Option<&ItemAggregateStats>,
    item_id: i32,
    quality: Quality,
    now: NaiveDateTime,
) -> ItemAggregateStats {
    let quality_value = quality.value() as f64;
    let succeeded = i32::from(quality.is_success());

    match prior {
        None => ItemAggregateStats {
            item_id,
            total_reviews: 1,
            average_quality: quality_value,
            success_rate: succeeded * 100,
            last_reviewed_at: now,
        },
        Some(stats) => {
            let n = stats.total_reviews as f64;
            let total_reviews = stats.total_reviews + 1;
            let average_quality = (stats.average_quality * n + quality_value) / total_reviews as f64;
            let prior_successes = (stats.success_rate as f64 / 100.0 * n).round() as i32;
            let successes = prior_successes + succeeded;
            let success_rate = (successes as f64 / total_reviews as f64 * 100.0).round() as i32;

            ItemAggregateStats {
                item_id,
                total_reviews,
                average_quality,
                success_rate,
                last_reviewed_at: now,
            }
        }
    }
}

/// Reads, folds and writes an item's aggregate on the given connection.
///
/// Only the review orchestrator calls this, inside its unit of work.
pub(crate) fn record_review(
    conn: &mut SqliteConnection,
    item_id: i32,
    quality: Quality,
    now: NaiveDateTime,
) -> Result<ItemAggregateStats, diesel::result::Error> {
    let prior = ItemStatsRepository::find(conn, item_id)?;
    let stats = fold_review(prior.as_ref(), item_id, quality, now);
    ItemStatsRepository::upsert(conn, &stats)?;
    Ok(stats)
}
