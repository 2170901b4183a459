//! Due-item selection: which of a learner's items to present, in order.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::{DueFilters, DueItem, LearningStatus, ReviewStatus, Word};
use crate::schema::{deck_words, review_status, words};

/// Returns the learner's due items, most urgent first.
///
/// An item is due when it has never been reviewed (`NEW`) or its scheduled
/// time has passed. New items come first, then learning, review and
/// mastered ones; within a status the most overdue item leads.
pub fn due_items(
    conn: &mut SqliteConnection,
    learner_id: i32,
    now: NaiveDateTime,
    limit: i64,
    filters: &DueFilters,
) -> Result<Vec<DueItem>, diesel::result::Error> {
    if limit <= 0 {
        return Ok(Vec::new());
    }

    let mut query = review_status::table
        .inner_join(words::table)
        .filter(review_status::learner_id.eq(learner_id))
        .filter(
            review_status::next_review_at
                .le(now)
                .or(review_status::status.eq(LearningStatus::New)),
        )
        .select((Word::as_select(), ReviewStatus::as_select()))
        .into_boxed();

    if let Some(language) = &filters.language {
        query = query.filter(words::language.eq(language.clone()));
    }
    if let Some(difficulty) = filters.difficulty {
        query = query.filter(words::difficulty.eq(difficulty));
    }
    if let Some(max_difficulty) = filters.max_difficulty {
        query = query.filter(words::difficulty.le(max_difficulty));
    }
    if let Some(deck_id) = filters.deck_id {
        query = query.filter(
            words::word_id.eq_any(
                deck_words::table
                    .filter(deck_words::deck_id.eq(deck_id))
                    .select(deck_words::word_id),
            ),
        );
    }

    let rows = query
        .order_by((
            review_status::status.asc(),
            review_status::next_review_at.asc(),
            review_status::item_id.asc(),
        ))
        .limit(limit)
        .load::<(Word, ReviewStatus)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(word, status)| DueItem { word, status })
        .collect())
}

/// Number of due items for a learner, ignoring catalog filters
pub fn due_count(
    conn: &mut SqliteConnection,
    learner_id: i32,
    now: NaiveDateTime,
) -> Result<i64, diesel::result::Error> {
    review_status::table
        .filter(review_status::learner_id.eq(learner_id))
        .filter(
            review_status::next_review_at
                .le(now)
                .or(review_status::status.eq(LearningStatus::New)),
        )
        .count()
        .get_result(conn)
}
