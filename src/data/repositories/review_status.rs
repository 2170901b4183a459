use diesel::prelude::*;

use crate::data::models::ReviewStatus;
use crate::schema::review_status;

/// Keyed storage for per-(learner, item) memory records. No scheduling
/// logic lives here.
pub struct ReviewStatusRepository;

impl ReviewStatusRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        learner_id: i32,
        item_id: i32,
    ) -> Result<Option<ReviewStatus>, diesel::result::Error> {
        review_status::table
            .find((learner_id, item_id))
            .select(ReviewStatus::as_select())
            .first(conn)
            .optional()
    }

    /// Inserts the record, or overwrites every mutable field of the
    /// existing one for the same key.
    pub fn upsert(
        conn: &mut SqliteConnection,
        record: &ReviewStatus,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(review_status::table)
            .values(record)
            .on_conflict((review_status::learner_id, review_status::item_id))
            .do_update()
            .set(record)
            .execute(conn)?;
        Ok(())
    }

    pub fn insert_if_absent(
        conn: &mut SqliteConnection,
        record: &ReviewStatus,
    ) -> Result<bool, diesel::result::Error> {
        let inserted = diesel::insert_into(review_status::table)
            .values(record)
            .on_conflict((review_status::learner_id, review_status::item_id))
            .do_nothing()
            .execute(conn)?;
        Ok(inserted > 0)
    }
}
