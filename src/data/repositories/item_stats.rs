use diesel::prelude::*;

use crate::data::models::ItemAggregateStats;
use crate::schema::item_stats;

pub struct ItemStatsRepository;

impl ItemStatsRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        item_id: i32,
    ) -> Result<Option<ItemAggregateStats>, diesel::result::Error> {
        item_stats::table
            .find(item_id)
            .select(ItemAggregateStats::as_select())
            .first(conn)
            .optional()
    }

    pub fn upsert(
        conn: &mut SqliteConnection,
        stats: &ItemAggregateStats,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(item_stats::table)
            .values(stats)
            .on_conflict(item_stats::item_id)
            .do_update()
            .set(stats)
            .execute(conn)?;
        Ok(())
    }
}
