use diesel::prelude::*;

use crate::data::models::{NewWord, Word};
use crate::schema::{deck_words, words};

/// Read access to the item catalog, plus the seeding helpers the
/// embedding application uses to populate it.
pub struct WordRepository;

impl WordRepository {
    pub fn exists(conn: &mut SqliteConnection, word_id: i32) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(words::table.filter(words::word_id.eq(word_id)))).get_result(conn)
    }

    pub fn find(
        conn: &mut SqliteConnection,
        word_id: i32,
    ) -> Result<Option<Word>, diesel::result::Error> {
        words::table
            .find(word_id)
            .select(Word::as_select())
            .first(conn)
            .optional()
    }

    pub fn upsert_word(
        conn: &mut SqliteConnection,
        word: &NewWord<'_>,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(words::table)
            .values(word)
            .on_conflict(words::word_id)
            .do_update()
            .set(word)
            .execute(conn)?;
        Ok(())
    }

    pub fn add_to_deck(
        conn: &mut SqliteConnection,
        deck_id: i32,
        word_id: i32,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(deck_words::table)
            .values((
                deck_words::deck_id.eq(deck_id),
                deck_words::word_id.eq(word_id),
            ))
            .on_conflict((deck_words::deck_id, deck_words::word_id))
            .do_nothing()
            .execute(conn)?;
        Ok(())
    }
}
