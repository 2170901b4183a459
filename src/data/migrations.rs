//! Embedded schema migrations, tracked through `PRAGMA user_version`.

use anyhow::{Context, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub up: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Word catalog and deck membership",
        up: MIGRATION_V1_UP,
    },
    Migration {
        version: 2,
        description: "Per-learner review status and per-item statistics",
        up: MIGRATION_V2_UP,
    },
];

const MIGRATION_V1_UP: &str = r#"
CREATE TABLE IF NOT EXISTS words (
    word_id INTEGER PRIMARY KEY NOT NULL,
    simplified TEXT NOT NULL,
    traditional TEXT,
    pinyin TEXT NOT NULL,
    definition TEXT NOT NULL,
    language TEXT NOT NULL DEFAULT 'zh',
    difficulty INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS deck_words (
    deck_id INTEGER NOT NULL,
    word_id INTEGER NOT NULL REFERENCES words(word_id) ON DELETE CASCADE,
    PRIMARY KEY (deck_id, word_id)
);

CREATE INDEX IF NOT EXISTS idx_words_language ON words(language, difficulty);
"#;

const MIGRATION_V2_UP: &str = r#"
CREATE TABLE IF NOT EXISTS review_status (
    learner_id INTEGER NOT NULL,
    item_id INTEGER NOT NULL REFERENCES words(word_id) ON DELETE CASCADE,
    status INTEGER NOT NULL DEFAULT 0 CHECK (status BETWEEN 0 AND 3),
    easiness DOUBLE NOT NULL DEFAULT 2.5 CHECK (easiness >= 1.3),
    interval_days INTEGER NOT NULL DEFAULT 1 CHECK (interval_days >= 1),
    repetition INTEGER NOT NULL DEFAULT 0 CHECK (repetition >= 0),
    review_count INTEGER NOT NULL DEFAULT 0,
    correct_count INTEGER NOT NULL DEFAULT 0 CHECK (correct_count <= review_count),
    last_quality INTEGER CHECK (last_quality BETWEEN 0 AND 5),
    last_reviewed_at TIMESTAMP,
    next_review_at TIMESTAMP NOT NULL,
    PRIMARY KEY (learner_id, item_id)
);

CREATE INDEX IF NOT EXISTS idx_review_status_due
    ON review_status(learner_id, status, next_review_at);

CREATE TABLE IF NOT EXISTS item_stats (
    item_id INTEGER PRIMARY KEY NOT NULL REFERENCES words(word_id) ON DELETE CASCADE,
    total_reviews INTEGER NOT NULL,
    average_quality DOUBLE NOT NULL,
    success_rate INTEGER NOT NULL CHECK (success_rate BETWEEN 0 AND 100),
    last_reviewed_at TIMESTAMP NOT NULL
);
"#;

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

pub fn schema_version(conn: &mut SqliteConnection) -> Result<i32> {
    let row = diesel::sql_query("PRAGMA user_version")
        .get_result::<UserVersion>(conn)
        .context("Failed to read schema version")?;
    Ok(row.user_version)
}

/// Applies every migration newer than the database's recorded version
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let current = schema_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
            conn.batch_execute(migration.up)?;
            conn.batch_execute(&format!("PRAGMA user_version = {}", migration.version))
        })
        .with_context(|| {
            format!(
                "Migration {} ({}) failed",
                migration.version, migration.description
            )
        })?;
        log::info!(
            "Applied migration {}: {}",
            migration.version,
            migration.description
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        assert_eq!(schema_version(&mut conn).unwrap(), 0);

        run_migrations(&mut conn).unwrap();
        let latest = MIGRATIONS.last().unwrap().version;
        assert_eq!(schema_version(&mut conn).unwrap(), latest);

        run_migrations(&mut conn).unwrap();
        assert_eq!(schema_version(&mut conn).unwrap(), latest);
    }

    #[test]
    fn schema_rejects_easiness_below_floor() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        run_migrations(&mut conn).unwrap();
        conn.batch_execute(
            "INSERT INTO words (word_id, simplified, pinyin, definition) VALUES (1, '书', 'shu1', 'book')",
        )
        .unwrap();

        let result = conn.batch_execute(
            "INSERT INTO review_status (learner_id, item_id, easiness, next_review_at) \
             VALUES (1, 1, 1.1, '2026-01-01 00:00:00')",
        );
        assert!(result.is_err());
    }
}
