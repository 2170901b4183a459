#![allow(dead_code)]

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use zwcd_srs::{DbPool, NewWord, ReviewService, SchedulerConfig, WordRepository, init_pool};

pub struct TestDb {
    // Keeps the database file alive for the lifetime of the test
    _dir: TempDir,
    pub config: SchedulerConfig,
    pub pool: DbPool,
    pub service: ReviewService,
}

pub fn setup() -> TestDb {
    setup_with(|_| {})
}

pub fn setup_with(tweak: impl FnOnce(&mut SchedulerConfig)) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SchedulerConfig {
        database_url: dir.path().join("srs.db").to_string_lossy().into_owned(),
        pool_size: 4,
        busy_timeout: Duration::from_secs(5),
        max_conflict_retries: 3,
    };
    tweak(&mut config);

    let pool = init_pool(&config).unwrap();
    let service = ReviewService::new(pool.clone(), &config);
    TestDb {
        _dir: dir,
        config,
        pool,
        service,
    }
}

pub fn seed_word(pool: &DbPool, word_id: i32, language: &str, difficulty: i32) {
    let mut conn = pool.get().unwrap();
    let simplified = format!("字{}", word_id);
    WordRepository::upsert_word(
        &mut conn,
        &NewWord {
            word_id,
            simplified: &simplified,
            traditional: None,
            pinyin: "zi4",
            definition: "character",
            language,
            difficulty,
        },
    )
    .unwrap();
}

pub fn add_to_deck(pool: &DbPool, deck_id: i32, word_id: i32) {
    let mut conn = pool.get().unwrap();
    WordRepository::add_to_deck(&mut conn, deck_id, word_id).unwrap();
}

pub fn day(n: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        + chrono::Duration::days(i64::from(n))
}
