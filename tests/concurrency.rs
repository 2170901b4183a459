mod common;

use std::time::Duration;

use diesel::connection::SimpleConnection;
use futures_util::future::join_all;

use common::{day, seed_word, setup, setup_with};
use zwcd_srs::{ReviewError, ReviewSubmission};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_key_submissions_are_serialized() {
    let db = setup();
    seed_word(&db.pool, 10, "zh", 1);

    let qualities: Vec<i32> = (0..24).map(|i| i % 6).collect();
    let results = join_all(qualities.iter().map(|quality| {
        db.service
            .submit_review_async(ReviewSubmission::new(1, 10, *quality), day(0))
    }))
    .await;
    assert!(results.iter().all(|r| r.is_ok()), "{:?}", results);

    let record = db.service.review_status(1, 10).unwrap().unwrap();
    let passed = qualities.iter().filter(|q| **q >= 3).count() as i32;
    assert_eq!(record.review_count, 24);
    assert_eq!(record.correct_count, passed);

    let stats = db.service.item_stats(10).unwrap().unwrap();
    assert_eq!(stats.total_reviews, 24);
    assert!((stats.average_quality - 2.5).abs() < 1e-9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn aggregate_matches_sum_of_learner_counts() {
    let db = setup();
    seed_word(&db.pool, 10, "zh", 1);
    seed_word(&db.pool, 11, "zh", 1);

    let submissions: Vec<ReviewSubmission> = (1..=6)
        .flat_map(|learner| {
            [10, 11, 10].map(|item| ReviewSubmission::new(learner, item, 4))
        })
        .collect();
    let results = join_all(
        submissions
            .into_iter()
            .map(|s| db.service.submit_review_async(s, day(2))),
    )
    .await;
    assert!(results.iter().all(|r| r.is_ok()));

    for (item, per_learner) in [(10, 2), (11, 1)] {
        let mut sum = 0;
        for learner in 1..=6 {
            let record = db.service.review_status(learner, item).unwrap().unwrap();
            assert_eq!(record.review_count, per_learner);
            sum += record.review_count;
        }
        let stats = db.service.item_stats(item).unwrap().unwrap();
        assert_eq!(stats.total_reviews, sum);
        assert_eq!(stats.success_rate, 100);
    }

    let due = db
        .service
        .due_items_async(zwcd_srs::DueItemsQuery::new(3, 10), day(3))
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].word.id, 11);
}

#[test]
fn held_write_lock_surfaces_as_conflict() {
    let db = setup_with(|config| {
        config.busy_timeout = Duration::ZERO;
        config.max_conflict_retries = 2;
    });
    seed_word(&db.pool, 10, "zh", 1);

    let mut blocker = db.pool.get().unwrap();
    blocker.batch_execute("BEGIN IMMEDIATE").unwrap();

    let err = db
        .service
        .submit_review(&ReviewSubmission::new(1, 10, 4), day(0))
        .unwrap_err();
    match err {
        ReviewError::Conflict {
            learner_id,
            item_id,
            attempts,
        } => {
            assert_eq!((learner_id, item_id, attempts), (1, 10, 3));
        }
        other => panic!("expected conflict, got {:?}", other),
    }

    blocker.batch_execute("ROLLBACK").unwrap();
    drop(blocker);

    assert!(db.service.review_status(1, 10).unwrap().is_none());
    let record = db
        .service
        .submit_review(&ReviewSubmission::new(1, 10, 4), day(0))
        .unwrap();
    assert_eq!(record.review_count, 1);
}
