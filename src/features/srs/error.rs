use diesel::result::Error as DieselError;
use r2d2::Error as PoolError;
use thiserror::Error;
use tokio::task::JoinError;

/// Failure of a single review or due-items call. None of these leave
/// partial state behind.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Item {0} not found")]
    NotFound(i32),
    #[error("Concurrent update on learner {learner_id}, item {item_id} (gave up after {attempts} attempts)")]
    Conflict {
        learner_id: i32,
        item_id: i32,
        attempts: u32,
    },
    #[error("Next review date is out of range ({0} days from review)")]
    ScheduleOutOfRange(i32),
    #[error("Operation timed out before commit")]
    Timeout,
    #[error("Database error: {0}")]
    DatabaseError(DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(PoolError),
    #[error("Background task failed: {0}")]
    TaskError(JoinError),
}

impl ReviewError {
    /// True when the store reported lock contention rather than a real fault
    pub fn is_busy(&self) -> bool {
        match self {
            ReviewError::DatabaseError(DieselError::DatabaseError(_, info)) => {
                let message = info.message().to_ascii_lowercase();
                message.contains("database is locked") || message.contains("busy")
            }
            _ => false,
        }
    }

    /// True for failures a caller may reasonably retry later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ReviewError::Conflict { .. } | ReviewError::Timeout | ReviewError::PoolError(_)
        ) || self.is_busy()
    }
}
