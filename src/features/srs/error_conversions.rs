use diesel::result::Error as DieselError;
use r2d2::Error as PoolError;
use tokio::task::JoinError;
use validator::ValidationErrors;

use crate::features::srs::ReviewError;

impl From<DieselError> for ReviewError {
    fn from(err: DieselError) -> Self {
        ReviewError::DatabaseError(err)
    }
}

impl From<PoolError> for ReviewError {
    fn from(err: PoolError) -> Self {
        ReviewError::PoolError(err)
    }
}

impl From<ValidationErrors> for ReviewError {
    fn from(err: ValidationErrors) -> Self {
        ReviewError::Validation(err.to_string())
    }
}

impl From<JoinError> for ReviewError {
    fn from(err: JoinError) -> Self {
        ReviewError::TaskError(err)
    }
}
