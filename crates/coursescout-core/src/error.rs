use crate::record::CourseId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Course not found: {0}")]
    NotFound(String),

    #[error("Course already stored with id {0}")]
    AlreadyStored(CourseId),

    #[error("Inserted course could not be found again: {0}")]
    InsertVerificationFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
