//! Error type for the person store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("uuid parse error: {0}")]
    Uuid(#[from] uuid::Error),

    #[error("date parse error: {0}")]
    DateParse(String),

    /// The nickname column's unique constraint rejected an insert.
    #[error("nickname already taken: {0}")]
    DuplicateNickname(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
