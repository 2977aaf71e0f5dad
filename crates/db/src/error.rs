#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("time parse error: {0}")]
    TimeParse(#[from] chrono::ParseError),
    #[error("json column error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl DbError {
    /// True when the store answered but a stored value had an unexpected shape.
    pub fn is_decode(&self) -> bool {
        match self {
            DbError::TimeParse(_) | DbError::Json(_) => true,
            DbError::Sqlite(err) => matches!(
                err,
                rusqlite::Error::InvalidColumnType(..)
                    | rusqlite::Error::FromSqlConversionFailure(..)
                    | rusqlite::Error::IntegralValueOutOfRange(..)
            ),
            DbError::Unavailable(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
