use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Record not found")]
    NotFound,

    #[error("Slot already taken")]
    SlotTaken,

    #[error("Duplicate record")]
    Duplicate,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DatabaseError {
    /// Maps unique-index violations from the appointments table onto the
    /// domain conflict. The partial index on (professional_id, starts_at)
    /// backs the guarded insert, so a 23505 there means a lost race.
    pub fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return DatabaseError::SlotTaken;
            }
        }
        DatabaseError::Sqlx(err)
    }
}
