use sqlx::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DatabaseError {
    #[error("Internal database error: {0}")]
    BackendError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the error is a unique-constraint violation. If `constraint`
    /// is given, the violated constraint must also carry that name.
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        let Self::BackendError(sqlx::Error::Database(db_err)) = self else {
            return false;
        };
        if db_err.kind() != ErrorKind::UniqueViolation {
            return false;
        }
        match constraint {
            Some(name) => db_err.constraint() == Some(name),
            None => true,
        }
    }
}
