use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Dependency(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Status code the HTTP layer answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            StoreError::Validation(_) | StoreError::Json(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::Conflict(_) => 409,
            _ => 500,
        }
    }

    /// Transient failures of the underlying store. Logical conflicts are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Dependency(_))
    }

    /// Maps a failed insert, turning uniqueness violations into `Conflict` with the given message.
    pub(crate) fn from_insert(err: tokio_rusqlite::Error, conflict: impl Into<String>) -> Self {
        match constraint_violation(&err) {
            Some(Constraint::Unique) => StoreError::Conflict(conflict.into()),
            _ => err.into(),
        }
    }
}

enum Constraint {
    Unique,
    Rejected,
}

fn constraint_violation(err: &tokio_rusqlite::Error) -> Option<Constraint> {
    let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) = err else {
        return None;
    };
    if e.code != rusqlite::ErrorCode::ConstraintViolation {
        return None;
    }
    match e.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(Constraint::Unique)
        }
        _ => Some(Constraint::Rejected),
    }
}

impl From<tokio_rusqlite::Error> for StoreError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match constraint_violation(&err) {
            Some(Constraint::Unique) => StoreError::Conflict(err.to_string()),
            // CHECK, NOT NULL and FOREIGN KEY failures
            Some(Constraint::Rejected) => StoreError::Validation(err.to_string()),
            None => StoreError::Dependency(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        tokio_rusqlite::Error::Rusqlite(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(StoreError::Validation("x".into()).http_status(), 400);
        assert_eq!(StoreError::NotFound("x".into()).http_status(), 404);
        assert_eq!(StoreError::Conflict("x".into()).http_status(), 409);
        assert_eq!(StoreError::Dependency("x".into()).http_status(), 500);
        assert_eq!(StoreError::Config("x".into()).http_status(), 500);
    }

    #[test]
    fn test_only_dependency_is_retryable() {
        assert!(StoreError::Dependency("db locked".into()).is_retryable());
        assert!(!StoreError::Conflict("dup".into()).is_retryable());
        assert!(!StoreError::NotFound("list 1".into()).is_retryable());
    }

    #[test]
    fn test_constraint_violation_maps_to_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, k TEXT UNIQUE); INSERT INTO t (k) VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t (k) VALUES ('a')", [])
            .unwrap_err();
        let mapped = StoreError::from_insert(tokio_rusqlite::Error::Rusqlite(err), "k taken");
        assert!(matches!(mapped, StoreError::Conflict(ref m) if m == "k taken"));
    }

    #[test]
    fn test_check_and_foreign_key_failures_are_not_conflicts() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (
                 id INTEGER PRIMARY KEY,
                 parent_id INTEGER NOT NULL REFERENCES parent(id),
                 score INTEGER CHECK (score BETWEEN 0 AND 10)
             );
             INSERT INTO parent (id) VALUES (1);",
        )
        .unwrap();

        let check = conn
            .execute("INSERT INTO child (parent_id, score) VALUES (1, 11)", [])
            .unwrap_err();
        let mapped = StoreError::from_insert(tokio_rusqlite::Error::Rusqlite(check), "dup");
        assert!(matches!(mapped, StoreError::Validation(_)));

        let orphan = conn
            .execute("INSERT INTO child (parent_id, score) VALUES (99, 1)", [])
            .unwrap_err();
        let mapped = StoreError::from_insert(tokio_rusqlite::Error::Rusqlite(orphan), "dup");
        assert!(matches!(mapped, StoreError::Validation(_)));

        let missing = conn
            .execute("INSERT INTO child (score) VALUES (1)", [])
            .unwrap_err();
        assert!(matches!(StoreError::from(missing), StoreError::Validation(_)));

        let duplicate = conn
            .execute("INSERT INTO parent (id) VALUES (1)", [])
            .unwrap_err();
        assert!(matches!(StoreError::from(duplicate), StoreError::Conflict(_)));
    }

    #[test]
    fn test_other_sqlite_errors_map_to_dependency() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();
        assert!(matches!(StoreError::from(err), StoreError::Dependency(_)));
    }
}
