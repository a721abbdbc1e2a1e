use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A unique constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn db(e: DbErr) -> Self { Self::Db(e.to_string()) }

    /// Like [`ModelError::db`], but unique violations become [`ModelError::Conflict`].
    pub fn write(e: DbErr) -> Self {
        Self::from_sql_err(e.sql_err(), e)
    }

    fn from_sql_err(sql: Option<SqlErr>, e: DbErr) -> Self {
        match sql {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
            _ => Self::db(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_conflict() {
        let e = ModelError::from_sql_err(
            Some(SqlErr::UniqueConstraintViolation("account_email_key".into())),
            DbErr::Custom("duplicate key value violates unique constraint".into()),
        );
        assert!(matches!(e, ModelError::Conflict(ref d) if d == "account_email_key"));
    }

    #[test]
    fn other_write_errors_stay_db() {
        let e = ModelError::from_sql_err(
            Some(SqlErr::ForeignKeyConstraintViolation("fk".into())),
            DbErr::Custom("fk".into()),
        );
        assert!(matches!(e, ModelError::Db(_)));
        assert!(matches!(ModelError::write(DbErr::Custom("boom".into())), ModelError::Db(_)));
    }
}
