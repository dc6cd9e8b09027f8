use sea_orm::{DbErr, SqlErr};

/// Classify storage errors that carry domain meaning.
pub trait DbErrExt {
    /// `true` when the statement was rejected by a primary key or unique index.
    fn is_unique_violation(&self) -> bool;
    /// `true` when a referenced row does not exist.
    fn is_foreign_key_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn is_foreign_key_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
    }
}
