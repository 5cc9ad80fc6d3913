//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reserva_domain::ReservaError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ReservaError);

impl From<InfraError> for ReservaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ReservaError> for InfraError {
    fn from(value: ReservaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoReservaError {
    fn into_reserva(self) -> ReservaError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → ReservaError */
/* -------------------------------------------------------------------------- */

/// Message raised by the schema's overlap triggers.
pub(crate) const OVERLAP_TRIGGER_MESSAGE: &str = "reservation overlap";

impl IntoReservaError for SqlError {
    fn into_reserva(self) -> ReservaError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    // RAISE(ABORT, ...) from the overlap triggers
                    (ErrorCode::ConstraintViolation, _)
                        if message.contains(OVERLAP_TRIGGER_MESSAGE) =>
                    {
                        ReservaError::Conflict(
                            "location already reserved for an overlapping time range".into(),
                        )
                    }
                    (ErrorCode::DatabaseBusy, _) => {
                        ReservaError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        ReservaError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        ReservaError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        ReservaError::Database("foreign key constraint violation".into())
                    }
                    _ => ReservaError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => ReservaError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                ReservaError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ReservaError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => ReservaError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidQuery => ReservaError::Database("invalid SQL query".into()),
            other => ReservaError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_reserva())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → ReservaError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(ReservaError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ReservaError */
/* -------------------------------------------------------------------------- */

impl IntoReservaError for HttpError {
    fn into_reserva(self) -> ReservaError {
        if self.is_timeout() {
            return ReservaError::Network("HTTP request timed out".into());
        }
        if self.is_connect() {
            return ReservaError::Network(format!("connection failed: {self}"));
        }
        if self.is_decode() {
            return ReservaError::Sync(format!("failed to decode provider response: {self}"));
        }
        ReservaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_reserva())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_trigger_abort_maps_to_conflict() {
        let err = SqlError::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::ConstraintViolation,
                extended_code: 1811,
            },
            Some("reservation overlap".to_string()),
        );
        assert!(matches!(InfraError::from(err).0, ReservaError::Conflict(_)));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let err = SqlError::QueryReturnedNoRows;
        assert!(matches!(InfraError::from(err).0, ReservaError::NotFound(_)));
    }

    #[test]
    fn unique_violation_maps_to_database() {
        let err = SqlError::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::ConstraintViolation,
                extended_code: 2067,
            },
            Some("UNIQUE constraint failed: users.email".to_string()),
        );
        assert!(matches!(InfraError::from(err).0, ReservaError::Database(_)));
    }
}
