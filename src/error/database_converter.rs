use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Unique constraint guarding email uniqueness per collection.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "user_documents_collection_email_key";

/// Utility for converting Diesel errors into `AppError` kinds.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn diesel::result::DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message().to_string();

        match kind {
            DatabaseErrorKind::UniqueViolation
                if info.constraint_name() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
            {
                AppError::Duplicate {
                    entity: "user".to_string(),
                    field: "email".to_string(),
                    value: Self::extract_email(info.details()).unwrap_or_else(|| "unknown".into()),
                }
            }
            DatabaseErrorKind::UniqueViolation => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Unique constraint violation: {}", message)),
            },
            DatabaseErrorKind::ClosedConnection => AppError::Connection {
                source: anyhow::Error::msg(message),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(message),
            },
        }
    }

    /// Pulls the email out of a Postgres detail line such as
    /// `Key (collection, email)=(users, john@doe.com) already exists.`
    pub fn extract_email(details: Option<&str>) -> Option<String> {
        let details = details?;
        let values = details.split(")=(").nth(1)?;
        let values = values.split(')').next()?;
        values
            .rsplit(", ")
            .next()
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
    }
}
