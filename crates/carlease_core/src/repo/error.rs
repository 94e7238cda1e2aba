//! Repository error type shared by every car lease repository.

use crate::db::DbError;
use crate::model::customer::CustomerId;
use crate::model::lease::LeaseId;
use crate::model::validation::ValidationError;
use crate::model::vehicle::VehicleId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Targeted vehicle, customer or lease does not exist.
    NotFound,
    /// Request contradicts current stored state.
    Conflict,
    /// Request input failed validation; nothing was written.
    InvalidInput,
    /// Any other failure talking to the store.
    StoreFault,
}

#[derive(Debug)]
pub enum RepoError {
    VehicleNotFound(VehicleId),
    CustomerNotFound(CustomerId),
    LeaseNotFound(LeaseId),
    /// Lease exists but its end date is already set.
    LeaseAlreadyReturned(LeaseId),
    /// Return time precedes the lease start date.
    LeaseNotStarted { lease_id: LeaseId, start_date: i64 },
    /// Vehicle is already out on an active lease.
    VehicleNotAvailable(VehicleId),
    DuplicateCustomer(CustomerId),
    Validation(ValidationError),
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be mapped back to a record.
    InvalidData(String),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::VehicleNotFound(_) | Self::CustomerNotFound(_) | Self::LeaseNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::LeaseAlreadyReturned(_)
            | Self::LeaseNotStarted { .. }
            | Self::VehicleNotAvailable(_)
            | Self::DuplicateCustomer(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::InvalidInput,
            Self::Db(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::InvalidData(_) => ErrorKind::StoreFault,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_store_fault(&self) -> bool {
        self.kind() == ErrorKind::StoreFault
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::VehicleNotFound(_) => "vehicle_not_found",
            Self::CustomerNotFound(_) => "customer_not_found",
            Self::LeaseNotFound(_) => "lease_not_found",
            Self::LeaseAlreadyReturned(_) => "lease_already_returned",
            Self::LeaseNotStarted { .. } => "lease_not_started",
            Self::VehicleNotAvailable(_) => "vehicle_not_available",
            Self::DuplicateCustomer(_) => "duplicate_customer",
            Self::Validation(_) => "invalid_input",
            Self::Db(err) if err.is_constraint_violation() => "db_constraint_violation",
            Self::Db(_) => "db_error",
            Self::UninitializedConnection { .. } => "db_uninitialized",
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => {
                "db_schema_mismatch"
            }
            Self::InvalidData(_) => "invalid_persisted_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VehicleNotFound(id) => write!(f, "vehicle not found: {id}"),
            Self::CustomerNotFound(id) => write!(f, "customer not found: {id}"),
            Self::LeaseNotFound(id) => write!(f, "lease not found: {id}"),
            Self::LeaseAlreadyReturned(id) => write!(f, "lease already returned: {id}"),
            Self::LeaseNotStarted {
                lease_id,
                start_date,
            } => write!(f, "lease {lease_id} cannot be returned before its start {start_date}"),
            Self::VehicleNotAvailable(id) => write!(f, "vehicle is not available: {id}"),
            Self::DuplicateCustomer(id) => write!(f, "customer already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "car lease repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "car lease repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "car lease repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, RepoError};
    use crate::model::validation::ValidationError;

    #[test]
    fn kinds_split_not_found_from_store_fault() {
        assert!(RepoError::VehicleNotFound(1).is_not_found());
        assert!(RepoError::LeaseNotFound(1).is_not_found());
        assert!(!RepoError::LeaseAlreadyReturned(1).is_not_found());
        assert!(RepoError::InvalidData("x".to_string()).is_store_fault());
        assert_eq!(
            RepoError::Validation(ValidationError::InvalidEmail).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(RepoError::DuplicateCustomer(7).kind(), ErrorKind::Conflict);
        assert_eq!(
            RepoError::LeaseNotStarted {
                lease_id: 1,
                start_date: 10
            }
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn sqlite_errors_map_to_store_fault() {
        let err = RepoError::from(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ErrorKind::StoreFault);
        assert_eq!(err.code(), "db_error");
    }
}
