use crate::validators::create_validation_error;
use backtrace::Backtrace;
use diesel::result::ConnectionError;
use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use diesel::result::QueryResult;
use log::Level;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

#[derive(Clone, Debug, PartialEq)]
pub enum ErrorCode {
    InvalidInput,
    MissingInput,
    NoResults,
    QueryError,
    InsertError,
    UpdateError,
    DeleteError,
    DuplicateKeyError,
    ConnectionError,
    InternalError,
    AccessError,
    BusinessProcessError,
    ConcurrencyError,
    ValidationError {
        errors: HashMap<&'static str, Vec<ValidationError>>,
    },
    ForeignKeyError,
    ParseError,
    AlreadyProcessedError,
    AlreadyUsedError,
    TicketCancelledError,
    TicketExpiredError,
    EventPassedError,
    SoldOutError,
    CapacityExceededError,
    Unknown,
}

pub fn get_error_message(code: &ErrorCode) -> (i32, String) {
    use self::ErrorCode::*;
    // In general, these errors try to match the HTTP status codes
    match code {
        // Input errors - 1000 range
        InvalidInput => (1000, "Invalid input".to_string()),
        MissingInput => (1100, "Missing input".to_string()),
        // No results - 2000 range. Query was successful, but the wrong amount of rows was returned
        NoResults => (2000, "No results".to_string()),
        // Query errors - 3000 range. Something went wrong during the query
        QueryError => (3000, "Query Error".to_string()),
        InsertError => (3100, "Could not insert record".to_string()),
        UpdateError => (3200, "Could not update record".to_string()),
        DeleteError => (3300, "Could not delete record".to_string()),
        DuplicateKeyError => (3400, "Duplicate key error".to_string()),
        ConnectionError => (4000, "Connection error".to_string()),
        // Internal server error - 5000, similar to the HTTP 500 errors
        InternalError => (5000, "Internal error".to_string()),
        AccessError => (6000, "Access error".to_string()),
        // Logical/Business errors - 7000 and up. These represent operations
        // the current state of the database does not allow
        BusinessProcessError => (7000, "Business Process error".to_string()),
        ConcurrencyError => (7100, "Concurrency error".to_string()),
        ValidationError { errors: _ } => (7200, "Validation failed:".to_string()),
        ForeignKeyError => (
            7300,
            "Could not delete record because there are other entities referencing it".to_string(),
        ),
        ParseError => (7400, "Parse failed:".to_string()),
        AlreadyProcessedError => (7500, "Record has already been processed".to_string()),
        AlreadyUsedError => (7600, "Ticket has already been used".to_string()),
        TicketCancelledError => (7700, "Ticket has been cancelled".to_string()),
        TicketExpiredError => (7800, "Ticket has expired".to_string()),
        EventPassedError => (7900, "Event has already passed".to_string()),
        SoldOutError => (8000, "No tickets available".to_string()),
        CapacityExceededError => (8100, "Event capacity exceeded".to_string()),
        // Try not to use this error
        Unknown => (10, "Unknown database error".to_string()),
    }
}

#[derive(Debug, PartialEq)]
pub struct EnumParseError {
    pub message: String,
    pub enum_type: String,
    pub value: String,
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\nType: {}\nValue: {}", self.message, self.enum_type, self.value)
    }
}

impl Error for EnumParseError {}

#[derive(Debug, PartialEq)]
pub struct DatabaseError {
    pub code: i32,
    pub message: String,
    pub cause: Option<String>,
    pub error_code: ErrorCode,
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, "\nCaused by: {}", cause)?;
        }
        Ok(())
    }
}

impl Error for DatabaseError {}

impl Serialize for DatabaseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DatabaseError", 3)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("cause", &self.cause)?;
        state.end()
    }
}

impl DatabaseError {
    pub fn new(error_code: ErrorCode, cause: Option<&str>) -> DatabaseError {
        let (code, message) = get_error_message(&error_code);

        DatabaseError {
            code,
            message,
            cause: cause.map(|c| c.to_string()),
            error_code,
        }
    }

    /// Wraps the error from a QueryResult into a DatabaseError
    pub fn wrap<T>(error_code: ErrorCode, message: &str, res: Result<T, DieselError>) -> Result<T, DatabaseError> {
        match res {
            Ok(val) => Ok(val),
            Err(e) => match e {
                DieselError::NotFound => Err(DatabaseError::new(
                    ErrorCode::NoResults,
                    Some(&format!("{}, {}", message, e)),
                )),
                DieselError::DatabaseError(kind, _) => {
                    let current_backtrace = Backtrace::new();

                    jlog!(
                        Level::Debug,
                        &format!("PG error {}", message),
                        {
                            "error": e.to_string(),
                            "backtrace": format!("{:?}", current_backtrace)
                    });

                    match kind {
                        DatabaseErrorKind::UniqueViolation => Err(DatabaseError::new(
                            ErrorCode::DuplicateKeyError,
                            Some(&format!("{}, {}", message, e)),
                        )),
                        DatabaseErrorKind::ForeignKeyViolation => Err(DatabaseError::new(
                            ErrorCode::ForeignKeyError,
                            Some(&format!("{} {}", message, e)),
                        )),
                        _ => Err(DatabaseError::new(error_code, Some(&format!("{}, {}", message, e)))),
                    }
                }
                _ => Err(DatabaseError::new(error_code, Some(&format!("{}, {}", message, e)))),
            },
        }
    }

    pub fn business_process_error<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::BusinessProcessError, Some(message)))
    }

    pub fn validation_error<T>(field: &'static str, message: &'static str) -> Result<T, DatabaseError> {
        let mut v = ValidationErrors::new();
        v.add(field, create_validation_error(message, message));
        Err(DatabaseError::new(
            ErrorCode::ValidationError {
                errors: v.field_errors(),
            },
            None,
        ))
    }

    pub fn concurrency_error<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::ConcurrencyError, Some(message)))
    }

    pub fn no_results<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::NoResults, Some(message)))
    }

    pub fn forbidden<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::AccessError, Some(message)))
    }

    pub fn already_processed<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::AlreadyProcessedError, Some(message)))
    }

    pub fn already_used<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::AlreadyUsedError, Some(message)))
    }

    pub fn ticket_cancelled<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::TicketCancelledError, Some(message)))
    }

    pub fn ticket_expired<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::TicketExpiredError, Some(message)))
    }

    pub fn event_passed<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::EventPassedError, Some(message)))
    }

    pub fn sold_out<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::SoldOutError, Some(message)))
    }

    pub fn capacity_exceeded<T>(message: &str) -> Result<T, DatabaseError> {
        Err(DatabaseError::new(ErrorCode::CapacityExceededError, Some(message)))
    }
}

impl From<ConnectionError> for DatabaseError {
    fn from(e: ConnectionError) -> Self {
        DatabaseError::new(ErrorCode::ConnectionError, Some(&e.to_string()))
    }
}

impl From<DieselError> for DatabaseError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DatabaseError::new(ErrorCode::NoResults, Some(&e.to_string())),
            _ => DatabaseError::new(ErrorCode::QueryError, Some(&e.to_string())),
        }
    }
}

impl From<EnumParseError> for DatabaseError {
    fn from(e: EnumParseError) -> Self {
        DatabaseError::new(ErrorCode::ParseError, Some(&e.to_string()))
    }
}

impl From<jsonwebtoken::errors::Error> for DatabaseError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        DatabaseError::new(ErrorCode::InternalError, Some(&format!("Token error, {}", e)))
    }
}

impl From<ValidationErrors> for DatabaseError {
    fn from(e: ValidationErrors) -> Self {
        let message = e.to_string();
        DatabaseError {
            cause: Some(message),
            ..DatabaseError::new(
                ErrorCode::ValidationError {
                    errors: e.field_errors(),
                },
                None,
            )
        }
    }
}

pub trait ConvertToDatabaseError<U> {
    fn to_db_error(self, code: ErrorCode, message: &'static str) -> Result<U, DatabaseError>;
}

impl<U> ConvertToDatabaseError<U> for QueryResult<U> {
    fn to_db_error(self, code: ErrorCode, message: &'static str) -> Result<U, DatabaseError> {
        DatabaseError::wrap(code, message, self)
    }
}

pub trait Optional<U> {
    fn optional(self) -> Result<Option<U>, DatabaseError>;
}

impl<U> Optional<U> for Result<U, DatabaseError> {
    fn optional(self) -> Result<Option<U>, DatabaseError> {
        match self {
            Ok(u) => Ok(Some(u)),
            Err(e) => match e.code {
                2000 => Ok(None),
                _ => Err(e),
            },
        }
    }
}

#[test]
fn error_with_unknown_code() {
    let err = DatabaseError::new(ErrorCode::Unknown, None);
    assert_eq!(err.message, "Unknown database error");
    assert_eq!(err.code, 10);
    assert!(err.cause.is_none());
    assert_eq!(format!("{}", err), "[10] Unknown database error");
}

#[test]
fn error_with_known_code() {
    let err = DatabaseError::new(ErrorCode::SoldOutError, None);
    assert_eq!(err.message, "No tickets available");
    assert_eq!(err.code, 8000);
    assert!(err.cause.is_none());
    assert_eq!(format!("{}", err), "[8000] No tickets available");
}

#[test]
fn error_with_cause() {
    let cause = DatabaseError::new(ErrorCode::Unknown, None);
    let err = DatabaseError::new(ErrorCode::InvalidInput, Some(&cause.message));
    assert_eq!(err.message, "Invalid input");
    assert_eq!(err.code, 1000);
    assert!(err.cause.is_some());
    assert_eq!(
        format!("{}", err),
        "\
[1000] Invalid input
Caused by: Unknown database error"
    );
}

#[test]
fn optional_returns_none_for_no_results() {
    let res: Result<i32, DatabaseError> = DatabaseError::no_results("Nothing here");
    assert_eq!(res.optional(), Ok(None));

    let res: Result<i32, DatabaseError> = DatabaseError::forbidden("Not yours");
    assert!(res.optional().is_err());
}

#[test]
fn domain_error_codes() {
    assert_eq!(DatabaseError::already_processed::<()>("x").unwrap_err().code, 7500);
    assert_eq!(DatabaseError::already_used::<()>("x").unwrap_err().code, 7600);
    assert_eq!(DatabaseError::ticket_cancelled::<()>("x").unwrap_err().code, 7700);
    assert_eq!(DatabaseError::ticket_expired::<()>("x").unwrap_err().code, 7800);
    assert_eq!(DatabaseError::event_passed::<()>("x").unwrap_err().code, 7900);
    assert_eq!(DatabaseError::capacity_exceeded::<()>("x").unwrap_err().code, 8100);
}
