use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // This is a retry-able error, which indicates that the store throttled or rejected the request
    // for a transient reason. The caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    InvalidPatronId {
        message: String,
    },
    BorrowLimitExceeded {
        message: String,
        limit: usize,
    },
    BookNotFound {
        message: String,
    },
    BookUnavailable {
        message: String,
    },
    AlreadyBorrowed {
        message: String,
    },
    NoActiveBorrowRecord {
        message: String,
    },
    // The store did not answer within the configured bound; the operation landed whole or not at all.
    StoreTimeout {
        message: String,
        operation: String,
    },
    // The store holds data that breaks an invariant, e.g. availability already at total on return.
    StoreInconsistency {
        message: String,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn invalid_patron_id() -> LibraryError {
        LibraryError::InvalidPatronId {
            message: "Invalid patron ID. Must be exactly 6 digits.".to_string(),
        }
    }

    pub fn borrow_limit_exceeded(limit: usize) -> LibraryError {
        LibraryError::BorrowLimitExceeded {
            message: format!("You have reached the maximum borrowing limit of {} books.", limit),
            limit,
        }
    }

    pub fn book_not_found(book_id: &str) -> LibraryError {
        LibraryError::BookNotFound { message: format!("Book {} not found.", book_id) }
    }

    pub fn book_unavailable(title: &str) -> LibraryError {
        LibraryError::BookUnavailable {
            message: format!("\"{}\" is currently not available.", title),
        }
    }

    pub fn already_borrowed(title: &str) -> LibraryError {
        LibraryError::AlreadyBorrowed {
            message: format!("You have already borrowed \"{}\" and not returned it yet.", title),
        }
    }

    pub fn no_active_borrow_record() -> LibraryError {
        LibraryError::NoActiveBorrowRecord {
            message: "No active borrow record found for this book.".to_string(),
        }
    }

    pub fn store_timeout(operation: &str, millis: u64) -> LibraryError {
        LibraryError::StoreTimeout {
            message: format!("Store operation {} timed out after {}ms.", operation, millis),
            operation: operation.to_string(),
        }
    }

    pub fn store_inconsistency(message: &str) -> LibraryError {
        LibraryError::StoreInconsistency { message: message.to_string() }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Database { message, .. } => { message }
            LibraryError::CurrentlyUnavailable { message, .. } => { message }
            LibraryError::DuplicateKey { message } => { message }
            LibraryError::Validation { message, .. } => { message }
            LibraryError::Serialization { message } => { message }
            LibraryError::Runtime { message, .. } => { message }
            LibraryError::InvalidPatronId { message } => { message }
            LibraryError::BorrowLimitExceeded { message, .. } => { message }
            LibraryError::BookNotFound { message } => { message }
            LibraryError::BookUnavailable { message } => { message }
            LibraryError::AlreadyBorrowed { message } => { message }
            LibraryError::NoActiveBorrowRecord { message } => { message }
            LibraryError::StoreTimeout { message, .. } => { message }
            LibraryError::StoreInconsistency { message } => { message }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            other => {
                write!(f, "{}", other.message())
            }
        }
    }
}

/// A specialized Result type for the circulation engines and their stores.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Outcome is the `(ok, message)` pair handed to presentation layers.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn of<T: Display>(res: &LibraryResult<T>) -> Self {
        match res {
            Ok(val) => Outcome { ok: true, message: val.to_string() },
            Err(err) => Outcome { ok: false, message: err.message().to_string() },
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum BorrowStatus {
    Open,
    Returned,
}

impl From<String> for BorrowStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Open" => BorrowStatus::Open,
            "Returned" => BorrowStatus::Returned,
            _ => BorrowStatus::Open,
        }
    }
}

impl Display for BorrowStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BorrowStatus::Open => write!(f, "Open"),
            BorrowStatus::Returned => write!(f, "Returned"),
        }
    }
}
