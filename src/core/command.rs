use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Conflict { message, .. } => { message }
            CommandError::Database { message, .. } => { message }
            CommandError::DuplicateKey { message } => { message }
            CommandError::NotFound { message } => { message }
            CommandError::Runtime { message, .. } => { message }
            CommandError::Serialization { message } => { message }
            CommandError::Validation { message, .. } => { message }
            CommandError::Other { message, .. } => { message }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
            LibraryError::InvalidPatronId { message } => {
                CommandError::Validation { message, reason_code: Some("InvalidPatronId".to_string()) }
            }
            LibraryError::BorrowLimitExceeded { message, .. } => {
                CommandError::Conflict { message, reason_code: Some("BorrowLimitExceeded".to_string()) }
            }
            LibraryError::BookNotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::BookUnavailable { message } => {
                CommandError::Conflict { message, reason_code: Some("BookUnavailable".to_string()) }
            }
            LibraryError::AlreadyBorrowed { message } => {
                CommandError::Conflict { message, reason_code: Some("AlreadyBorrowed".to_string()) }
            }
            LibraryError::NoActiveBorrowRecord { message } => {
                CommandError::Conflict { message, reason_code: Some("NoActiveBorrowRecord".to_string()) }
            }
            LibraryError::StoreTimeout { message, operation } => {
                CommandError::Runtime { message, reason_code: Some(operation), retryable: true }
            }
            LibraryError::StoreInconsistency { message } => {
                CommandError::Other { message, reason_code: Some("StoreInconsistency".to_string()) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Conflict { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Other { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_map_engine_errors() {
        assert!(matches!(CommandError::from(LibraryError::invalid_patron_id()), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::borrow_limit_exceeded(5)), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::book_not_found("1")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::store_timeout("get_book", 5)), CommandError::Runtime { retryable: true, .. }));
        let err = CommandError::from(LibraryError::no_active_borrow_record());
        assert_eq!("No active borrow record found for this book.", err.message());
    }
}
