use std::future::Future;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

// bounded runs a store operation and turns an expired deadline into StoreTimeout.
pub async fn bounded<T, F>(timeout: Duration, operation: &str, fut: F) -> LibraryResult<T>
    where F: Future<Output=LibraryResult<T>> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(operation, timeout_millis = timeout.as_millis() as u64, "store operation timed out");
            Err(LibraryError::store_timeout(operation, timeout.as_millis() as u64))
        }
    }
}
