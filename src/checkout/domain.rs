use async_trait::async_trait;
use crate::checkout::dto::{BorrowReceipt, ReturnReceipt};
use crate::core::library::LibraryResult;

pub mod model;
pub mod service;

// CheckoutService moves copies between the shelf and patrons. Each call either commits both the
// inventory and the ledger side or leaves both untouched.
#[async_trait]
pub trait CheckoutService: Sync + Send {
    async fn borrow(&self, patron_id: &str, book_id: &str) -> LibraryResult<BorrowReceipt>;
    async fn returned(&self, patron_id: &str, book_id: &str) -> LibraryResult<ReturnReceipt>;
}
