use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use crate::books::repository::memory_inventory_store::MemoryInventoryStore;
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::checkout::repository::{CirculationStore, ReturnedLoan};
use crate::checkout::repository::memory_borrow_ledger::{close_open, open_count, push_open, MemoryBorrowLedger};
use crate::core::library::{LibraryError, LibraryResult};

// Holds the inventory lock and then the ledger lock for the whole transaction, and applies
// nothing until every check passed, so readers of either store see all of a borrow or none.
#[derive(Debug)]
pub struct MemoryCirculationStore {
    inventory: Arc<MemoryInventoryStore>,
    ledger: Arc<MemoryBorrowLedger>,
}

impl MemoryCirculationStore {
    pub fn new(inventory: Arc<MemoryInventoryStore>, ledger: Arc<MemoryBorrowLedger>) -> Self {
        Self { inventory, ledger }
    }
}

#[async_trait]
impl CirculationStore for MemoryCirculationStore {
    async fn check_out(&self, record: &BorrowRecordEntity, max_open: usize) -> LibraryResult<()> {
        let mut books = self.inventory.books.write().await;
        let mut records = self.ledger.records.write().await;

        if open_count(&records, record.patron_id.as_str()) >= max_open {
            return Err(LibraryError::borrow_limit_exceeded(max_open));
        }
        let book = books.get_mut(record.book_id.as_str())
            .ok_or_else(|| LibraryError::book_not_found(record.book_id.as_str()))?;
        let available = book.adjusted(-1)
            .ok_or_else(|| LibraryError::book_unavailable(book.title.as_str()))?;
        push_open(&mut records, record).map_err(|err| match err {
            LibraryError::DuplicateKey { .. } => LibraryError::already_borrowed(book.title.as_str()),
            other => other,
        })?;
        book.available_copies = available;
        book.version += 1;
        book.updated_at = Utc::now().naive_utc();
        Ok(())
    }

    async fn check_in(&self, patron_id: &str, book_id: &str, returned_at: NaiveDateTime) -> LibraryResult<ReturnedLoan> {
        let mut books = self.inventory.books.write().await;
        let mut records = self.ledger.records.write().await;

        let book = books.get_mut(book_id).ok_or_else(|| LibraryError::book_not_found(book_id))?;
        let record = close_open(&mut records, patron_id, book_id, returned_at)?;
        let restocked = match book.adjusted(1) {
            Some(available) => {
                book.available_copies = available;
                book.version += 1;
                book.updated_at = Utc::now().naive_utc();
                true
            }
            None => false,
        };
        Ok(ReturnedLoan { record, restocked })
    }
}
