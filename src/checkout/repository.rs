pub mod ddb_borrow_ledger;
pub mod ddb_circulation_store;
pub mod memory_borrow_ledger;
pub mod memory_circulation_store;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::core::library::LibraryResult;

// BorrowLedger owns borrow records. Records are inserted open, closed once and never deleted.
#[async_trait]
pub trait BorrowLedger: Sync + Send {
    // inserts an open record, DuplicateKey when the patron already holds an open loan of the book
    async fn insert_borrow(&self, patron_id: &str, book_id: &str,
                           borrow_at: NaiveDateTime, due_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity>;

    // closes the open record for (patron, book) only while it is still open,
    // NoActiveBorrowRecord when there is none
    async fn close_borrow(&self, patron_id: &str, book_id: &str,
                          returned_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity>;

    async fn count_open(&self, patron_id: &str) -> LibraryResult<usize>;

    // every record of the patron, oldest borrow first
    async fn list_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>>;

    async fn find_open(&self, patron_id: &str, book_id: &str) -> LibraryResult<Option<BorrowRecordEntity>>;
}

// ReturnedLoan is a committed return. restocked is false when every copy was already on the
// shelf; the record is closed either way.
#[derive(Debug, PartialEq, Clone)]
pub struct ReturnedLoan {
    pub record: BorrowRecordEntity,
    pub restocked: bool,
}

// CirculationStore commits a whole borrow or return in one store transaction over the book row
// and the ledger. Every rule is re-checked inside the transaction, so it holds for any number of
// engines sharing the store, and a caller that gave up waiting finds either all of it or none.
#[async_trait]
pub trait CirculationStore: Sync + Send {
    // takes a copy of record.book_id and inserts record as open. Fails in precondition order
    // with BorrowLimitExceeded, BookNotFound, BookUnavailable, then AlreadyBorrowed.
    async fn check_out(&self, record: &BorrowRecordEntity, max_open: usize) -> LibraryResult<()>;

    // closes the open record for (patron, book) and puts its copy back, NoActiveBorrowRecord
    // when none is open and BookNotFound for a missing book
    async fn check_in(&self, patron_id: &str, book_id: &str, returned_at: NaiveDateTime) -> LibraryResult<ReturnedLoan>;
}
