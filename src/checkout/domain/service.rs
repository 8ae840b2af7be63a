use std::sync::Arc;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use crate::books::repository::InventoryStore;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::checkout::dto::{BorrowReceipt, ReturnReceipt};
use crate::checkout::repository::{BorrowLedger, CirculationStore};
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::locks::KeyedLocks;
use crate::core::repository::bounded;
use crate::fees::calculator::LateFeeCalculator;
use crate::utils::validation::validate_patron_id;

// The reads ahead of each transaction pick the error a request gets; the circulation store
// re-checks every rule when it commits. Key locks only keep requests of one process from racing
// each other into the store.
pub struct CheckoutServiceImpl {
    branch_id: String,
    max_borrowed_books: usize,
    book_loan_days: i64,
    store_timeout: std::time::Duration,
    inventory: Arc<dyn InventoryStore>,
    ledger: Arc<dyn BorrowLedger>,
    circulation: Arc<dyn CirculationStore>,
    patron_locks: KeyedLocks,
    book_locks: KeyedLocks,
    fees: LateFeeCalculator,
}

impl CheckoutServiceImpl {
    pub fn new(config: &Configuration, inventory: Arc<dyn InventoryStore>,
               ledger: Arc<dyn BorrowLedger>, circulation: Arc<dyn CirculationStore>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_borrowed_books: config.max_borrowed_books,
            book_loan_days: config.book_loan_days,
            store_timeout: config.store_timeout(),
            inventory,
            ledger,
            circulation,
            patron_locks: KeyedLocks::new("patron"),
            book_locks: KeyedLocks::new("book"),
            fees: LateFeeCalculator::new(config.fees.clone()),
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn borrow(&self, patron_id: &str, book_id: &str) -> LibraryResult<BorrowReceipt> {
        validate_patron_id(patron_id)?;
        let _patron_guard = self.patron_locks.acquire(patron_id, self.store_timeout).await?;
        let _book_guard = self.book_locks.acquire(book_id, self.store_timeout).await?;

        let open = bounded(self.store_timeout, "count_open", self.ledger.count_open(patron_id)).await?;
        if open >= self.max_borrowed_books {
            return Err(LibraryError::borrow_limit_exceeded(self.max_borrowed_books));
        }
        let book = bounded(self.store_timeout, "get_book", self.inventory.get_book(book_id)).await?
            .ok_or_else(|| LibraryError::book_not_found(book_id))?;
        if book.available_copies <= 0 {
            return Err(LibraryError::book_unavailable(book.title.as_str()));
        }
        if bounded(self.store_timeout, "find_open", self.ledger.find_open(patron_id, book_id)).await?.is_some() {
            return Err(LibraryError::already_borrowed(book.title.as_str()));
        }

        let borrow_at = Utc::now().naive_utc();
        let record = BorrowRecordEntity::new(patron_id, book_id, borrow_at, borrow_at + Duration::days(self.book_loan_days));
        bounded(self.store_timeout, "check_out",
                self.circulation.check_out(&record, self.max_borrowed_books)).await?;
        tracing::info!(branch = self.branch_id.as_str(), patron_id, book_id,
            borrow_id = record.borrow_id.as_str(), "book borrowed");
        Ok(BorrowReceipt::new(&record, book.title.as_str()))
    }

    async fn returned(&self, patron_id: &str, book_id: &str) -> LibraryResult<ReturnReceipt> {
        validate_patron_id(patron_id)?;
        let _patron_guard = self.patron_locks.acquire(patron_id, self.store_timeout).await?;
        let _book_guard = self.book_locks.acquire(book_id, self.store_timeout).await?;

        let book = bounded(self.store_timeout, "get_book", self.inventory.get_book(book_id)).await?
            .ok_or_else(|| LibraryError::book_not_found(book_id))?;
        let returned_at = Utc::now().naive_utc();
        let returned = bounded(self.store_timeout, "check_in",
                               self.circulation.check_in(patron_id, book_id, returned_at)).await?;
        let record = returned.record;
        if !returned.restocked {
            tracing::error!(branch = self.branch_id.as_str(), book_id, borrow_id = record.borrow_id.as_str(),
                total_copies = book.total_copies, "returned copy exceeds total copies");
            return Err(LibraryError::store_inconsistency(
                format!("book {} already had all {} copies available when borrow {} was returned",
                        book_id, book.total_copies, record.borrow_id).as_str()));
        }

        let late_fee = self.fees.compute(record.due_at, returned_at);
        tracing::info!(branch = self.branch_id.as_str(), patron_id, book_id, borrow_id = record.borrow_id.as_str(),
            days_overdue = late_fee.days_overdue, fee_cents = late_fee.fee_cents, "book returned");
        Ok(ReturnReceipt::new(&record, book.title.as_str(), late_fee))
    }
}
