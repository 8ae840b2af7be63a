pub mod ddb_inventory_store;
pub mod memory_inventory_store;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryError, LibraryResult};

// InventoryStore owns book rows. Every call is atomic on its own; adjust_availability is the only
// way copies move and it refuses any delta that would leave 0 <= available <= total.
#[async_trait]
pub trait InventoryStore: Sync + Send {
    // create a book, failing with DuplicateKey when the id or the ISBN is taken
    async fn create_book(&self, book: &BookEntity) -> LibraryResult<usize>;

    async fn get_book(&self, book_id: &str) -> LibraryResult<Option<BookEntity>>;

    async fn get_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;

    // delta is -1 or +1; a decrement at zero fails with BookUnavailable, an increment at total
    // fails with StoreInconsistency and a missing book with BookNotFound
    async fn adjust_availability(&self, book_id: &str, delta: i64) -> LibraryResult<BookEntity>;
}

pub(crate) fn check_delta(delta: i64) -> LibraryResult<()> {
    if delta == 1 || delta == -1 {
        Ok(())
    } else {
        Err(LibraryError::validation(
            format!("availability can only move by one copy, got {}", delta).as_str(), None))
    }
}

pub(crate) fn duplicate_isbn() -> LibraryError {
    LibraryError::duplicate_key("A book with this ISBN already exists.")
}

pub(crate) fn out_of_bounds(book: &BookEntity, delta: i64) -> LibraryError {
    if delta < 0 {
        LibraryError::book_unavailable(book.title.as_str())
    } else {
        LibraryError::store_inconsistency(
            format!("book {} already has all {} copies available", book.book_id, book.total_copies).as_str())
    }
}
