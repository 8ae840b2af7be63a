use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{check_delta, duplicate_isbn, out_of_bounds, InventoryStore};
use crate::core::library::{LibraryError, LibraryResult};

// Books keyed by id. The lock is shared with the memory circulation store, which takes it
// before the ledger lock.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    pub(crate) books: RwLock<HashMap<String, BookEntity>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn create_book(&self, book: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("book {} already exists", book.book_id).as_str()));
        }
        if books.values().any(|b| b.isbn == book.isbn) {
            return Err(duplicate_isbn());
        }
        books.insert(book.book_id.to_string(), book.clone());
        Ok(1)
    }

    async fn get_book(&self, book_id: &str) -> LibraryResult<Option<BookEntity>> {
        Ok(self.books.read().await.get(book_id).cloned())
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        Ok(self.books.read().await.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn adjust_availability(&self, book_id: &str, delta: i64) -> LibraryResult<BookEntity> {
        check_delta(delta)?;
        let mut books = self.books.write().await;
        let book = books.get_mut(book_id).ok_or_else(|| LibraryError::book_not_found(book_id))?;
        let next = book.adjusted(delta).ok_or_else(|| out_of_bounds(book, delta))?;
        book.available_copies = next;
        book.version += 1;
        book.updated_at = Utc::now().naive_utc();
        Ok(book.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::InventoryStore;
    use crate::books::repository::memory_inventory_store::MemoryInventoryStore;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_get_book() {
        let store = MemoryInventoryStore::new();
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 2);
        assert_eq!(1, store.create_book(&book).await.expect("should create book"));
        assert!(matches!(store.create_book(&book).await, Err(LibraryError::DuplicateKey { .. })));
        let same_isbn = BookEntity::new("9780441172719", "Dune Messiah", "Frank Herbert", 1);
        let err = store.create_book(&same_isbn).await.expect_err("isbn is taken");
        assert_eq!("A book with this ISBN already exists.", err.message());
        assert_eq!(None, store.get_book(same_isbn.book_id.as_str()).await.expect("should get"));
        let loaded = store.get_book(book.book_id.as_str()).await.expect("should get").expect("should exist");
        assert_eq!(book, loaded);
        let by_isbn = store.get_book_by_isbn("9780441172719").await.expect("should get").expect("should exist");
        assert_eq!(book.book_id, by_isbn.book_id);
        assert_eq!(None, store.get_book("missing").await.expect("should get"));
    }

    #[tokio::test]
    async fn test_should_keep_availability_in_bounds() {
        let store = MemoryInventoryStore::new();
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 1);
        store.create_book(&book).await.expect("should create book");
        let id = book.book_id.as_str();

        assert!(matches!(store.adjust_availability(id, 1).await, Err(LibraryError::StoreInconsistency { .. })));
        let updated = store.adjust_availability(id, -1).await.expect("should decrement");
        assert_eq!(0, updated.available_copies);
        assert_eq!(1, updated.version);
        assert!(matches!(store.adjust_availability(id, -1).await, Err(LibraryError::BookUnavailable { .. })));
        assert!(matches!(store.adjust_availability(id, 2).await, Err(LibraryError::Validation { .. })));
        assert!(matches!(store.adjust_availability("missing", -1).await, Err(LibraryError::BookNotFound { .. })));
        let restored = store.adjust_availability(id, 1).await.expect("should increment");
        assert_eq!(1, restored.available_copies);
    }
}
