use std::sync::Arc;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::InventoryStore;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::CatalogReceipt;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::bounded;
use crate::utils::validation::{validate_author, validate_isbn, validate_title, validate_total_copies};

pub struct CatalogServiceImpl {
    inventory: Arc<dyn InventoryStore>,
    store_timeout: std::time::Duration,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, inventory: Arc<dyn InventoryStore>) -> Self {
        Self {
            inventory,
            store_timeout: config.store_timeout(),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, title: &str, author: &str, isbn: &str, total_copies: i64) -> LibraryResult<CatalogReceipt> {
        let title = validate_title(title)?;
        let author = validate_author(author)?;
        validate_isbn(isbn)?;
        validate_total_copies(total_copies)?;

        // the store claims the ISBN with the book, so a duplicate fails there
        let book = BookEntity::new(isbn, title.as_str(), author.as_str(), total_copies);
        bounded(self.store_timeout, "create_book", self.inventory.create_book(&book)).await?;
        tracing::info!(book_id = book.book_id.as_str(), isbn, total_copies, "book added to catalog");
        Ok(CatalogReceipt { book: BookDto::from(&book) })
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        bounded(self.store_timeout, "get_book", self.inventory.get_book(id)).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::book_not_found(id))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        validate_isbn(isbn)?;
        bounded(self.store_timeout, "get_book_by_isbn", self.inventory.get_book_by_isbn(isbn)).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::book_not_found(format!("with ISBN {}", isbn).as_str()))
    }
}
