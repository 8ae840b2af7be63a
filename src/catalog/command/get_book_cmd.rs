use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// looks a book up by id, or by ISBN when isbn is set
#[derive(Debug, Deserialize)]
pub struct GetBookCommandRequest {
    pub book_id: Option<String>,
    pub isbn: Option<String>,
}

impl GetBookCommandRequest {
    pub fn by_id(book_id: &str) -> Self {
        Self { book_id: Some(book_id.to_string()), isbn: None }
    }

    pub fn by_isbn(isbn: &str) -> Self {
        Self { book_id: None, isbn: Some(isbn.to_string()) }
    }
}

#[derive(Debug, Serialize)]
pub struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        let res = match (req.isbn, req.book_id) {
            (Some(isbn), _) => self.catalog_service.find_book_by_isbn(isbn.as_str()).await,
            (None, Some(book_id)) => self.catalog_service.find_book_by_id(book_id.as_str()).await,
            (None, None) => return Err(CommandError::Validation {
                message: "book_id or isbn is required".to_string(),
                reason_code: None,
            }),
        };
        res.map_err(CommandError::from).map(GetBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::repository::memory_inventory_store::MemoryInventoryStore;
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_get_book() {
        let svc = create_catalog_service(&Configuration::new("test"), Arc::new(MemoryInventoryStore::new()));
        let added = svc.add_book("Dune", "Frank Herbert", "9780441172719", 1).await.expect("should add book");
        let cmd = GetBookCommand::new(svc);

        let res = cmd.execute(GetBookCommandRequest::by_id(added.book.book_id.as_str())).await.expect("should get book");
        assert_eq!(added.book.book_id, res.book.book_id);
        let res = cmd.execute(GetBookCommandRequest::by_isbn("9780441172719")).await.expect("should get book");
        assert_eq!(added.book.book_id, res.book.book_id);
        let missing = cmd.execute(GetBookCommandRequest::by_id("missing")).await;
        assert!(matches!(missing, Err(CommandError::NotFound { .. })));
    }
}
