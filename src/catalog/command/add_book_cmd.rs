use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::Outcome;

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str, total_copies: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub book: BookDto,
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let res = self.catalog_service.add_book(
            req.title.as_str(), req.author.as_str(), req.isbn.as_str(), req.total_copies).await;
        let outcome = Outcome::of(&res);
        res.map_err(CommandError::from).map(|receipt| AddBookCommandResponse { outcome, book: receipt.book })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::repository::memory_inventory_store::MemoryInventoryStore;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_add_book() {
        let svc = create_catalog_service(&Configuration::new("test"), Arc::new(MemoryInventoryStore::new()));
        let cmd = AddBookCommand::new(svc);
        let res = cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert", "9780441172719", 2))
            .await.expect("should add book");
        assert!(res.outcome.ok);
        assert_eq!("Dune", res.book.title.as_str());

        let dup = cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert", "9780441172719", 2)).await;
        assert!(matches!(dup, Err(CommandError::DuplicateKey { .. })));
        let bad = cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert", "978", 2)).await;
        assert!(matches!(bad, Err(CommandError::Validation { .. })));
    }
}
