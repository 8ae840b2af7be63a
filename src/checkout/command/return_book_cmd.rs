use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::ReturnReceipt;
use crate::core::command::{Command, CommandError};
use crate::core::library::Outcome;

pub struct ReturnBookCommand {
    checkout_service: Arc<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub fn new(checkout_service: Arc<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    patron_id: String,
    book_id: String,
}

impl ReturnBookCommandRequest {
    pub fn new(patron_id: &str, book_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub receipt: ReturnReceipt,
}

impl ReturnBookCommandResponse {
    pub fn new(receipt: ReturnReceipt) -> Self {
        Self {
            outcome: Outcome::of(&Ok(receipt.clone())),
            receipt,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.checkout_service.returned(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::InventoryStore;
    use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::checkout::factory::{create_checkout_service, create_circulation_stores};
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let stores = create_circulation_stores(RepositoryStore::InMemory).await;
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 1);
        stores.inventory.create_book(&book).await.expect("should add book");
        let svc = create_checkout_service(&Configuration::new("test"), &stores);

        let err = ReturnBookCommand::new(svc.clone())
            .execute(ReturnBookCommandRequest::new("123456", book.book_id.as_str())).await;
        assert!(matches!(err, Err(CommandError::Conflict { .. })));

        BorrowBookCommand::new(svc.clone())
            .execute(BorrowBookCommandRequest::new("123456", book.book_id.as_str())).await.expect("should borrow");
        let res = ReturnBookCommand::new(svc)
            .execute(ReturnBookCommandRequest::new("123456", book.book_id.as_str())).await.expect("should return");
        assert!(res.outcome.ok);
        assert_eq!("Book returned successfully.", res.outcome.message);
    }
}
