use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::BorrowReceipt;
use crate::core::command::{Command, CommandError};
use crate::core::library::Outcome;

pub struct BorrowBookCommand {
    checkout_service: Arc<dyn CheckoutService>,
}

impl BorrowBookCommand {
    pub fn new(checkout_service: Arc<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BorrowBookCommandRequest {
    patron_id: String,
    book_id: String,
}

impl BorrowBookCommandRequest {
    pub fn new(patron_id: &str, book_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BorrowBookCommandResponse {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub receipt: BorrowReceipt,
}

impl BorrowBookCommandResponse {
    pub fn new(receipt: BorrowReceipt) -> Self {
        Self {
            outcome: Outcome::of(&Ok(receipt.clone())),
            receipt,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.checkout_service.borrow(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(BorrowBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::InventoryStore;
    use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::checkout::factory::{create_checkout_service, create_circulation_stores};
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_borrow_book() {
        let stores = create_circulation_stores(RepositoryStore::InMemory).await;
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 1);
        stores.inventory.create_book(&book).await.expect("should add book");
        let svc = create_checkout_service(&Configuration::new("test"), &stores);
        let cmd = BorrowBookCommand::new(svc);

        let res = cmd.execute(BorrowBookCommandRequest::new("123456", book.book_id.as_str()))
            .await.expect("should borrow book");
        assert!(res.outcome.ok);
        assert_eq!(book.book_id, res.receipt.record.book_id);

        let err = cmd.execute(BorrowBookCommandRequest::new("654321", book.book_id.as_str())).await;
        assert!(matches!(err, Err(CommandError::Conflict { .. })));
    }
}
