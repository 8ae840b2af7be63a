use std::sync::Arc;
use axum::http::StatusCode;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory::{create_checkout_service, create_circulation_stores};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::fees::LateFeeService;
use crate::fees::factory::create_late_fee_service;
use crate::patrons::domain::PatronStatusService;
use crate::patrons::factory::create_patron_status_service;

// AppState is built once per process so that every request shares the same stores and key locks.
#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: RepositoryStore,
    pub catalog: Arc<dyn CatalogService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub patrons: Arc<dyn PatronStatusService>,
    pub fees: Arc<dyn LateFeeService>,
}

impl AppState {
    pub async fn build(config: Configuration, store: RepositoryStore) -> AppState {
        let stores = create_circulation_stores(store).await;
        AppState {
            catalog: create_catalog_service(&config, stores.inventory.clone()),
            checkout: create_checkout_service(&config, &stores),
            patrons: create_patron_status_service(&config, stores.ledger.clone()),
            fees: create_late_fee_service(&config, stores.ledger.clone()),
            config,
            store,
        }
    }
}

pub type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Conflict { .. } => { StatusCode::CONFLICT }
            CommandError::Database { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::DuplicateKey { .. } => { StatusCode::CONFLICT }
            CommandError::NotFound { .. } => { StatusCode::NOT_FOUND }
            CommandError::Runtime { retryable: true, .. } => { StatusCode::SERVICE_UNAVAILABLE }
            CommandError::Runtime { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::Serialization { .. } => { StatusCode::BAD_REQUEST }
            CommandError::Validation { .. } => { StatusCode::BAD_REQUEST }
            CommandError::Other { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
        };
        (status, err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::catalog::domain::CatalogService;
    use crate::checkout::domain::CheckoutService;
    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, ServerError};
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;
    use crate::fees::LateFeeService;
    use crate::patrons::domain::PatronStatusService;

    #[tokio::test]
    async fn test_should_share_services_across_state_clones() {
        let state = AppState::build(Configuration::new("test"), RepositoryStore::InMemory).await;
        let added = state.catalog.add_book("Dune", "Frank Herbert", "9780441172719", 1)
            .await.expect("should add book");
        let copy = state.clone();
        copy.checkout.borrow("123456", added.book.book_id.as_str()).await.expect("should borrow");

        let report = state.patrons.status("123456").await.expect("should report");
        assert_eq!(1, report.open_loans.len());
        let book = state.catalog.find_book_by_id(added.book.book_id.as_str()).await.expect("should find");
        assert_eq!(0, book.available_copies);
        let fee = state.fees.compute_fee("123456", added.book.book_id.as_str()).await.expect("should compute");
        assert!(!fee.is_due());
    }

    #[tokio::test]
    async fn test_should_map_command_error_to_status() {
        let (status, message) = ServerError::from(CommandError::from(LibraryError::borrow_limit_exceeded(5)));
        assert_eq!(StatusCode::CONFLICT, status);
        assert!(message.contains("limit"));
        let (status, _) = ServerError::from(CommandError::from(LibraryError::book_not_found("9")));
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, _) = ServerError::from(CommandError::from(LibraryError::store_timeout("get_book", 5)));
        assert_eq!(StatusCode::SERVICE_UNAVAILABLE, status);
    }
}
