use std::sync::Arc;
use crate::books::repository::InventoryStore;
use crate::books::repository::ddb_inventory_store::DDBInventoryStore;
use crate::books::repository::memory_inventory_store::MemoryInventoryStore;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::checkout::repository::{BorrowLedger, CirculationStore};
use crate::checkout::repository::ddb_borrow_ledger::DDBBorrowLedger;
use crate::checkout::repository::ddb_circulation_store::DDBCirculationStore;
use crate::checkout::repository::memory_borrow_ledger::MemoryBorrowLedger;
use crate::checkout::repository::memory_circulation_store::MemoryCirculationStore;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

// The three views share one backing store: the circulation store writes what the other two read.
#[derive(Clone)]
pub struct CirculationStores {
    pub inventory: Arc<dyn InventoryStore>,
    pub ledger: Arc<dyn BorrowLedger>,
    pub circulation: Arc<dyn CirculationStore>,
}

pub async fn create_circulation_stores(store: RepositoryStore) -> CirculationStores {
    match store {
        RepositoryStore::DynamoDB | RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            if store == RepositoryStore::LocalDynamoDB {
                let _ = create_table(&client, "books", "book_id", "isbn", "title").await;
                let _ = create_table(&client, "borrows", "borrow_id", "patron_id", "borrow_at").await;
            }
            let ledger = DDBBorrowLedger::new(client.clone(), "borrows", "borrows_ndx");
            let circulation = DDBCirculationStore::new(DDBInventoryStore::new(client.clone(), "books"), ledger.clone());
            CirculationStores {
                inventory: Arc::new(DDBInventoryStore::new(client, "books")),
                ledger: Arc::new(ledger),
                circulation: Arc::new(circulation),
            }
        }
        RepositoryStore::InMemory => {
            let inventory = Arc::new(MemoryInventoryStore::new());
            let ledger = Arc::new(MemoryBorrowLedger::new());
            let circulation = Arc::new(MemoryCirculationStore::new(inventory.clone(), ledger.clone()));
            CirculationStores { inventory, ledger, circulation }
        }
    }
}

pub fn create_checkout_service(config: &Configuration, stores: &CirculationStores) -> Arc<dyn CheckoutService> {
    Arc::new(CheckoutServiceImpl::new(
        config, stores.inventory.clone(), stores.ledger.clone(), stores.circulation.clone()))
}
