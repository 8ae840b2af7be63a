use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::books::repository::InventoryStore;
use crate::books::repository::ddb_inventory_store::DDBInventoryStore;
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::checkout::repository::{BorrowLedger, CirculationStore, ReturnedLoan};
use crate::checkout::repository::ddb_borrow_ledger::DDBBorrowLedger;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::ddb::transact_write;

const CHECK_IN_ATTEMPTS: usize = 3;

// Each borrow and return is a single TransactWriteItems call over the books and borrows tables.
// Items are listed in precondition order so the first failed condition names the error.
#[derive(Debug)]
pub struct DDBCirculationStore {
    inventory: DDBInventoryStore,
    ledger: DDBBorrowLedger,
}

impl DDBCirculationStore {
    pub fn new(inventory: DDBInventoryStore, ledger: DDBBorrowLedger) -> Self {
        Self { inventory, ledger }
    }

    async fn refused_book(&self, book_id: &str, refusal: fn(&str) -> LibraryError) -> LibraryError {
        match self.inventory.get_book(book_id).await {
            Ok(Some(book)) => refusal(book.title.as_str()),
            Ok(None) => LibraryError::book_not_found(book_id),
            Err(err) => err,
        }
    }
}

#[async_trait]
impl CirculationStore for DDBCirculationStore {
    async fn check_out(&self, record: &BorrowRecordEntity, max_open: usize) -> LibraryResult<()> {
        let book_id = record.book_id.as_str();
        let items = vec![
            self.ledger.count_loan_item(record.patron_id.as_str(), Some(max_open)),
            self.inventory.availability_item(book_id, -1),
            self.ledger.mark_open_item(record),
            self.ledger.put_record_item(record)?,
        ];
        match transact_write(self.ledger.client(), items).await? {
            None => Ok(()),
            Some(0) => Err(LibraryError::borrow_limit_exceeded(max_open)),
            Some(1) => Err(self.refused_book(book_id, LibraryError::book_unavailable).await),
            Some(2) => Err(self.refused_book(book_id, LibraryError::already_borrowed).await),
            Some(_) => Err(LibraryError::duplicate_key(format!("borrow record {} already exists", record.borrow_id).as_str())),
        }
    }

    async fn check_in(&self, patron_id: &str, book_id: &str, returned_at: NaiveDateTime) -> LibraryResult<ReturnedLoan> {
        for _ in 0..CHECK_IN_ATTEMPTS {
            let book = self.inventory.get_book(book_id).await?
                .ok_or_else(|| LibraryError::book_not_found(book_id))?;
            let mut record = self.ledger.find_open(patron_id, book_id).await?
                .ok_or_else(LibraryError::no_active_borrow_record)?;
            let restocked = book.available_copies < book.total_copies;
            let shelf = if restocked {
                self.inventory.availability_item(book_id, 1)
            } else {
                self.inventory.full_shelf_item(book_id)
            };
            let items = vec![
                self.ledger.close_record_item(&record, returned_at),
                self.ledger.unmark_open_item(&record),
                self.ledger.release_loan_item(patron_id),
                shelf,
            ];
            match transact_write(self.ledger.client(), items).await? {
                None => {
                    record.close(returned_at);
                    return Ok(ReturnedLoan { record, restocked });
                }
                Some(3) => {
                    tracing::warn!(patron_id, book_id, "availability moved during return, retrying");
                }
                Some(_) => return Err(LibraryError::no_active_borrow_record()),
            }
        }
        Err(LibraryError::unavailable(
            format!("availability of book {} kept changing during return", book_id).as_str(), None, true))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::InventoryStore;
    use crate::books::repository::ddb_inventory_store::DDBInventoryStore;
    use crate::checkout::domain::model::BorrowRecordEntity;
    use crate::checkout::repository::{BorrowLedger, CirculationStore};
    use crate::checkout::repository::ddb_borrow_ledger::DDBBorrowLedger;
    use crate::checkout::repository::ddb_circulation_store::DDBCirculationStore;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "circ_books").await;
                let _ = delete_table(&client, "circ_borrows").await;
                let _ = create_table(&client, "circ_books", "book_id", "isbn", "title").await;
                let _ = create_table(&client, "circ_borrows", "borrow_id", "patron_id", "borrow_at").await;
                client
            });
    }

    async fn store() -> (DDBInventoryStore, DDBBorrowLedger, Arc<DDBCirculationStore>) {
        let client = CLIENT.get().await.clone();
        let ledger = DDBBorrowLedger::new(client.clone(), "circ_borrows", "circ_borrows_ndx");
        let store = DDBCirculationStore::new(DDBInventoryStore::new(client.clone(), "circ_books"), ledger.clone());
        (DDBInventoryStore::new(client, "circ_books"), ledger, Arc::new(store))
    }

    fn loan(patron_id: &str, book_id: &str) -> BorrowRecordEntity {
        let now = Utc::now().naive_utc();
        BorrowRecordEntity::new(patron_id, book_id, now, now + Duration::days(14))
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_check_out_and_in_in_one_transaction() {
        let (inventory, ledger, store) = store().await;
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 1);
        inventory.create_book(&book).await.expect("should create book");
        let id = book.book_id.as_str();

        store.check_out(&loan("333333", id), 5).await.expect("should check out");
        let res = store.check_out(&loan("444444", id), 5).await;
        assert!(matches!(res, Err(LibraryError::BookUnavailable { .. })));
        assert_eq!(1, ledger.count_open("333333").await.expect("should count"));
        assert_eq!(0, ledger.count_open("444444").await.expect("should count"));

        let returned = store.check_in("333333", id, Utc::now().naive_utc()).await.expect("should check in");
        assert!(returned.restocked);
        let again = store.check_in("333333", id, Utc::now().naive_utc()).await;
        assert!(matches!(again, Err(LibraryError::NoActiveBorrowRecord { .. })));
        assert_eq!(1, inventory.get_book(id).await.expect("should get").expect("should exist").available_copies);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_hold_limit_across_concurrent_check_outs() {
        let (inventory, ledger, store) = store().await;
        let mut handles = vec![];
        for i in 0..4 {
            let book = BookEntity::new(format!("978000000000{}", i).as_str(), "Book", "Author", 1);
            inventory.create_book(&book).await.expect("should create book");
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.check_out(&loan("555555", book.book_id.as_str()), 2).await }));
        }
        let mut borrowed = 0;
        for handle in handles {
            match handle.await.expect("task should finish") {
                Ok(_) => borrowed += 1,
                Err(err) => assert!(matches!(err, LibraryError::BorrowLimitExceeded { .. } | LibraryError::CurrentlyUnavailable { .. })),
            }
        }
        assert!(borrowed <= 2);
        assert_eq!(borrowed, ledger.count_open("555555").await.expect("should count"));
    }
}
