use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::checkout::repository::BorrowLedger;
use crate::core::library::{LibraryError, LibraryResult};

// Records are kept in insertion order; each trait call holds the lock for its whole read or write
// so readers only ever see committed records.
#[derive(Debug, Default)]
pub struct MemoryBorrowLedger {
    pub(crate) records: RwLock<Vec<BorrowRecordEntity>>,
}

impl MemoryBorrowLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_open_for(record: &BorrowRecordEntity, patron_id: &str, book_id: &str) -> bool {
    record.is_open() && record.patron_id == patron_id && record.book_id == book_id
}

pub(crate) fn open_count(records: &[BorrowRecordEntity], patron_id: &str) -> usize {
    records.iter().filter(|r| r.patron_id == patron_id && r.is_open()).count()
}

pub(crate) fn push_open(records: &mut Vec<BorrowRecordEntity>, record: &BorrowRecordEntity) -> LibraryResult<()> {
    if records.iter().any(|r| is_open_for(r, record.patron_id.as_str(), record.book_id.as_str())) {
        return Err(LibraryError::duplicate_key(
            format!("patron {} already has an open borrow of book {}", record.patron_id, record.book_id).as_str()));
    }
    records.push(record.clone());
    Ok(())
}

pub(crate) fn close_open(records: &mut [BorrowRecordEntity], patron_id: &str, book_id: &str,
                         returned_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity> {
    let record = records.iter_mut()
        .find(|r| is_open_for(r, patron_id, book_id))
        .ok_or_else(LibraryError::no_active_borrow_record)?;
    record.close(returned_at);
    Ok(record.clone())
}

#[async_trait]
impl BorrowLedger for MemoryBorrowLedger {
    async fn insert_borrow(&self, patron_id: &str, book_id: &str,
                           borrow_at: NaiveDateTime, due_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity> {
        let record = BorrowRecordEntity::new(patron_id, book_id, borrow_at, due_at);
        push_open(&mut *self.records.write().await, &record)?;
        Ok(record)
    }

    async fn close_borrow(&self, patron_id: &str, book_id: &str,
                          returned_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity> {
        close_open(&mut self.records.write().await, patron_id, book_id, returned_at)
    }

    async fn count_open(&self, patron_id: &str) -> LibraryResult<usize> {
        Ok(open_count(&self.records.read().await, patron_id))
    }

    async fn list_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>> {
        let mut res: Vec<BorrowRecordEntity> = self.records.read().await.iter()
            .filter(|r| r.patron_id == patron_id)
            .cloned()
            .collect();
        res.sort_by(|a, b| a.borrow_at.cmp(&b.borrow_at));
        Ok(res)
    }

    async fn find_open(&self, patron_id: &str, book_id: &str) -> LibraryResult<Option<BorrowRecordEntity>> {
        Ok(self.records.read().await.iter()
            .find(|r| is_open_for(r, patron_id, book_id))
            .cloned())
    }
}
