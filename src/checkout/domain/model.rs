use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::BorrowStatus;
use crate::utils::date::{opt_serializer, serializer};

// BorrowRecordEntity abstracts one loan of a book copy to a patron. A record is open until
// returned_at is set, which happens exactly once.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowRecordEntity {
    pub borrow_id: String,
    pub version: i64,
    pub patron_id: String,
    pub book_id: String,
    pub borrow_status: BorrowStatus,
    #[serde(with = "serializer")]
    pub borrow_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BorrowRecordEntity {
    pub fn new(patron_id: &str, book_id: &str, borrow_at: NaiveDateTime, due_at: NaiveDateTime) -> Self {
        Self {
            borrow_id: Uuid::new_v4().to_string(),
            version: 0,
            patron_id: patron_id.to_string(),
            book_id: book_id.to_string(),
            borrow_status: BorrowStatus::Open,
            borrow_at,
            due_at,
            returned_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    pub fn close(&mut self, returned_at: NaiveDateTime) {
        self.borrow_status = BorrowStatus::Returned;
        self.returned_at = Some(returned_at);
        self.version += 1;
        self.updated_at = Utc::now().naive_utc();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::checkout::domain::model::BorrowRecordEntity;
    use crate::core::library::BorrowStatus;

    #[tokio::test]
    async fn test_should_build_and_close_borrow_record() {
        let now = Utc::now().naive_utc();
        let mut record = BorrowRecordEntity::new("123456", "book1", now, now + Duration::days(14));
        assert_eq!("book1", record.book_id.as_str());
        assert_eq!(BorrowStatus::Open, record.borrow_status);
        assert!(record.is_open());

        record.close(now + Duration::days(2));
        assert_eq!(Some(now + Duration::days(2)), record.returned_at);
        assert_eq!(BorrowStatus::Returned, record.borrow_status);
        assert!(!record.is_open());
        assert_eq!(1, record.version);
    }
}
