use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::core::library::BorrowStatus;
use crate::fees::calculator::LateFee;
use crate::utils::date::{opt_serializer, serializer, to_iso_day};

// BorrowRecordDto abstracts a loan as handed out of the checkout service.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowRecordDto {
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
}

impl From<&BorrowRecordEntity> for BorrowRecordDto {
    fn from(other: &BorrowRecordEntity) -> Self {
        Self {
            borrow_id: other.borrow_id.to_string(),
            version: other.version,
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id.to_string(),
            borrow_status: other.borrow_status,
            borrow_at: other.borrow_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowReceipt {
    pub title: String,
    pub due_date: String,
    pub record: BorrowRecordDto,
}

impl BorrowReceipt {
    pub fn new(record: &BorrowRecordEntity, title: &str) -> Self {
        Self {
            title: title.to_string(),
            due_date: to_iso_day(record.due_at),
            record: BorrowRecordDto::from(record),
        }
    }
}

impl Display for BorrowReceipt {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Successfully borrowed \"{}\". Due date: {}.", self.title, self.due_date)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub title: String,
    pub late_fee: LateFee,
    pub record: BorrowRecordDto,
}

impl ReturnReceipt {
    pub fn new(record: &BorrowRecordEntity, title: &str, late_fee: LateFee) -> Self {
        Self {
            title: title.to_string(),
            late_fee,
            record: BorrowRecordDto::from(record),
        }
    }
}

impl Display for ReturnReceipt {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.late_fee.is_due() {
            write!(f, "Book returned with late fee: ${}", self.late_fee.formatted())
        } else {
            write!(f, "Book returned successfully.")
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use crate::checkout::domain::model::BorrowRecordEntity;
    use crate::checkout::dto::{BorrowReceipt, ReturnReceipt};
    use crate::fees::calculator::{LateFee, LateFeeCalculator};

    #[tokio::test]
    async fn test_should_render_borrow_receipt() {
        let borrow_at = NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("valid date");
        let record = BorrowRecordEntity::new("123456", "1", borrow_at, borrow_at + Duration::days(14));
        let receipt = BorrowReceipt::new(&record, "Dune");
        assert_eq!("Successfully borrowed \"Dune\". Due date: 2024-03-15.", receipt.to_string());
    }

    #[tokio::test]
    async fn test_should_render_return_receipt() {
        let borrow_at = NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("valid date");
        let mut record = BorrowRecordEntity::new("123456", "1", borrow_at, borrow_at + Duration::days(14));
        record.close(record.due_at + Duration::days(10));
        let fee = LateFeeCalculator::default().compute(record.due_at, record.due_at + Duration::days(10));
        assert_eq!("Book returned with late fee: $6.50", ReturnReceipt::new(&record, "Dune", fee).to_string());
        assert_eq!("Book returned successfully.", ReturnReceipt::new(&record, "Dune", LateFee::none()).to_string());
    }
}
