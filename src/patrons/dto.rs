use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::BorrowRecordEntity;
use crate::fees::calculator::LateFee;
use crate::utils::date::to_iso_day;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OpenLoanDto {
    pub book_id: String,
    pub due_date: String,
    pub days_overdue: i64,
    pub fee_amount: f64,
}

impl OpenLoanDto {
    pub fn new(record: &BorrowRecordEntity, late_fee: &LateFee) -> Self {
        Self {
            book_id: record.book_id.to_string(),
            due_date: to_iso_day(record.due_at),
            days_overdue: late_fee.days_overdue,
            fee_amount: late_fee.fee_amount,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub book_id: String,
    pub borrow_date: String,
    pub return_date: Option<String>,
}

impl From<&BorrowRecordEntity> for HistoryEntryDto {
    fn from(other: &BorrowRecordEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            borrow_date: to_iso_day(other.borrow_at),
            return_date: other.returned_at.map(to_iso_day),
        }
    }
}

// PatronStatusReport summarizes a patron's loans; history is ordered by borrow date, oldest first.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronStatusReport {
    pub patron_id: String,
    pub open_loans: Vec<OpenLoanDto>,
    pub total_outstanding_fees: f64,
    pub history: Vec<HistoryEntryDto>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use crate::checkout::domain::model::BorrowRecordEntity;
    use crate::patrons::dto::HistoryEntryDto;

    #[tokio::test]
    async fn test_should_build_history_entry() {
        let borrow_at = NaiveDate::from_ymd_opt(2025, 10, 1).and_then(|d| d.and_hms_opt(9, 30, 0)).expect("valid date");
        let mut record = BorrowRecordEntity::new("123456", "1", borrow_at, borrow_at + Duration::days(14));
        let entry = HistoryEntryDto::from(&record);
        assert_eq!("2025-10-01", entry.borrow_date.as_str());
        assert_eq!(None, entry.return_date);
        record.close(borrow_at + Duration::days(3));
        assert_eq!(Some("2025-10-04".to_string()), HistoryEntryDto::from(&record).return_date);
    }
}
