use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::checkout::repository::BorrowLedger;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::bounded;
use crate::fees::LateFeeService;
use crate::fees::calculator::{LateFee, LateFeeCalculator};
use crate::utils::validation::validate_patron_id;

pub struct LateFeeServiceImpl {
    ledger: Arc<dyn BorrowLedger>,
    calculator: LateFeeCalculator,
    store_timeout: std::time::Duration,
}

impl LateFeeServiceImpl {
    pub fn new(config: &Configuration, ledger: Arc<dyn BorrowLedger>) -> Self {
        Self {
            ledger,
            calculator: LateFeeCalculator::new(config.fees.clone()),
            store_timeout: config.store_timeout(),
        }
    }
}

#[async_trait]
impl LateFeeService for LateFeeServiceImpl {
    async fn compute_fee(&self, patron_id: &str, book_id: &str) -> LibraryResult<LateFee> {
        validate_patron_id(patron_id)?;
        let records = bounded(self.store_timeout, "list_by_patron", self.ledger.list_by_patron(patron_id)).await?;
        let now = Utc::now().naive_utc();
        let loans = records.iter().filter(|r| r.book_id == book_id);
        if let Some(open) = loans.clone().find(|r| r.is_open()) {
            return Ok(self.calculator.compute(open.due_at, now));
        }
        let last_returned = loans
            .filter_map(|r| r.returned_at.map(|returned_at| (r, returned_at)))
            .max_by_key(|(_, returned_at)| *returned_at);
        Ok(match last_returned {
            Some((record, returned_at)) => self.calculator.compute(record.due_at, returned_at),
            None => LateFee::none(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, Utc};
    use crate::checkout::repository::BorrowLedger;
    use crate::checkout::repository::memory_borrow_ledger::MemoryBorrowLedger;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::fees::LateFeeService;
    use crate::fees::calculator::FeeStatus;
    use crate::fees::service::LateFeeServiceImpl;

    #[tokio::test]
    async fn test_should_price_open_loan() {
        let ledger = Arc::new(MemoryBorrowLedger::new());
        let svc = LateFeeServiceImpl::new(&Configuration::new("test"), ledger.clone());
        let now = Utc::now().naive_utc();
        ledger.insert_borrow("123456", "1", now - Duration::days(54), now - Duration::days(40))
            .await.expect("should insert");
        let fee = svc.compute_fee("123456", "1").await.expect("should compute");
        assert_eq!(15.0, fee.fee_amount);
        assert_eq!(FeeStatus::Capped, fee.status);
    }

    #[tokio::test]
    async fn test_should_price_last_returned_loan() {
        let ledger = Arc::new(MemoryBorrowLedger::new());
        let svc = LateFeeServiceImpl::new(&Configuration::new("test"), ledger.clone());
        let now = Utc::now().naive_utc();
        let due_at = now - Duration::days(30);
        ledger.insert_borrow("123456", "1", due_at - Duration::days(14), due_at).await.expect("should insert");
        ledger.close_borrow("123456", "1", due_at + Duration::days(3)).await.expect("should close");
        let fee = svc.compute_fee("123456", "1").await.expect("should compute");
        assert_eq!(3, fee.days_overdue);
        assert_eq!("1.50", fee.formatted());
    }

    #[tokio::test]
    async fn test_should_charge_nothing_without_record() {
        let svc = LateFeeServiceImpl::new(&Configuration::new("test"), Arc::new(MemoryBorrowLedger::new()));
        let fee = svc.compute_fee("123456", "1").await.expect("should compute");
        assert_eq!(0.0, fee.fee_amount);
        assert_eq!(FeeStatus::NotOverdue, fee.status);
        let res = svc.compute_fee("12345", "1").await;
        assert!(matches!(res, Err(LibraryError::InvalidPatronId { .. })));
    }
}
