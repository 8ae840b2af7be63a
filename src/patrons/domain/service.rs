use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::checkout::repository::BorrowLedger;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::bounded;
use crate::fees::calculator::LateFeeCalculator;
use crate::patrons::domain::PatronStatusService;
use crate::patrons::dto::{HistoryEntryDto, OpenLoanDto, PatronStatusReport};
use crate::utils::validation::validate_patron_id;

pub struct PatronStatusServiceImpl {
    ledger: Arc<dyn BorrowLedger>,
    fees: LateFeeCalculator,
    store_timeout: std::time::Duration,
}

impl PatronStatusServiceImpl {
    pub fn new(config: &Configuration, ledger: Arc<dyn BorrowLedger>) -> Self {
        Self {
            ledger,
            fees: LateFeeCalculator::new(config.fees.clone()),
            store_timeout: config.store_timeout(),
        }
    }
}

#[async_trait]
impl PatronStatusService for PatronStatusServiceImpl {
    async fn status(&self, patron_id: &str) -> LibraryResult<PatronStatusReport> {
        validate_patron_id(patron_id)?;
        let mut records = bounded(self.store_timeout, "list_by_patron", self.ledger.list_by_patron(patron_id)).await?;
        records.sort_by(|a, b| a.borrow_at.cmp(&b.borrow_at));
        let now = Utc::now().naive_utc();
        let mut total_cents = 0;
        let mut open_loans = vec![];
        for record in records.iter().filter(|r| r.is_open()) {
            let late_fee = self.fees.compute(record.due_at, now);
            total_cents += late_fee.fee_cents;
            open_loans.push(OpenLoanDto::new(record, &late_fee));
        }
        Ok(PatronStatusReport {
            patron_id: patron_id.to_string(),
            open_loans,
            total_outstanding_fees: total_cents as f64 / 100.0,
            history: records.iter().map(HistoryEntryDto::from).collect(),
        })
    }
}
