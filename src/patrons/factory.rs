use std::sync::Arc;
use crate::checkout::repository::BorrowLedger;
use crate::core::domain::Configuration;
use crate::patrons::domain::PatronStatusService;
use crate::patrons::domain::service::PatronStatusServiceImpl;

pub fn create_patron_status_service(config: &Configuration, ledger: Arc<dyn BorrowLedger>) -> Arc<dyn PatronStatusService> {
    Arc::new(PatronStatusServiceImpl::new(config, ledger))
}
