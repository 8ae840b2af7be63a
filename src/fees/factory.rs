use std::sync::Arc;
use crate::checkout::repository::BorrowLedger;
use crate::core::domain::Configuration;
use crate::fees::LateFeeService;
use crate::fees::service::LateFeeServiceImpl;

pub fn create_late_fee_service(config: &Configuration, ledger: Arc<dyn BorrowLedger>) -> Arc<dyn LateFeeService> {
    Arc::new(LateFeeServiceImpl::new(config, ledger))
}
