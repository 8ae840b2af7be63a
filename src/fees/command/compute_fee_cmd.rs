use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fees::LateFeeService;
use crate::fees::calculator::LateFee;

pub struct ComputeFeeCommand {
    late_fee_service: Arc<dyn LateFeeService>,
}

impl ComputeFeeCommand {
    pub fn new(late_fee_service: Arc<dyn LateFeeService>) -> Self {
        Self {
            late_fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ComputeFeeCommandRequest {
    pub patron_id: String,
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct ComputeFeeCommandResponse {
    pub fee_amount: f64,
    pub days_overdue: i64,
    pub status: String,
}

impl From<LateFee> for ComputeFeeCommandResponse {
    fn from(other: LateFee) -> Self {
        Self {
            fee_amount: other.fee_amount,
            days_overdue: other.days_overdue,
            status: other.status.to_string(),
        }
    }
}

#[async_trait]
impl Command<ComputeFeeCommandRequest, ComputeFeeCommandResponse> for ComputeFeeCommand {
    async fn execute(&self, req: ComputeFeeCommandRequest) -> Result<ComputeFeeCommandResponse, CommandError> {
        self.late_fee_service.compute_fee(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(ComputeFeeCommandResponse::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, Utc};
    use crate::checkout::repository::BorrowLedger;
    use crate::checkout::repository::memory_borrow_ledger::MemoryBorrowLedger;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::fees::command::compute_fee_cmd::{ComputeFeeCommand, ComputeFeeCommandRequest};
    use crate::fees::factory::create_late_fee_service;

    #[tokio::test]
    async fn test_should_run_compute_fee() {
        let ledger = Arc::new(MemoryBorrowLedger::new());
        let now = Utc::now().naive_utc();
        ledger.insert_borrow("123456", "1", now - Duration::days(16), now - Duration::days(2)).await.expect("should insert");
        let cmd = ComputeFeeCommand::new(create_late_fee_service(&Configuration::new("test"), ledger));

        let res = cmd.execute(ComputeFeeCommandRequest { patron_id: "123456".to_string(), book_id: "1".to_string() })
            .await.expect("should compute");
        assert_eq!(1.0, res.fee_amount);
        assert_eq!(2, res.days_overdue);
        assert_eq!("Late fee calculated", res.status.as_str());

        let err = cmd.execute(ComputeFeeCommandRequest { patron_id: "1".to_string(), book_id: "1".to_string() }).await;
        assert!(matches!(err, Err(CommandError::Validation { .. })));
    }
}
