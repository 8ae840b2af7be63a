pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::patrons::dto::PatronStatusReport;

// Patrons are not stored; everything reported about one is read back from the borrow ledger.
#[async_trait]
pub trait PatronStatusService: Sync + Send {
    async fn status(&self, patron_id: &str) -> LibraryResult<PatronStatusReport>;
}
