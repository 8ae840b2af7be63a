pub mod calculator;
pub mod service;
pub mod factory;
pub mod controller;

pub mod command {
    pub mod compute_fee_cmd;
}

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::fees::calculator::LateFee;

// LateFeeService prices a (patron, book) loan from the ledger: the open record if there is one,
// otherwise the most recently returned one. No record at all means no fee.
#[async_trait]
pub trait LateFeeService: Sync + Send {
    async fn compute_fee(&self, patron_id: &str, book_id: &str) -> LibraryResult<LateFee>;
}
