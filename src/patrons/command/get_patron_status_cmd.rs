use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::LibraryError;
use crate::patrons::domain::PatronStatusService;
use crate::patrons::dto::PatronStatusReport;

pub struct GetPatronStatusCommand {
    patron_status_service: Arc<dyn PatronStatusService>,
}

impl GetPatronStatusCommand {
    pub fn new(patron_status_service: Arc<dyn PatronStatusService>) -> Self {
        Self {
            patron_status_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetPatronStatusCommandRequest {
    pub patron_id: String,
}

impl GetPatronStatusCommandRequest {
    pub fn new(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
        }
    }
}

// report is absent for a malformed patron id
#[derive(Debug, Serialize)]
pub struct GetPatronStatusCommandResponse {
    pub report: Option<PatronStatusReport>,
}

impl GetPatronStatusCommandResponse {
    pub fn new(report: Option<PatronStatusReport>) -> Self {
        Self {
            report,
        }
    }
}

#[async_trait]
impl Command<GetPatronStatusCommandRequest, GetPatronStatusCommandResponse> for GetPatronStatusCommand {
    async fn execute(&self, req: GetPatronStatusCommandRequest) -> Result<GetPatronStatusCommandResponse, CommandError> {
        match self.patron_status_service.status(req.patron_id.as_str()).await {
            Ok(report) => Ok(GetPatronStatusCommandResponse::new(Some(report))),
            Err(LibraryError::InvalidPatronId { .. }) => Ok(GetPatronStatusCommandResponse::new(None)),
            Err(err) => Err(CommandError::from(err)),
        }
    }
}
