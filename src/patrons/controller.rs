use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::patrons::command::get_patron_status_cmd::{GetPatronStatusCommand, GetPatronStatusCommandRequest, GetPatronStatusCommandResponse};

pub async fn patron_status(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<GetPatronStatusCommandResponse>, ServerError> {
    let req = GetPatronStatusCommandRequest { patron_id };
    let res = GetPatronStatusCommand::new(state.patrons).execute(req).await?;
    Ok(Json(res))
}
