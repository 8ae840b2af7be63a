use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::fees::command::compute_fee_cmd::{ComputeFeeCommand, ComputeFeeCommandRequest, ComputeFeeCommandResponse};

pub async fn compute_fee(
    State(state): State<AppState>,
    Path((patron_id, book_id)): Path<(String, String)>) -> Result<Json<ComputeFeeCommandResponse>, ServerError> {
    let req = ComputeFeeCommandRequest { patron_id, book_id };
    let res = ComputeFeeCommand::new(state.fees).execute(req).await?;
    Ok(Json(res))
}
