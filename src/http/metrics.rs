use crate::core::{ClvRecord, NpsReport, RfmReport};
use crate::http::error::ApiError;
use crate::http::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClvResponse {
    pub clv: Vec<ClvRecord>,
}

#[derive(Debug, Serialize)]
pub struct NpsResponse {
    pub nps: NpsReport,
}

pub async fn rfm_handler(State(state): State<AppState>) -> Result<Json<RfmReport>, ApiError> {
    Ok(Json(state.engine.rfm().await?))
}

pub async fn clv_handler(State(state): State<AppState>) -> Result<Json<ClvResponse>, ApiError> {
    let clv = state.engine.clv().await?;
    Ok(Json(ClvResponse { clv }))
}

pub async fn nps_handler(State(state): State<AppState>) -> Result<Json<NpsResponse>, ApiError> {
    let nps = state.engine.nps().await?;
    Ok(Json(NpsResponse { nps }))
}
