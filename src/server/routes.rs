use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::model::DomainResult;
use crate::server::AppState;
use crate::utils::error::{RelayError, Result};

pub const STATUS_MESSAGE: &str = "Guest post price relay is running";

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub domains: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE,
    })
}

/// `GET /fetch?domains=a.com,b.com`
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Result<Json<Vec<DomainResult>>> {
    let domains = params.domains.ok_or_else(|| RelayError::MissingParameter {
        name: "domains".to_string(),
    })?;

    let results = state.engine.run(&domains).await?;
    Ok(Json(results))
}
