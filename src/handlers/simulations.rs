use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::AppState;
use scorelab::error::{
    parse_date, parse_league_ids, require_param, validate_date_range, AppError,
};
use scorelab::simulation::{score_simulations, SimulationSummary};

#[derive(Debug, Deserialize)]
pub struct SimulationsQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "modelName")]
    pub model_name: Option<String>,
    #[serde(rename = "leagueIds")]
    pub league_ids: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimulationsResponse {
    pub msg: String,
    pub predictions: SimulationSummary,
}

/// Score a model's predictions over a date range.
pub async fn simulations(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SimulationsQuery>,
) -> Result<HttpResponse, AppError> {
    let start = parse_date("startDate", require_param("startDate", query.start_date.as_deref())?)?;
    let end = parse_date("endDate", require_param("endDate", query.end_date.as_deref())?)?;
    validate_date_range(start, end)?;
    let model = require_param("modelName", query.model_name.as_deref())?;

    let league_ids = query
        .league_ids
        .as_deref()
        .map(parse_league_ids)
        .transpose()?;

    let records: Vec<_> = state
        .store
        .simulations_between(start, end, model, league_ids.as_deref())
        .into_iter()
        .cloned()
        .collect();

    info!(
        "simulating model {:?} over {}..={}: {} records",
        model,
        start,
        end,
        records.len()
    );

    let summary = score_simulations(&records, model)
        .map_err(|e| AppError::DataError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(SimulationsResponse {
        msg: "OK".to_string(),
        predictions: summary,
    }))
}
