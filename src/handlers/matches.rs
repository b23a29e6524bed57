use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use scorelab::error::{parse_date, require_param, AppError};
use scorelab::models::{MatchRecord, MessageResponse};

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    pub msg: String,
    pub predictions: Vec<MatchRecord>,
}

/// Look up one fixture by id.
pub async fn match_by_id(
    state: web::Data<Arc<AppState>>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, AppError> {
    let raw = require_param("id", query.id.as_deref())?;
    let id: i64 = raw
        .parse()
        .map_err(|_| AppError::ValidationError(format!("id must be numeric, got {:?}", raw)))?;

    match state.store.find_by_fixture_id(id) {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(AppError::NotFound("No game data available".to_string())),
    }
}

/// All fixtures (with their model predictions) for one day.
pub async fn predictions_by_date(
    state: web::Data<Arc<AppState>>,
    query: web::Query<PredictionsQuery>,
) -> Result<HttpResponse, AppError> {
    let date = parse_date("date", require_param("date", query.date.as_deref())?)?;

    if date > Utc::now().date_naive() {
        return Ok(HttpResponse::Ok().json(MessageResponse::new("Date cannot be in the future")));
    }

    let matches = state.store.find_by_date(date);
    if matches.is_empty() {
        return Ok(HttpResponse::Ok().json(MessageResponse::no_games()));
    }

    Ok(HttpResponse::Ok().json(PredictionsResponse {
        msg: "OK".to_string(),
        predictions: matches.into_iter().cloned().collect(),
    }))
}

/// Leagues present in the dataset, sorted by id.
pub async fn leagues(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.store.leagues()))
}
