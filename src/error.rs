use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use chrono::NaiveDate;

use crate::models::MessageResponse;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request parameter
    ValidationError(String),
    /// No matching record
    NotFound(String),
    /// Dataset or computation failure
    DataError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DataError(msg) => write!(f, "Data error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DataError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // The dashboard expects the message envelope with an empty result
        // list on every non-2xx answer.
        let msg = match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::DataError(msg) => msg.clone(),
        };

        HttpResponse::build(self.status_code()).json(MessageResponse::new(msg))
    }
}

/// Validation functions
pub fn require_param<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::ValidationError(format!(
            "{} parameter is required",
            name
        ))),
    }
}

pub fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::ValidationError(format!(
            "{} must be an ISO date (YYYY-MM-DD), got {:?}",
            name, raw
        ))
    })
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start > end {
        return Err(AppError::ValidationError(format!(
            "startDate {} is after endDate {}",
            start, end
        )));
    }
    Ok(())
}

pub fn parse_league_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<i64>().map_err(|_| {
                AppError::ValidationError(format!("leagueIds contains a non-numeric id: {:?}", part))
            })
        })
        .collect()
}
