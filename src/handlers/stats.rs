use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use scorelab::error::{require_param, AppError};
use scorelab::models::MessageResponse;
use scorelab::stats::{average_league_stats, average_team_stats, convert_to_stats};

/// How many of a team's most recent matches feed the averages.
const RECENT_MATCH_LIMIT: usize = 4;

/// League averages come from a trailing window before the anchor fixture.
const LEAGUE_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<String>,
}

/// Compare two teams' recent averages against the league average.
pub async fn match_stats(
    state: web::Data<Arc<AppState>>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let home = require_param("homeTeam", query.home_team.as_deref())?;
    let away = require_param("awayTeam", query.away_team.as_deref())?;

    let home_matches = state.store.recent_with_stats(home, RECENT_MATCH_LIMIT);
    let away_matches = state.store.recent_with_stats(away, RECENT_MATCH_LIMIT);

    if home_matches.is_empty() || away_matches.is_empty() {
        return Ok(HttpResponse::Ok().json(MessageResponse::no_games()));
    }

    // The league window is anchored on the most recent fixture either team
    // played: same league, 30 days back from its kickoff.
    let anchor = home_matches.first().or(away_matches.first()).copied();
    let league_matches = match anchor {
        Some(record) => state.store.league_window(
            record.league.id,
            record.fixture.timestamp,
            LEAGUE_WINDOW_SECS,
        ),
        None => Vec::new(),
    };

    debug!(
        "stats query {} vs {}: {} home / {} away / {} league matches",
        home,
        away,
        home_matches.len(),
        away_matches.len(),
        league_matches.len()
    );

    let home_avg = average_team_stats(home_matches.iter().copied(), home);
    let away_avg = average_team_stats(away_matches.iter().copied(), away);
    let league_avg = average_league_stats(league_matches.iter().copied());

    let table = convert_to_stats(&home_avg, &away_avg, &league_avg, home, away);

    Ok(HttpResponse::Ok().json(table))
}
