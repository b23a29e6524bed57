use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use chrono::NaiveDate;

/// One recorded value for a named match statistic.
///
/// Upstream feeds deliver counts as numbers but percentages as strings
/// (e.g. `"54%"`), so both shapes have to be accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// One named statistic for one team in one match. `value` is absent when the
/// stat was not recorded for that match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatEntry {
    #[serde(rename = "type")]
    pub name: String,
    pub value: Option<StatValue>,
}

/// Team identity as it appears inside a fixture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Home and away sides of a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSides {
    pub home: TeamRef,
    pub away: TeamRef,
}

/// All recorded statistics for one side of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatBlock {
    #[serde(default)]
    pub team: Option<TeamRef>,
    pub statistics: Vec<MatchStatEntry>,
}

/// Fixture scheduling info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: i64,
    pub timestamp: i64,
}

/// League the fixture belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
}

/// Match outcome from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Home win
    W,
    /// Draw
    D,
    /// Away win
    L,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::W, Outcome::D, Outcome::L];

    /// Bet365 decimal-odds column carrying this outcome's price.
    pub fn odds_key(self) -> &'static str {
        match self {
            Outcome::W => "B365H",
            Outcome::D => "B365D",
            Outcome::L => "B365A",
        }
    }

    /// Stable index into per-outcome tallies.
    pub fn index(self) -> usize {
        match self {
            Outcome::W => 0,
            Outcome::D => 1,
            Outcome::L => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::W => "Home Win",
            Outcome::D => "Draw",
            Outcome::L => "Away Win",
        }
    }
}

/// One fixture document as stored in the dataset.
///
/// A fixture always carries its teams and league; statistics, model
/// predictions, the final result, and bookmaker odds are only present once
/// the corresponding upstream stage has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub fixture: FixtureInfo,
    pub league: LeagueInfo,
    pub teams: TeamSides,
    #[serde(default, rename = "hasStats")]
    pub has_stats: bool,
    /// Index 0 is the home side, index 1 the away side.
    #[serde(default)]
    pub statistics: Vec<TeamStatBlock>,
    /// Model name -> predicted outcome.
    #[serde(default)]
    pub final_prediction: Option<HashMap<String, Outcome>>,
    #[serde(default)]
    pub result: Option<Outcome>,
    /// Bookmaker odds columns (B365H/B365D/B365A and friends).
    #[serde(default)]
    pub odds: Option<HashMap<String, f64>>,
}

impl MatchRecord {
    /// Statistics block index for the given team name: 0 when the team
    /// played at home, 1 otherwise.
    pub fn side_index(&self, team: &str) -> usize {
        usize::from(self.teams.home.name != team)
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub fixtures_loaded: usize,
}

/// Envelope used for sentinel and error payloads: a message plus an empty
/// result list, matching what the dashboard expects.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
    pub predictions: Vec<serde_json::Value>,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            predictions: Vec::new(),
        }
    }

    pub fn no_games() -> Self {
        Self::new("No games available")
    }
}
