//! In-memory fixture store with pre-built indexes
//!
//! Loads the whole fixture dataset up front and indexes it by team, league,
//! and fixture id so every API query is a lookup plus a short scan rather
//! than a pass over the full dataset.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::models::{LeagueInfo, MatchRecord};

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a fixture dataset (JSON array of match documents) from disk.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<MatchRecord>, StoreError> {
    let content = fs::read_to_string(path.as_ref())?;
    let records: Vec<MatchRecord> = serde_json::from_str(&content)?;
    info!(
        "Loaded {} fixtures from {:?}",
        records.len(),
        path.as_ref()
    );
    Ok(records)
}

/// Indexed fixture collection backing the API queries.
pub struct FixtureStore {
    records: Vec<MatchRecord>,
    /// Team name -> record indexes, most recent first.
    by_team: HashMap<String, Vec<usize>>,
    /// League id -> record indexes (dataset order).
    by_league: HashMap<i64, Vec<usize>>,
    by_fixture_id: HashMap<i64, usize>,
}

impl FixtureStore {
    /// Index an already-loaded record set.
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let mut by_team: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_league: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut by_fixture_id: HashMap<i64, usize> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            by_team
                .entry(record.teams.home.name.clone())
                .or_default()
                .push(i);
            by_team
                .entry(record.teams.away.name.clone())
                .or_default()
                .push(i);
            by_league.entry(record.league.id).or_default().push(i);
            by_fixture_id.insert(record.fixture.id, i);
        }

        for indexes in by_team.values_mut() {
            indexes.sort_by(|a, b| {
                let lhs = (&records[*b].date, records[*b].fixture.timestamp);
                let rhs = (&records[*a].date, records[*a].fixture.timestamp);
                lhs.cmp(&rhs)
            });
        }

        Self {
            records,
            by_team,
            by_league,
            by_fixture_id,
        }
    }

    /// Load and index a dataset file in one step.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self::new(load_records(path)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A team's most recent matches that have recorded statistics, newest
    /// first, capped at `limit`.
    pub fn recent_with_stats(&self, team: &str, limit: usize) -> Vec<&MatchRecord> {
        self.by_team
            .get(team)
            .map(|indexes| {
                indexes
                    .iter()
                    .map(|&i| &self.records[i])
                    .filter(|r| r.has_stats)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// League matches with statistics whose kickoff timestamp lies strictly
    /// inside `(end_ts - window_secs, end_ts)`.
    pub fn league_window(
        &self,
        league_id: i64,
        end_ts: i64,
        window_secs: i64,
    ) -> Vec<&MatchRecord> {
        self.by_league
            .get(&league_id)
            .map(|indexes| {
                indexes
                    .iter()
                    .map(|&i| &self.records[i])
                    .filter(|r| {
                        r.has_stats
                            && r.fixture.timestamp < end_ts
                            && r.fixture.timestamp > end_ts - window_secs
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Records in the inclusive date range carrying a prediction for
    /// `model`, optionally restricted to the given league ids.
    pub fn simulations_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        model: &str,
        league_ids: Option<&[i64]>,
    ) -> Vec<&MatchRecord> {
        self.records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .filter(|r| {
                r.final_prediction
                    .as_ref()
                    .is_some_and(|predictions| predictions.contains_key(model))
            })
            .filter(|r| league_ids.is_none_or(|ids| ids.contains(&r.league.id)))
            .collect()
    }

    pub fn find_by_fixture_id(&self, id: i64) -> Option<&MatchRecord> {
        self.by_fixture_id.get(&id).map(|&i| &self.records[i])
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Vec<&MatchRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    /// Distinct leagues present in the dataset, sorted by id.
    pub fn leagues(&self) -> Vec<&LeagueInfo> {
        let mut seen: HashMap<i64, &LeagueInfo> = HashMap::new();
        for record in &self.records {
            seen.entry(record.league.id).or_insert(&record.league);
        }
        let mut leagues: Vec<&LeagueInfo> = seen.into_values().collect();
        leagues.sort_by_key(|l| l.id);
        leagues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureInfo, Outcome, TeamRef, TeamSides};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn record(
        id: i64,
        date: NaiveDate,
        timestamp: i64,
        league_id: i64,
        home: &str,
        away: &str,
        has_stats: bool,
    ) -> MatchRecord {
        MatchRecord {
            date,
            fixture: FixtureInfo { id, timestamp },
            league: LeagueInfo {
                id: league_id,
                name: Some(format!("League {}", league_id)),
                country: None,
                season: None,
            },
            teams: TeamSides {
                home: TeamRef {
                    id: None,
                    name: home.to_string(),
                },
                away: TeamRef {
                    id: None,
                    name: away.to_string(),
                },
            },
            has_stats,
            statistics: Vec::new(),
            final_prediction: None,
            result: None,
            odds: None,
        }
    }

    fn with_model(mut r: MatchRecord, model: &str, outcome: Outcome) -> MatchRecord {
        let mut map = HashMap::new();
        map.insert(model.to_string(), outcome);
        r.final_prediction = Some(map);
        r.result = Some(outcome);
        r
    }

    fn sample_store() -> FixtureStore {
        FixtureStore::new(vec![
            record(1, day(1), 100, 39, "Arsenal", "Chelsea", true),
            record(2, day(5), 500, 39, "Spurs", "Arsenal", true),
            record(3, day(10), 1000, 39, "Arsenal", "Spurs", false),
            record(4, day(12), 1200, 39, "Chelsea", "Arsenal", true),
            record(5, day(3), 300, 61, "PSG", "Lyon", true),
        ])
    }

    #[test]
    fn test_recent_with_stats_is_newest_first_and_filtered() {
        let store = sample_store();
        let matches = store.recent_with_stats("Arsenal", 4);
        // Fixture 3 has no stats and is skipped.
        let ids: Vec<i64> = matches.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![4, 2, 1]);
    }

    #[test]
    fn test_recent_with_stats_respects_limit() {
        let store = sample_store();
        let matches = store.recent_with_stats("Arsenal", 2);
        let ids: Vec<i64> = matches.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[test]
    fn test_recent_with_stats_unknown_team() {
        let store = sample_store();
        assert!(store.recent_with_stats("Barcelona", 4).is_empty());
    }

    #[test]
    fn test_league_window_bounds_are_exclusive() {
        let store = sample_store();
        // Window (100, 1200): fixture 1 (ts 100) and fixture 4 (ts 1200)
        // fall on the bounds and are excluded; fixture 3 has no stats.
        let matches = store.league_window(39, 1200, 1100);
        let ids: Vec<i64> = matches.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_league_window_other_league_excluded() {
        let store = sample_store();
        let matches = store.league_window(61, 10_000, 10_000);
        let ids: Vec<i64> = matches.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_simulations_between_filters_model_and_range() {
        let store = FixtureStore::new(vec![
            with_model(record(1, day(1), 100, 39, "A", "B", false), "poisson", Outcome::W),
            with_model(record(2, day(5), 500, 39, "C", "D", false), "elo", Outcome::D),
            with_model(record(3, day(9), 900, 61, "E", "F", false), "poisson", Outcome::L),
            with_model(record(4, day(20), 2000, 39, "G", "H", false), "poisson", Outcome::W),
        ]);

        let hits = store.simulations_between(day(1), day(10), "poisson", None);
        let ids: Vec<i64> = hits.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let league_hits = store.simulations_between(day(1), day(31), "poisson", Some(&[39]));
        let ids: Vec<i64> = league_hits.iter().map(|r| r.fixture.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_find_by_fixture_id() {
        let store = sample_store();
        assert_eq!(store.find_by_fixture_id(2).unwrap().teams.home.name, "Spurs");
        assert!(store.find_by_fixture_id(999).is_none());
    }

    #[test]
    fn test_find_by_date() {
        let store = sample_store();
        let matches = store.find_by_date(day(5));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fixture.id, 2);
        assert!(store.find_by_date(day(28)).is_empty());
    }

    #[test]
    fn test_leagues_sorted_and_distinct() {
        let store = sample_store();
        let leagues = store.leagues();
        let ids: Vec<i64> = leagues.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![39, 61]);
    }
}
