//! Comparison table combining home, away, and league averages per statistic.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::averager::{
    AveragedStats, DERIVED_SHOTS_PCT, OTHER_STATS, PERCENTAGE_STATS, SHOT_STATS,
};

/// One table row: a statistic name with the home, away, and league values.
///
/// On the wire the team columns are keyed by the actual team names, matching
/// what the dashboard renders, so serialization is written by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub stat: String,
    pub home_team: String,
    pub away_team: String,
    pub home: f64,
    pub away: f64,
    pub league_average: f64,
}

impl Serialize for StatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("stat", &self.stat)?;
        map.serialize_entry(&self.home_team, &self.home)?;
        map.serialize_entry(&self.away_team, &self.away)?;
        map.serialize_entry("League Average", &self.league_average)?;
        map.end()
    }
}

/// Build the per-category row arrays for the stats endpoint.
///
/// Rows follow the canonical order of each statistic family, restricted to
/// names present in at least one of the three sources; a name missing from a
/// source reads as 0 rather than failing the lookup. The derived `Shots %`
/// row comes after the fixed percentage stats.
pub fn convert_to_stats(
    home: &AveragedStats,
    away: &AveragedStats,
    league: &AveragedStats,
    home_name: &str,
    away_name: &str,
) -> Vec<Vec<StatRow>> {
    let shot_rows = category_rows(
        &SHOT_STATS,
        home_name,
        away_name,
        [&home.shot_stats, &away.shot_stats, &league.shot_stats],
    );

    let mut pct_names: Vec<&str> = PERCENTAGE_STATS.to_vec();
    pct_names.push(DERIVED_SHOTS_PCT);
    let pct_rows = category_rows(
        &pct_names,
        home_name,
        away_name,
        [
            &home.percentage_stats,
            &away.percentage_stats,
            &league.percentage_stats,
        ],
    );

    let other_rows = category_rows(
        &OTHER_STATS,
        home_name,
        away_name,
        [&home.other_stats, &away.other_stats, &league.other_stats],
    );

    vec![shot_rows, pct_rows, other_rows]
}

fn category_rows(
    names: &[&str],
    home_name: &str,
    away_name: &str,
    sources: [&std::collections::HashMap<String, f64>; 3],
) -> Vec<StatRow> {
    names
        .iter()
        .filter(|name| sources.iter().any(|map| map.contains_key(**name)))
        .map(|name| StatRow {
            stat: name.to_string(),
            home_team: home_name.to_string(),
            away_team: away_name.to_string(),
            home: sources[0].get(*name).copied().unwrap_or(0.0),
            away: sources[1].get(*name).copied().unwrap_or(0.0),
            league_average: sources[2].get(*name).copied().unwrap_or(0.0),
        })
        .collect()
}
