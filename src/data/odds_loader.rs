//! Historical bookmaker odds ingestion
//!
//! Reads the football-data.co.uk result sheets (CSV with `Date`, `HomeTeam`,
//! `AwayTeam`, and the Bet365 `B365H`/`B365D`/`B365A` columns) and backfills
//! odds onto fixture records that were stored before the odds merge ran.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::models::{MatchRecord, Outcome};

/// Decimal odds for the three outcomes of one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookmakerOdds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl BookmakerOdds {
    /// Value for a B365 odds column name.
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "B365H" => Some(self.home),
            "B365D" => Some(self.draw),
            "B365A" => Some(self.away),
            _ => None,
        }
    }

    fn to_map(self) -> HashMap<String, f64> {
        Outcome::ALL
            .iter()
            .filter_map(|o| self.get(o.odds_key()).map(|v| (o.odds_key().to_string(), v)))
            .collect()
    }
}

/// Odds indexed by (date, home team, away team).
pub struct OddsTable {
    odds: HashMap<(NaiveDate, String, String), BookmakerOdds>,
}

impl OddsTable {
    /// Load and index a football-data CSV sheet.
    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self, PolarsError> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(csv_path.as_ref().to_path_buf()))?
            .finish()?;
        Self::from_dataframe(&df)
    }

    fn from_dataframe(df: &DataFrame) -> Result<Self, PolarsError> {
        let date_col = df.column("Date")?.str()?;
        let home_col = df.column("HomeTeam")?.str()?;
        let away_col = df.column("AwayTeam")?.str()?;
        let h_col = df.column("B365H")?.f64()?;
        let d_col = df.column("B365D")?.f64()?;
        let a_col = df.column("B365A")?.f64()?;

        let mut odds = HashMap::new();

        for i in 0..df.height() {
            if let (Some(date), Some(home), Some(away), Some(h), Some(d), Some(a)) = (
                date_col.get(i),
                home_col.get(i),
                away_col.get(i),
                h_col.get(i),
                d_col.get(i),
                a_col.get(i),
            ) {
                // Rows with a malformed date are skipped.
                let Some(date) = parse_sheet_date(date) else {
                    continue;
                };
                odds.insert(
                    (date, home.to_string(), away.to_string()),
                    BookmakerOdds {
                        home: h,
                        draw: d,
                        away: a,
                    },
                );
            }
        }

        Ok(Self { odds })
    }

    pub fn len(&self) -> usize {
        self.odds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.odds.is_empty()
    }

    pub fn get(&self, date: NaiveDate, home: &str, away: &str) -> Option<BookmakerOdds> {
        self.odds
            .get(&(date, home.to_string(), away.to_string()))
            .copied()
    }

    /// Attach odds to every record that has none but matches a sheet row.
    /// Returns the number of records backfilled.
    pub fn backfill(&self, records: &mut [MatchRecord]) -> usize {
        let mut filled = 0;
        for record in records.iter_mut() {
            if record.odds.is_some() {
                continue;
            }
            if let Some(odds) =
                self.get(record.date, &record.teams.home.name, &record.teams.away.name)
            {
                record.odds = Some(odds.to_map());
                filled += 1;
            }
        }
        filled
    }
}

/// football-data sheets write dates as `dd/mm/yyyy` (older seasons `dd/mm/yy`).
fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%y"))
        .ok()
}
