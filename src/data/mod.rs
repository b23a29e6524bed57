//! Dataset loading and in-memory indexing.

pub mod odds_loader;
pub mod store;

pub use odds_loader::{BookmakerOdds, OddsTable};
pub use store::{load_records, FixtureStore, StoreError};
