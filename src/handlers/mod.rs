//! Request handlers for the API endpoints.

pub mod health;
pub mod matches;
pub mod simulations;
pub mod stats;
