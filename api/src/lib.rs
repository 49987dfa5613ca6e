//! Shared data model and server plumbing for the Covidash dashboard.
//!
//! The client only ever sees [`model::DashboardData`], fetched once through
//! [`dashboard_snapshot`]. The loader that produces it lives behind the
//! `server` feature and runs before the server starts accepting requests.

use dioxus::prelude::*;

pub mod model;
pub mod text;

#[cfg(feature = "server")]
pub mod loader;

/// Returns the tables loaded at startup. The loader has either completed
/// before the server began serving or the process never started, so a missing
/// snapshot only happens when a deployment skipped initialization.
#[server]
pub async fn dashboard_snapshot() -> Result<model::DashboardData, ServerFnError> {
    match loader::snapshot() {
        Some(data) => Ok(data.clone()),
        None => Err(ServerFnError::new("dashboard data was not initialized")),
    }
}
