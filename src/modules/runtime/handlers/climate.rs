//! Climate query handlers
//!
//! One handler per route. Each opens a store session, issues exactly one
//! query and lets the session drop before the JSON body is returned.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use climate_api_core::{
    home_page, interleave_observations, precipitation_by_date, DateWindow, MOST_ACTIVE_STATION,
};
use climate_api_types::TemperatureSummary;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;
use crate::state::AppState;

/// Handlers for the climate routes
pub struct ClimateHandler;

impl ClimateHandler {
    /// Handle GET /
    pub async fn home() -> Html<String> {
        Html(home_page())
    }

    /// Handle GET /api/v1.0/precipitation
    pub async fn precipitation(
        State(state): State<AppState>,
    ) -> Result<Json<Map<String, Value>>, ApiError> {
        let rows = {
            let mut session = state.store.session().await?;
            session.precipitation().await?
        };
        debug!("precipitation: {} rows", rows.len());

        Ok(Json(precipitation_by_date(rows)))
    }

    /// Handle GET /api/v1.0/stations
    pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
        let names = {
            let mut session = state.store.session().await?;
            session.station_names().await?
        };
        debug!("stations: {} rows", names.len());

        Ok(Json(names))
    }

    /// Handle GET /api/v1.0/tobs
    pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
        let rows = {
            let mut session = state.store.session().await?;
            session.station_observations(MOST_ACTIVE_STATION).await?
        };
        debug!("tobs: {} rows for {}", rows.len(), MOST_ACTIVE_STATION);

        Ok(Json(interleave_observations(rows)))
    }

    /// Handle GET /api/v1.0/{start}
    pub async fn temperature_from(
        State(state): State<AppState>,
        Path(start): Path<String>,
    ) -> Result<Json<TemperatureSummary>, ApiError> {
        Self::summarize(&state, DateWindow::starting(start)).await
    }

    /// Handle GET /api/v1.0/{start}/{end}
    pub async fn temperature_between(
        State(state): State<AppState>,
        Path((start, end)): Path<(String, String)>,
    ) -> Result<Json<TemperatureSummary>, ApiError> {
        Self::summarize(&state, DateWindow::between(start, end)).await
    }

    async fn summarize(
        state: &AppState,
        window: DateWindow,
    ) -> Result<Json<TemperatureSummary>, ApiError> {
        let aggregate = {
            let mut session = state.store.session().await?;
            session.temperature_aggregate(&window).await?
        };
        debug!("temperature summary for {:?}: {:?}", window, aggregate);

        let summary = aggregate.into_summary();
        if summary.is_empty() {
            debug!("no observations in window starting {}", window.start);
        }
        Ok(Json(summary))
    }
}
