//! services/api/src/web/insights.rs
//!
//! Handlers for the analytics ("insights") and weekly/monthly summary
//! views. Every response is derived from the full collection on each
//! request; nothing here is cached or persisted.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use reflection_core::domain::{
    CategoryShare, Entry, FrequencyCount, MonthlyAverage, MonthlyReflection, Overview,
    WeeklyReflection,
};
use reflection_core::report::{self, FrequencyField};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// How many ranked emotions/tags the insights view shows.
const TOP_K: usize = 5;

//=========================================================================================
// API Response Payloads
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub overview: Overview,
    pub top_emotions: Vec<FrequencyCount>,
    pub top_tags: Vec<FrequencyCount>,
    pub category_distribution: Vec<CategoryShare>,
    pub monthly_averages: Vec<MonthlyAverage>,
}

#[derive(Serialize, ToSchema)]
pub struct BusinessInsightsResponse {
    pub insights: Vec<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// The analytics rollup: averages, trend, rankings, distributions.
#[utoipa::path(
    get,
    path = "/insights",
    responses(
        (status = 200, description = "Aggregate statistics over all entries", body = InsightsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn insights_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = load_entries(&app_state).await?;
    Ok(Json(InsightsResponse {
        overview: report::overview(&entries),
        top_emotions: report::top_frequencies(&entries, FrequencyField::Emotions, TOP_K),
        top_tags: report::top_frequencies(&entries, FrequencyField::Tags, TOP_K),
        category_distribution: report::category_distribution(&entries),
        monthly_averages: report::monthly_averages(&entries),
    }))
}

/// Threshold-gated advisory strings.
#[utoipa::path(
    get,
    path = "/insights/business",
    responses(
        (status = 200, description = "Business insight strings", body = BusinessInsightsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn business_insights_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = load_entries(&app_state).await?;
    Ok(Json(BusinessInsightsResponse {
        insights: report::business_insights(&entries),
    }))
}

/// Per-week rollups, newest week first.
#[utoipa::path(
    get,
    path = "/reflections/weekly",
    responses(
        (status = 200, description = "Weekly reflection summaries", body = [WeeklyReflection]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn weekly_reflections_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = load_entries(&app_state).await?;
    Ok(Json(report::weekly_reflections(&entries)))
}

/// Per-month rollups, newest month first.
#[utoipa::path(
    get,
    path = "/reflections/monthly",
    responses(
        (status = 200, description = "Monthly reflection summaries", body = [MonthlyReflection]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn monthly_reflections_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = load_entries(&app_state).await?;
    Ok(Json(report::monthly_reflections(&entries)))
}

async fn load_entries(app_state: &AppState) -> Result<Vec<Entry>, (StatusCode, String)> {
    app_state.journal.entries().await.map_err(|e| {
        error!("Failed to load entries: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load entries".to_string(),
        )
    })
}
