//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the entry endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use reflection_core::domain::{Category, Entry, Priority};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::auth::signup_handler,
        list_entries_handler,
        create_entry_handler,
        todays_entry_handler,
        delete_entry_handler,
        crate::web::insights::insights_handler,
        crate::web::insights::business_insights_handler,
        crate::web::insights::weekly_reflections_handler,
        crate::web::insights::monthly_reflections_handler,
        crate::web::shares::create_share_handler,
        crate::web::shares::resolve_share_handler,
    ),
    components(
        schemas(
            crate::web::auth::LoginRequest,
            crate::web::auth::SignupRequest,
            crate::web::auth::AuthResponse,
            CreateEntryRequest,
            Entry,
            crate::web::insights::InsightsResponse,
            crate::web::insights::BusinessInsightsResponse,
            crate::web::shares::CreateShareRequest,
            crate::web::shares::CreateShareResponse,
            crate::web::shares::SharedEntryView,
        )
    ),
    tags(
        (name = "Reflection Journal API", description = "API endpoints for the daily reflection journal.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request Payloads
//=========================================================================================

/// The payload for creating today's entry. Scores, emotions, tags, and
/// the summary are produced server-side by the analyzer.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub photo: String,
    pub thought: String,
    #[serde(default)]
    pub gratitude_items: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List all entries, newest first.
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "The full entry collection", body = [Entry]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_entries_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = app_state.journal.entries().await.map_err(|e| {
        error!("Failed to load entries: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load entries".to_string(),
        )
    })?;
    Ok(Json(entries))
}

/// Create today's reflection entry.
///
/// The thought is analyzed on the way in: emotion labels, tags, a summary
/// sentence, and the four scores are derived once here and frozen into
/// the entry. One entry per calendar day.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = Entry),
        (status = 409, description = "An entry already exists for today"),
        (status = 422, description = "Missing photo or thought"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.thought.trim().is_empty() || req.photo.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Both a photo and a thought are required".to_string(),
        ));
    }

    let can_create = app_state.journal.can_create_today().await.map_err(|e| {
        error!("Failed to check today's entry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to check today's entry".to_string(),
        )
    })?;
    if !can_create {
        return Err((
            StatusCode::CONFLICT,
            "An entry already exists for today".to_string(),
        ));
    }

    // Simulated processing latency: a fixed pause with no side effects,
    // no cancellation, no retry.
    tokio::time::sleep(Duration::from_millis(app_state.config.processing_delay_ms)).await;

    let analysis = app_state.analyzer.analyze(&req.thought);
    let tags = app_state.analyzer.suggest_tags(&req.thought);
    let ai_summary = app_state.analyzer.summarize(&analysis.primary);

    let mut emotions = vec![analysis.primary.clone()];
    emotions.extend(analysis.secondary.iter().cloned());

    let now = app_state.clock.now();
    let entry = Entry {
        id: Uuid::new_v4(),
        date: now.date_naive(),
        photo: req.photo,
        thought: req.thought,
        emotions,
        tags,
        ai_summary,
        mood_score: analysis.mood_score,
        energy_level: analysis.energy_level,
        stress_level: analysis.stress_level,
        productivity_score: analysis.productivity_score,
        gratitude_items: req.gratitude_items,
        goals: req.goals,
        achievements: req.achievements,
        challenges: req.challenges,
        learnings: req.learnings,
        action_items: req.action_items,
        created_at: now,
        is_shared: false,
        shared_with: Vec::new(),
        category: req.category,
        priority: req.priority,
    };

    app_state.journal.add_entry(entry.clone()).await.map_err(|e| {
        error!("Failed to save entry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save entry".to_string(),
        )
    })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Fetch today's entry, if one exists.
#[utoipa::path(
    get,
    path = "/entries/today",
    responses(
        (status = 200, description = "Today's entry", body = Entry),
        (status = 404, description = "No entry yet today"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn todays_entry_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = app_state.journal.todays_entry().await.map_err(|e| {
        error!("Failed to load today's entry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load today's entry".to_string(),
        )
    })?;
    match entry {
        Some(entry) => Ok(Json(entry)),
        None => Err((StatusCode::NOT_FOUND, "No entry yet today".to_string())),
    }
}

/// Delete an entry by id.
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "The entry to delete")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "No such entry"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = app_state.journal.entries().await.map_err(|e| {
        error!("Failed to load entries: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load entries".to_string(),
        )
    })?;
    if !entries.iter().any(|entry| entry.id == id) {
        return Err((StatusCode::NOT_FOUND, "No such entry".to_string()));
    }

    app_state.journal.delete_entry(id).await.map_err(|e| {
        error!("Failed to delete entry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete entry".to_string(),
        )
    })?;
    Ok(StatusCode::NO_CONTENT)
}
