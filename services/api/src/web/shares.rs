//! services/api/src/web/shares.rs
//!
//! Handlers for creating share links and resolving them for viewers.
//! Share records live in the share store under short random ids; email
//! notification is mocked and its failure never blocks link creation.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, NaiveDate, Utc};
use reflection_core::domain::{Category, Entry, ShareSettings};
use reflection_core::sharing::{share_link, share_notification};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Viewer-facing message for a missing or expired share.
const SHARE_UNAVAILABLE: &str = "This shared reflection is unavailable or has expired";

//=========================================================================================
// API Request/Response Payloads
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    pub entry_id: Uuid,
    pub settings: ShareSettings,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareResponse {
    pub share_id: String,
    pub share_link: String,
    pub expires_at: Option<DateTime<Utc>>,
    /// None when the share required no notifications.
    pub notifications_sent: Option<bool>,
}

/// The subset of an entry exposed to share-link viewers.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedEntryView {
    pub id: Uuid,
    pub date: NaiveDate,
    pub photo: String,
    pub thought: String,
    pub mood_score: f64,
    pub emotions: Vec<String>,
    pub tags: Vec<String>,
    pub category: Category,
}

impl From<&Entry> for SharedEntryView {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            photo: entry.photo.clone(),
            thought: entry.thought.clone(),
            mood_score: entry.mood_score,
            emotions: entry.emotions.clone(),
            tags: entry.tags.clone(),
            category: entry.category,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Share an entry: persist a share record, mark the entry shared, and
/// notify the allowed addresses by (mocked) email.
#[utoipa::path(
    post,
    path = "/shares",
    request_body = CreateShareRequest,
    responses(
        (status = 201, description = "Share created", body = CreateShareResponse),
        (status = 404, description = "No such entry"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_share_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateShareRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut entries = app_state.journal.entries().await.map_err(|e| {
        error!("Failed to load entries: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load entries".to_string(),
        )
    })?;
    let entry = entries
        .iter()
        .find(|entry| entry.id == req.entry_id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "No such entry".to_string()))?;

    let record = app_state
        .shares
        .create_share(entry.id, req.settings.clone())
        .await
        .map_err(|e| {
            error!("Failed to create share: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create share".to_string(),
            )
        })?;
    let link = share_link(&app_state.config.share_base_url, &record.share_id);

    // Record on the entry itself who it went to (whole-blob rewrite).
    if let Some(shared) = entries.iter_mut().find(|entry| entry.id == req.entry_id) {
        shared.is_shared = true;
        for email in &req.settings.allowed_emails {
            if !shared.shared_with.contains(email) {
                shared.shared_with.push(email.clone());
            }
        }
    }
    app_state.journal.replace(&entries).await.map_err(|e| {
        error!("Failed to update shared entry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to update shared entry".to_string(),
        )
    })?;

    // Private shares notify their allowed addresses. The first failed
    // send aborts the rest and is reported, not raised.
    let notifications_sent = if !req.settings.is_public && !req.settings.allowed_emails.is_empty()
    {
        let mut all_sent = true;
        for email in &req.settings.allowed_emails {
            let notification =
                share_notification(email, &link, &entry, req.settings.message.as_deref());
            if let Err(e) = app_state.email.send(&notification).await {
                error!("Failed to send share notification: {:?}", e);
                all_sent = false;
                break;
            }
        }
        Some(all_sent)
    } else {
        None
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateShareResponse {
            share_id: record.share_id,
            share_link: link,
            expires_at: record.expires_at,
            notifications_sent,
        }),
    ))
}

/// Resolve a share link for a viewer. Expired records are evicted on
/// access and read as missing.
#[utoipa::path(
    get,
    path = "/shares/{share_id}",
    params(
        ("share_id" = String, Path, description = "The short share id from the link")
    ),
    responses(
        (status = 200, description = "The shared entry", body = SharedEntryView),
        (status = 404, description = "Share missing or expired"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn resolve_share_handler(
    State(app_state): State<Arc<AppState>>,
    Path(share_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = app_state
        .shares
        .resolve_share(&share_id)
        .await
        .map_err(|e| {
            error!("Failed to resolve share: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve share".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, SHARE_UNAVAILABLE.to_string()))?;

    let entries = app_state.journal.entries().await.map_err(|e| {
        error!("Failed to load entries: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load entries".to_string(),
        )
    })?;
    let entry = entries
        .iter()
        .find(|entry| entry.id == record.entry_id)
        .ok_or((StatusCode::NOT_FOUND, SHARE_UNAVAILABLE.to_string()))?;

    Ok(Json(SharedEntryView::from(entry)))
}
