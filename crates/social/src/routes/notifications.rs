//! Notification handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use threefold_core::NotificationId;
use threefold_platform::http::{Message, PathParam, QueryParams, message};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Notification;
use crate::services::notifications;
use crate::state::AppState;

/// `?message=`
#[derive(Debug, Deserialize)]
pub struct NotifyQuery {
    pub message: String,
}

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Notification>>> {
    Ok(Json(notifications::inbox(state.pool(), user.id).await?))
}

/// Leave a notification for yourself.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<NotifyQuery>,
) -> Result<Json<Message>> {
    notifications::notify(state.pool(), user.id, &query.message).await?;
    Ok(message("Notification sent"))
}

pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<NotificationId>,
) -> Result<Json<Message>> {
    notifications::mark_read(state.pool(), user.id, id).await?;
    Ok(message("Marked as read"))
}

pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<NotificationId>,
) -> Result<Json<Message>> {
    notifications::dismiss(state.pool(), user.id, id).await?;
    Ok(message("Notification deleted"))
}
