//! Friend request and friendship handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use threefold_core::{FriendshipId, UserId};
use threefold_platform::http::{Message, PathParam, QueryParams, message};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Friendship;
use crate::services::friendships;
use crate::state::AppState;

/// `?friend_id=`
#[derive(Debug, Deserialize)]
pub struct FriendQuery {
    pub friend_id: UserId,
}

/// `?request_id=`
#[derive(Debug, Deserialize)]
pub struct RequestQuery {
    pub request_id: FriendshipId,
}

pub async fn send_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<FriendQuery>,
) -> Result<Json<Message>> {
    friendships::send_request(state.pool(), &user, query.friend_id).await?;
    Ok(message("Friend request sent"))
}

/// Pending requests addressed to the caller.
pub async fn requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Friendship>>> {
    Ok(Json(friendships::pending_requests(state.pool(), user.id).await?))
}

pub async fn accept(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<RequestQuery>,
) -> Result<Json<Message>> {
    friendships::accept(state.pool(), &user, query.request_id).await?;
    Ok(message("Friend request accepted"))
}

pub async fn reject(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<RequestQuery>,
) -> Result<Json<Message>> {
    friendships::reject(state.pool(), &user, query.request_id).await?;
    Ok(message("Friend request rejected"))
}

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Friendship>>> {
    Ok(Json(friendships::friends(state.pool(), user.id).await?))
}

pub async fn unfriend(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(friend_id): PathParam<UserId>,
) -> Result<Json<Message>> {
    friendships::unfriend(state.pool(), user.id, friend_id).await?;
    Ok(message("Unfriended"))
}
