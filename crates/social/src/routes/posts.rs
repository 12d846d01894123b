//! Post, like and comment handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use threefold_core::{CommentId, PostId};
use threefold_platform::http::{JsonBody, Message, PathParam, QueryParams, message};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{Comment, Like, NewPost, Post};
use crate::services::posts;
use crate::state::AppState;

/// `?post_id=`
#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub post_id: PostId,
}

/// `?post_id=&comment=`
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub post_id: PostId,
    pub comment: String,
}

/// Body of `PUT /comment/{id}`. Any `post_id` sent along is ignored.
#[derive(Debug, Deserialize)]
pub struct CommentEdit {
    pub comment: String,
}

#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(post): JsonBody<NewPost>,
) -> Result<Json<Post>> {
    Ok(Json(
        posts::create_post(state.pool(), user.id, &post.content).await?,
    ))
}

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(posts::posts_by(state.pool(), user.id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
) -> Result<Json<Post>> {
    Ok(Json(posts::get_post(state.pool(), id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<PostId>,
    JsonBody(post): JsonBody<NewPost>,
) -> Result<Json<Post>> {
    Ok(Json(
        posts::update_post(state.pool(), user.id, id, &post.content).await?,
    ))
}

pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<PostId>,
) -> Result<Json<Message>> {
    posts::delete_post(state.pool(), user.id, id).await?;
    Ok(message("Post deleted"))
}

pub async fn like(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<PostQuery>,
) -> Result<Json<Message>> {
    posts::like(state.pool(), user.id, query.post_id).await?;
    Ok(message("Post liked"))
}

pub async fn unlike(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(post_id): PathParam<PostId>,
) -> Result<Json<Message>> {
    posts::unlike(state.pool(), user.id, post_id).await?;
    Ok(message("Unliked"))
}

pub async fn likes(
    State(state): State<AppState>,
    PathParam(post_id): PathParam<PostId>,
) -> Result<Json<Vec<Like>>> {
    Ok(Json(posts::likes(state.pool(), post_id).await?))
}

pub async fn comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<CommentQuery>,
) -> Result<Json<Comment>> {
    Ok(Json(
        posts::comment(state.pool(), user.id, query.post_id, &query.comment).await?,
    ))
}

pub async fn comments(
    State(state): State<AppState>,
    PathParam(post_id): PathParam<PostId>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(posts::comments(state.pool(), post_id).await?))
}

pub async fn edit_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<CommentId>,
    JsonBody(edit): JsonBody<CommentEdit>,
) -> Result<Json<Comment>> {
    Ok(Json(
        posts::edit_comment(state.pool(), user.id, id, &edit.comment).await?,
    ))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<CommentId>,
) -> Result<Json<Message>> {
    posts::delete_comment(state.pool(), user.id, id).await?;
    Ok(message("Comment deleted"))
}
