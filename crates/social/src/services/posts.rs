//! Posts, likes and comments.
//!
//! A missing post is 404; an existing post (or comment) written by someone
//! else is 403.

use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{CommentId, PostId, UserId};

use crate::db::{self, RepositoryError};
use crate::models::{Comment, Like, Post};

/// Errors from post, like and comment operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// The caller is not the author.
    #[error("Permission denied")]
    Forbidden,

    /// Content or comment text is blank.
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

fn non_empty<'a>(text: &'a str, what: &'static str) -> Result<&'a str, PostError> {
    let text = text.trim();
    if text.is_empty() {
        Err(PostError::Empty(what))
    } else {
        Ok(text)
    }
}

/// Load a post the caller wrote.
async fn owned_post(pool: &SqlitePool, user_id: UserId, id: PostId) -> Result<Post, PostError> {
    let post = get_post(pool, id).await?;
    if post.user_id != user_id {
        return Err(PostError::Forbidden);
    }
    Ok(post)
}

/// Load a comment the caller wrote.
async fn owned_comment(
    pool: &SqlitePool,
    user_id: UserId,
    id: CommentId,
) -> Result<Comment, PostError> {
    let comment = db::comments::get(pool, id)
        .await?
        .ok_or(PostError::CommentNotFound)?;
    if comment.user_id != user_id {
        return Err(PostError::Forbidden);
    }
    Ok(comment)
}

/// # Errors
///
/// Returns `PostError::Empty` for blank content.
pub async fn create_post(pool: &SqlitePool, author: UserId, content: &str) -> Result<Post, PostError> {
    let content = non_empty(content, "Content")?;
    Ok(db::posts::create(pool, author, content).await?)
}

/// # Errors
///
/// Returns `PostError::PostNotFound` if it does not exist.
pub async fn get_post(pool: &SqlitePool, id: PostId) -> Result<Post, PostError> {
    db::posts::get(pool, id).await?.ok_or(PostError::PostNotFound)
}

/// The caller's posts.
///
/// # Errors
///
/// Returns `PostError::Repository` if the query fails.
pub async fn posts_by(pool: &SqlitePool, author: UserId) -> Result<Vec<Post>, PostError> {
    Ok(db::posts::by_author(pool, author).await?)
}

/// Replace the content of the caller's post.
///
/// # Errors
///
/// Returns `PostError::PostNotFound`, `PostError::Forbidden` for someone
/// else's post, or `PostError::Empty` for blank content.
#[tracing::instrument(skip(pool, content))]
pub async fn update_post(
    pool: &SqlitePool,
    user_id: UserId,
    id: PostId,
    content: &str,
) -> Result<Post, PostError> {
    let content = non_empty(content, "Content")?;
    owned_post(pool, user_id, id).await?;
    Ok(db::posts::update_content(pool, id, content).await?)
}

/// Delete the caller's post.
///
/// # Errors
///
/// Returns `PostError::PostNotFound` or `PostError::Forbidden`.
#[tracing::instrument(skip(pool))]
pub async fn delete_post(pool: &SqlitePool, user_id: UserId, id: PostId) -> Result<(), PostError> {
    owned_post(pool, user_id, id).await?;
    Ok(db::posts::delete(pool, id).await?)
}

/// # Errors
///
/// Returns `PostError::PostNotFound` or `PostError::AlreadyLiked`.
pub async fn like(pool: &SqlitePool, user_id: UserId, post_id: PostId) -> Result<Like, PostError> {
    get_post(pool, post_id).await?;
    db::likes::create(pool, user_id, post_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => PostError::AlreadyLiked,
            other => PostError::Repository(other),
        })
}

/// Remove the caller's like. Succeeds whether or not there was one.
///
/// # Errors
///
/// Returns `PostError::Repository` if the delete fails.
pub async fn unlike(pool: &SqlitePool, user_id: UserId, post_id: PostId) -> Result<(), PostError> {
    db::likes::delete(pool, user_id, post_id).await?;
    Ok(())
}

/// # Errors
///
/// Returns `PostError::Repository` if the query fails.
pub async fn likes(pool: &SqlitePool, post_id: PostId) -> Result<Vec<Like>, PostError> {
    Ok(db::likes::for_post(pool, post_id).await?)
}

/// # Errors
///
/// Returns `PostError::PostNotFound` or `PostError::Empty`.
pub async fn comment(
    pool: &SqlitePool,
    user_id: UserId,
    post_id: PostId,
    text: &str,
) -> Result<Comment, PostError> {
    let text = non_empty(text, "Comment")?;
    get_post(pool, post_id).await?;
    Ok(db::comments::create(pool, user_id, post_id, text).await?)
}

/// # Errors
///
/// Returns `PostError::Repository` if the query fails.
pub async fn comments(pool: &SqlitePool, post_id: PostId) -> Result<Vec<Comment>, PostError> {
    Ok(db::comments::for_post(pool, post_id).await?)
}

/// Edit the caller's comment.
///
/// # Errors
///
/// Returns `PostError::CommentNotFound`, `PostError::Forbidden` or
/// `PostError::Empty`.
pub async fn edit_comment(
    pool: &SqlitePool,
    user_id: UserId,
    id: CommentId,
    text: &str,
) -> Result<Comment, PostError> {
    let text = non_empty(text, "Comment")?;
    owned_comment(pool, user_id, id).await?;
    Ok(db::comments::update_text(pool, id, text).await?)
}

/// Delete the caller's comment.
///
/// # Errors
///
/// Returns `PostError::CommentNotFound` or `PostError::Forbidden`.
pub async fn delete_comment(
    pool: &SqlitePool,
    user_id: UserId,
    id: CommentId,
) -> Result<(), PostError> {
    owned_comment(pool, user_id, id).await?;
    Ok(db::comments::delete(pool, id).await?)
}
