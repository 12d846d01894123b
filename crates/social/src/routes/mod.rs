//! HTTP route handlers for the social service.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /signup, /login
//! GET    /users/me
//!
//! # Posts
//! POST   /posts              GET /posts (own)
//! GET    /posts/{id}         PUT/DELETE /posts/{id} (author)
//!
//! # Likes & comments
//! POST   /like?post_id=      DELETE /like/{post_id}    GET /likes/{post_id}
//! POST   /comment?post_id=&comment=
//! GET    /comments/{post_id} PUT/DELETE /comment/{id} (author)
//!
//! # Notifications
//! GET    /notifications      POST /notifications?message=
//! PUT    /notifications/{id}/read
//! DELETE /notifications/{id}
//!
//! # Friends
//! POST   /friend-request?friend_id=
//! GET    /friend-requests
//! POST   /accept-friend-request?request_id=
//! POST   /reject-friend-request?request_id=
//! GET    /friends            DELETE /friends/{friend_id}
//! ```
//!
//! Everything except signup, login and the public post, like and comment
//! reads requires a bearer token.

pub mod auth;
pub mod friends;
pub mod notifications;
pub mod posts;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Signup and login. Rate limited separately by the caller.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::index).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::show).put(posts::update).delete(posts::destroy),
        )
        .route("/like", post(posts::like))
        .route("/like/{post_id}", delete(posts::unlike))
        .route("/likes/{post_id}", get(posts::likes))
        .route("/comment", post(posts::comment))
        .route(
            "/comment/{id}",
            put(posts::edit_comment).delete(posts::delete_comment),
        )
        .route("/comments/{post_id}", get(posts::comments))
}

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(notifications::index).post(notifications::create),
        )
        .route("/notifications/{id}/read", put(notifications::mark_read))
        .route("/notifications/{id}", delete(notifications::destroy))
}

pub fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friend-request", post(friends::send_request))
        .route("/friend-requests", get(friends::requests))
        .route("/accept-friend-request", post(friends::accept))
        .route("/reject-friend-request", post(friends::reject))
        .route("/friends", get(friends::index))
        .route("/friends/{friend_id}", delete(friends::unfriend))
}

/// All routes except signup/login.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(auth::me))
        .merge(post_routes())
        .merge(notification_routes())
        .merge(friend_routes())
}
