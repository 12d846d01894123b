//! Request extractors for the social service.

mod auth;

pub use auth::CurrentUser;
