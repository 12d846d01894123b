//! Business logic for the social service.

pub mod auth;
pub mod friendships;
pub mod notifications;
pub mod posts;

pub use auth::AuthService;
pub use friendships::FriendshipError;
pub use notifications::NotificationError;
pub use posts::PostError;
