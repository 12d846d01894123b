//! Domain types for the social service.

pub mod engagement;
pub mod friendship;
pub mod notification;
pub mod post;
pub mod user;

pub use engagement::{Comment, Like};
pub use friendship::Friendship;
pub use notification::Notification;
pub use post::{NewPost, Post};
pub use user::User;
