//! Authentication primitives shared by the shop and social services.
//!
//! Passwords are hashed with Argon2id. Sessions are stateless HS256 JWTs
//! carried in `Authorization: Bearer <token>`.

mod error;
pub mod extract;
pub mod jwt;
pub mod password;

pub use error::{AuthError, TokenError};
pub use extract::{BearerClaims, BearerRejection};
pub use jwt::{Claims, JwtConfig, TokenService};
pub use password::{MIN_PASSWORD_LENGTH, hash_password, validate_password, verify_password};
