pub mod argon2_hasher;
pub mod jwt_session_issuer;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_session_issuer::{Claims, JwtConfig, JwtSessionIssuer};
