//! Security adapters: password hashing and bearer token signing.

mod argon2_hasher;
mod jwt;
mod signing_key;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{
    DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_MINUTES, JwtConfig, JwtTokenIssuer, MAX_TOKEN_TTL_MINUTES,
};
pub use signing_key::{
    BuildMode, SIGNING_KEY_DEFAULT_PATH, SIGNING_KEY_MIN_LEN, SigningKey, SigningKeyError,
    load_signing_key,
};
