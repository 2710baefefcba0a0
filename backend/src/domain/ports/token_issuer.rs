//! Port for issuing and verifying bearer tokens.

use crate::domain::Username;

use super::define_port_error;

define_port_error! {
    /// Failures raised by token issuer adapters.
    pub enum TokenError {
        /// Token expiry has passed.
        Expired => "token has expired",
        /// Signature, issuer or claim shape is wrong.
        Invalid { message: String } => "token is invalid: {message}",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Port for minting and checking signed tokens carrying a username claim.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Mint a token whose subject is `username`.
    fn issue(&self, username: &Username) -> Result<String, TokenError>;

    /// Verify a token and return the username it asserts.
    fn verify(&self, token: &str) -> Result<Username, TokenError>;
}
