//! HS256 JWT adapter for the [`TokenIssuer`] port.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SigningKey;
use crate::domain::Username;
use crate::domain::ports::{TokenError, TokenIssuer};

/// Default token lifetime in minutes (24 hours).
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 24 * 60;
/// Longest accepted token lifetime in minutes (ten years).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 10 * 365 * 24 * 60;
/// Default `iss` claim.
pub const DEFAULT_ISSUER: &str = "civicflow";

/// Issuer and lifetime settings for minted tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    /// `iss` claim written on issue and required on verify.
    pub issuer: String,
    /// Lifetime added to the issue time to form `exp`.
    pub ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_owned(),
            ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    iss: String,
    jti: String,
}

/// Token issuer signing HS256 JWTs with a shared secret.
pub struct JwtTokenIssuer {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Create an issuer from a signing key and settings.
    pub fn new(key: &SigningKey, config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            config,
            validation,
        }
    }

    fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::expired(),
            _ => TokenError::invalid(error.to_string()),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, username: &Username) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.config.ttl)
            .ok_or_else(|| TokenError::signing("token lifetime overflows the calendar"))?;
        let claims = Claims {
            sub: username.as_str().to_owned(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Username, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(Self::map_decode_error)?;
        Username::new(data.claims.sub)
            .map_err(|err| TokenError::invalid(format!("subject claim rejected: {err}")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn key() -> SigningKey {
        SigningKey::from_bytes(vec![b'k'; 32])
    }

    fn ada() -> Username {
        Username::new("ada").expect("username")
    }

    #[rstest]
    fn issued_token_verifies_to_subject(key: SigningKey) {
        let issuer = JwtTokenIssuer::new(&key, JwtConfig::default());
        let token = issuer.issue(&ada()).expect("token issued");
        assert_eq!(issuer.verify(&token).expect("token verifies"), ada());
    }

    #[rstest]
    fn tokens_are_unique_per_issue(key: SigningKey) {
        let issuer = JwtTokenIssuer::new(&key, JwtConfig::default());
        let first = issuer.issue(&ada()).expect("first");
        let second = issuer.issue(&ada()).expect("second");
        assert_ne!(first, second);
    }

    #[rstest]
    fn rejects_token_signed_with_other_key(key: SigningKey) {
        let issuer = JwtTokenIssuer::new(&key, JwtConfig::default());
        let other = JwtTokenIssuer::new(
            &SigningKey::from_bytes(vec![b'x'; 32]),
            JwtConfig::default(),
        );
        let token = other.issue(&ada()).expect("token issued");
        assert!(matches!(
            issuer.verify(&token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn rejects_foreign_issuer(key: SigningKey) {
        let foreign = JwtTokenIssuer::new(
            &key,
            JwtConfig {
                issuer: "someone-else".to_owned(),
                ..JwtConfig::default()
            },
        );
        let issuer = JwtTokenIssuer::new(&key, JwtConfig::default());
        let token = foreign.issue(&ada()).expect("token issued");
        assert!(matches!(
            issuer.verify(&token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn rejects_expired_token(key: SigningKey) {
        let issuer = JwtTokenIssuer::new(
            &key,
            JwtConfig {
                ttl: Duration::minutes(-5),
                ..JwtConfig::default()
            },
        );
        let token = issuer.issue(&ada()).expect("token issued");
        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    fn overflowing_lifetime_is_a_signing_error(key: SigningKey) {
        let issuer = JwtTokenIssuer::new(
            &key,
            JwtConfig {
                ttl: Duration::MAX,
                ..JwtConfig::default()
            },
        );
        assert!(matches!(
            issuer.issue(&ada()),
            Err(TokenError::Signing { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    #[case("garbage")]
    fn rejects_malformed_tokens(key: SigningKey, #[case] token: &str) {
        let issuer = JwtTokenIssuer::new(&key, JwtConfig::default());
        assert!(matches!(issuer.verify(token), Err(TokenError::Invalid { .. })));
    }
}
