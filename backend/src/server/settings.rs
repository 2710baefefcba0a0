//! Server settings layered from CLI flags, `CIVICFLOW_*` environment
//! variables and configuration files via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use civicflow_backend::outbound::persistence::DEFAULT_MAX_CONNECTIONS;
use civicflow_backend::outbound::security::{
    DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_MINUTES, JwtConfig, MAX_TOKEN_TTL_MINUTES,
};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// `jwt_ttl_minutes` is outside the accepted range.
    #[error("jwt_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}, got {0}")]
    TokenTtl(i64),
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CIVICFLOW")]
pub struct Settings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. When absent the server keeps state in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// File holding the HS256 signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    /// `iss` claim for minted tokens.
    pub jwt_issuer: Option<String>,
    /// Token lifetime in minutes.
    pub jwt_ttl_minutes: Option<i64>,
    /// Permit a random signing key in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
}

impl Settings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to the persistence adapter's limit.
    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Token issuer settings.
    ///
    /// # Errors
    /// [`SettingsError::TokenTtl`] when the lifetime is not positive or
    /// exceeds [`MAX_TOKEN_TTL_MINUTES`].
    pub fn jwt_config(&self) -> Result<JwtConfig, SettingsError> {
        let minutes = self.jwt_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
            return Err(SettingsError::TokenTtl(minutes));
        }
        let ttl = Duration::try_minutes(minutes).ok_or(SettingsError::TokenTtl(minutes))?;
        Ok(JwtConfig {
            issuer: self
                .jwt_issuer
                .clone()
                .unwrap_or_else(|| DEFAULT_ISSUER.to_owned()),
            ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "CIVICFLOW_BIND_ADDR",
        "CIVICFLOW_DATABASE_URL",
        "CIVICFLOW_DATABASE_MAX_CONNECTIONS",
        "CIVICFLOW_JWT_SECRET_FILE",
        "CIVICFLOW_JWT_ISSUER",
        "CIVICFLOW_JWT_TTL_MINUTES",
        "CIVICFLOW_ALLOW_EPHEMERAL_KEY",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> Settings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        Settings::load_from_iter([OsString::from("civicflow")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let settings = load_with(&[]);
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.database_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(!settings.allow_ephemeral_key);
        assert_eq!(settings.jwt_config().expect("jwt"), JwtConfig::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("CIVICFLOW_BIND_ADDR", "127.0.0.1:9000"),
            ("CIVICFLOW_DATABASE_URL", "postgres://db/civicflow"),
            ("CIVICFLOW_DATABASE_MAX_CONNECTIONS", "4"),
            ("CIVICFLOW_JWT_ISSUER", "city-hall"),
            ("CIVICFLOW_JWT_TTL_MINUTES", "15"),
            ("CIVICFLOW_ALLOW_EPHEMERAL_KEY", "true"),
        ]);
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        assert_eq!(settings.database_url(), Some("postgres://db/civicflow"));
        assert_eq!(settings.database_max_connections(), 4);
        assert!(settings.allow_ephemeral_key);
        let jwt = settings.jwt_config().expect("jwt");
        assert_eq!(jwt.issuer, "city-hall");
        assert_eq!(jwt.ttl, Duration::minutes(15));
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let settings = load_with(&[("CIVICFLOW_DATABASE_URL", "  ")]);
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = load_with(&[("CIVICFLOW_BIND_ADDR", "not-an-addr")]);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("-30", -30)]
    #[case("1000000000000", 1_000_000_000_000)]
    #[case("9223372036854775807", i64::MAX)]
    fn out_of_range_ttl_is_rejected(#[case] raw: &str, #[case] expected: i64) {
        let settings = load_with(&[("CIVICFLOW_JWT_TTL_MINUTES", raw)]);
        assert!(matches!(
            settings.jwt_config(),
            Err(SettingsError::TokenTtl(minutes)) if minutes == expected
        ));
    }

    #[rstest]
    fn longest_ttl_still_issues_tokens() {
        use civicflow_backend::domain::Username;
        use civicflow_backend::domain::ports::TokenIssuer;
        use civicflow_backend::outbound::security::{JwtTokenIssuer, SigningKey};

        let max = MAX_TOKEN_TTL_MINUTES.to_string();
        let settings = load_with(&[("CIVICFLOW_JWT_TTL_MINUTES", max.as_str())]);
        let issuer = JwtTokenIssuer::new(
            &SigningKey::generate(),
            settings.jwt_config().expect("ten year lifetime"),
        );
        let ada = Username::new("ada").expect("username");
        let token = issuer.issue(&ada).expect("token issued");
        assert_eq!(issuer.verify(&token).expect("token verifies"), ada);
    }
}
