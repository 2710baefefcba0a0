//! Token signing key loading and fingerprinting.
//!
//! Release builds read the HS256 secret from a key file and refuse keys that
//! are too short. Debug builds, or deployments that opt in explicitly, fall
//! back to a random per-process key with a warning; tokens then stop
//! verifying after a restart.

use std::path::{Path, PathBuf};

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

/// Default location of the signing key when none is configured.
pub const SIGNING_KEY_DEFAULT_PATH: &str = "/var/run/secrets/jwt_signing_key";
/// Minimum key length accepted in release builds (256 bits for HS256).
pub const SIGNING_KEY_MIN_LEN: usize = 32;
/// Length of generated ephemeral keys.
const EPHEMERAL_KEY_LEN: usize = 64;
/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for signing key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require a valid key file unless explicitly overridden.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use civicflow_backend::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the signing key.
#[derive(thiserror::Error, Debug)]
pub enum SigningKeyError {
    /// Reading the key file failed and no fallback was permitted.
    #[error("failed to read signing key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file exists but is too short for release builds.
    #[error("signing key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// HMAC secret used to sign bearer tokens. Zeroized on drop.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Wrap raw key material.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generate a random key from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Borrow the key material.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Truncated SHA-256 fingerprint of the key material.
    ///
    /// Returns the first 8 bytes of the digest as 16 lower-case hex
    /// characters, enough to tell keys apart in logs without exposing them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use civicflow_backend::outbound::security::SigningKey;
    ///
    /// let fp = SigningKey::generate().fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey({})", self.fingerprint())
    }
}

/// Load the signing key from `key_file` (or the default path).
///
/// # Examples
///
/// ```rust
/// use civicflow_backend::outbound::security::{BuildMode, load_signing_key};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("jwt_signing_key_example");
/// std::fs::write(&key_path, vec![b'k'; 32])?;
///
/// let key = load_signing_key(Some(&key_path), false, BuildMode::Release)?;
/// assert_eq!(key.as_bytes().len(), 32);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn load_signing_key(
    key_file: Option<&Path>,
    allow_ephemeral: bool,
    mode: BuildMode,
) -> Result<SigningKey, SigningKeyError> {
    let path = key_file.map_or_else(|| PathBuf::from(SIGNING_KEY_DEFAULT_PATH), Path::to_path_buf);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SIGNING_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SigningKeyError::KeyTooShort {
                    path,
                    length,
                    min_len: SIGNING_KEY_MIN_LEN,
                });
            }
            Ok(SigningKey::from_bytes(bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary signing key; tokens will not survive a restart"
                );
                Ok(SigningKey::generate())
            } else {
                Err(SigningKeyError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
