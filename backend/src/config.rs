//! Runtime configuration for the vendor master data service.
//!
//! Settings are loaded through OrthoConfig from environment variables carrying
//! the `VENDOR_MDM_` prefix; command-line flags and configuration files share
//! the same keys. Validation that depends on the build mode, such as the
//! signing key requirements, lives here so it can be tested in isolation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

const TOKEN_KEY_DEFAULT_PATH: &str = "/var/run/secrets/token_signing_key";
const TOKEN_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Length of the key fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing signing key and emit warnings.
    Debug,
    /// Release builds require a readable signing key of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::config::BuildMode;
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

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading the token signing key file failed.
    #[error("failed to read token signing key at {path}: {source}")]
    KeyRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The signing key file exists but is too short for release builds.
    #[error("token signing key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Path that was read.
        path: PathBuf,
        /// Observed key length in bytes.
        length: usize,
        /// Minimum acceptable length in bytes.
        min_len: usize,
    },
    /// The configured bind address is not a valid socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Value that failed to parse.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// Bootstrap admin credentials are only partially configured.
    #[error("bootstrap admin requires both email and password")]
    BootstrapAdminIncomplete,
}

/// Credentials used to seed the first administrator account at startup.
#[derive(Clone, Debug)]
pub struct BootstrapAdmin {
    /// Login email for the seeded administrator.
    pub email: String,
    /// Plaintext password, zeroised on drop.
    pub password: Zeroizing<String>,
}

/// Service settings sourced from the environment.
///
/// Every field maps to a `VENDOR_MDM_*` environment variable. Optional
/// backing services degrade gracefully: without a database URL the service
/// runs on fixture adapters, and without a Redis URL snapshot caching falls
/// back to a process-local store.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VENDOR_MDM")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Redis connection URL for the snapshot cache.
    pub redis_url: Option<String>,
    /// Path to the file holding the token signing secret.
    pub token_key_file: Option<PathBuf>,
    /// Access token lifetime in minutes.
    #[ortho_config(default = 15)]
    pub access_token_ttl_minutes: u64,
    /// Tolerate an unreadable signing key file by generating an ephemeral key.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
    /// Email address for the bootstrap administrator account.
    pub bootstrap_admin_email: Option<String>,
    /// Password for the bootstrap administrator account.
    pub bootstrap_admin_password: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("redis_url", &self.redis_url)
            .field("token_key_file", &self.token_key_file)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("allow_ephemeral_key", &self.allow_ephemeral_key)
            .field("bootstrap_admin_email", &self.bootstrap_admin_email)
            .field(
                "bootstrap_admin_password",
                &self.bootstrap_admin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] when the configured value is
    /// not a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ConfigError::InvalidBindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured signing key path, falling back to the default.
    #[must_use]
    pub fn token_key_path(&self) -> PathBuf {
        self.token_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(TOKEN_KEY_DEFAULT_PATH))
    }

    /// Return the access token lifetime as a duration.
    #[must_use]
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_minutes.saturating_mul(60))
    }

    /// Return the bootstrap admin credentials when both halves are present.
    ///
    /// # Errors
    /// Returns [`ConfigError::BootstrapAdminIncomplete`] when only one of the
    /// email and password is configured.
    pub fn bootstrap_admin(&self) -> Result<Option<BootstrapAdmin>, ConfigError> {
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(email), Some(password)) => Ok(Some(BootstrapAdmin {
                email: email.clone(),
                password: Zeroizing::new(password.clone()),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::BootstrapAdminIncomplete),
        }
    }
}

/// Load the token signing secret per build mode.
///
/// Release builds require the key file to exist and hold at least 32 bytes.
/// Debug builds, and release builds with
/// `allow_ephemeral` set, fall back to a freshly generated key when the file
/// is unreadable; tokens signed with an ephemeral key do not survive a
/// restart.
///
/// # Errors
/// Returns [`ConfigError::KeyRead`] when the file is unreadable and no
/// fallback applies, or [`ConfigError::KeyTooShort`] when a release key is
/// below the minimum length.
pub fn load_signing_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if mode == BuildMode::Release && bytes.len() < TOKEN_KEY_MIN_LEN {
                return Err(ConfigError::KeyTooShort {
                    path: path.to_owned(),
                    length: bytes.len(),
                    min_len: TOKEN_KEY_MIN_LEN,
                });
            }
            info!(
                path = %path.display(),
                fingerprint = %key_fingerprint(&bytes),
                "loaded token signing key"
            );
            Ok(bytes)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using ephemeral token signing key (dev only)"
                );
                let mut bytes = vec![0u8; EPHEMERAL_KEY_LEN];
                rand::thread_rng().fill_bytes(&mut bytes);
                Ok(Zeroizing::new(bytes))
            } else {
                Err(ConfigError::KeyRead {
                    path: path.to_owned(),
                    source: error,
                })
            }
        }
    }
}

/// Generate a truncated SHA-256 fingerprint of the signing key material.
///
/// Returns the first 8 bytes of the SHA-256 hash as a 16-character hex
/// string. This is sufficient for visual distinction in logs and rotation
/// runbooks without being security-sensitive.
///
/// # Examples
///
/// ```rust
/// use backend::config::key_fingerprint;
///
/// let fp = key_fingerprint(b"super secret signing key material");
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(secret: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    let result = hasher.finalize();
    hex::encode(&result[..FINGERPRINT_BYTES])
}
