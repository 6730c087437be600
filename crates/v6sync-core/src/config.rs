//! Configuration for a sync run
//!
//! The configuration file is plain `key=value` text, one pair per line:
//!
//! ```text
//! domain=example.com
//! secretId=YOUR_ID
//! secretKey=YOUR_KEY
//! subdomains=www,@,mail
//! ```
//!
//! `credentialId` and `credentialSecret` are accepted as aliases for
//! `secretId` and `secretKey`. Blank lines and lines starting with `#`
//! are ignored.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Default location of the config file, next to the NetworkManager dispatcher hook
pub const DEFAULT_CONFIG_PATH: &str = "/etc/NetworkManager/dispatcher.d/ddns.d/ddns.conf";

const KEY_DOMAIN: &str = "domain";
const KEY_SECRET_ID: [&str; 2] = ["secretId", "credentialId"];
const KEY_SECRET_KEY: [&str; 2] = ["secretKey", "credentialSecret"];
const KEY_SUBDOMAINS: &str = "subdomains";

/// Immutable configuration for one invocation
///
/// Constructed once at startup and passed by reference into the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Zone managed at the provider (e.g. "example.com")
    pub domain: String,

    /// Provider credential identifier
    pub credential_id: String,

    /// Provider credential secret
    /// ⚠️ NEVER log this value
    pub credential_secret: String,

    /// Record names to keep in sync ("@" is the zone apex)
    pub subdomains: BTreeSet<String>,
}

// Custom Debug implementation that hides the credential secret
impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("domain", &self.domain)
            .field("credential_id", &self.credential_id)
            .field("credential_secret", &"<REDACTED>")
            .field("subdomains", &self.subdomains)
            .finish()
    }
}

impl SyncConfig {
    /// Create and validate a configuration
    pub fn new<I, S>(
        domain: impl Into<String>,
        credential_id: impl Into<String>,
        credential_secret: impl Into<String>,
        subdomains: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Self {
            domain: domain.into(),
            credential_id: credential_id.into(),
            credential_secret: credential_secret.into(),
            subdomains: subdomains.into_iter().map(Into::into).collect(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from a `key=value` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse the configuration from `key=value` text
    pub fn parse(text: &str) -> Result<Self> {
        let mut domain = None;
        let mut credential_id = None;
        let mut credential_secret = None;
        let mut subdomains = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!("Ignoring config line {} without '='", lineno + 1);
                continue;
            };
            let (key, value) = (key.trim(), value.trim().to_string());

            match key {
                KEY_DOMAIN => domain = Some(value),
                k if KEY_SECRET_ID.contains(&k) => credential_id = Some(value),
                k if KEY_SECRET_KEY.contains(&k) => credential_secret = Some(value),
                KEY_SUBDOMAINS => subdomains = Some(parse_subdomains(&value)),
                other => debug!("Ignoring unknown config key '{}'", other),
            }
        }

        let config = Self {
            domain: domain.ok_or_else(|| missing(KEY_DOMAIN))?,
            credential_id: credential_id.ok_or_else(|| missing(KEY_SECRET_ID[0]))?,
            credential_secret: credential_secret.ok_or_else(|| missing(KEY_SECRET_KEY[0]))?,
            subdomains: subdomains.ok_or_else(|| missing(KEY_SUBDOMAINS))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// All four fields must be present and non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            return Err(empty(KEY_DOMAIN));
        }
        if self.credential_id.is_empty() {
            return Err(empty(KEY_SECRET_ID[0]));
        }
        if self.credential_secret.is_empty() {
            return Err(empty(KEY_SECRET_KEY[0]));
        }
        if self.subdomains.is_empty() || self.subdomains.iter().any(String::is_empty) {
            return Err(empty(KEY_SUBDOMAINS));
        }
        Ok(())
    }

    /// Whether `name` is one of the configured subdomains
    pub fn manages(&self, name: &str) -> bool {
        self.subdomains.contains(name)
    }
}

fn parse_subdomains(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn missing(key: &str) -> Error {
    Error::config(format!("config file is missing '{}'", key))
}

fn empty(key: &str) -> Error {
    Error::config(format!("'{}' cannot be empty", key))
}
