//! Error types for v6sync
//!
//! Every failure the engine can surface is one of these variants. The CLI
//! maps them to exit codes; the engine itself never prints or exits.

use thiserror::Error;

/// Result type alias for v6sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// The host has no globally routable IPv6 address
    #[error("No global IPv6 address found: {0}")]
    NoAddressFound(String),

    /// A required configuration key is absent or empty
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// The provider could not be reached (network, timeout, HTTP status)
    #[error("Provider {provider} unreachable: {message}")]
    ProviderUnreachable {
        /// Provider name
        provider: String,
        /// Transport diagnostic
        message: String,
    },

    /// The provider answered with an error (bad credentials, unknown domain, ...)
    #[error("Provider {provider} rejected the request [{code}]: {message}")]
    ProviderRejected {
        /// Provider name
        provider: String,
        /// Provider error code, kept verbatim
        code: String,
        /// Provider error message, kept verbatim
        message: String,
    },

    /// Local address enumeration failed at the OS level
    #[error("Address source error: {0}")]
    AddressSource(String),

    /// I/O errors (reading the config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a "no address" error
    pub fn no_address(msg: impl Into<String>) -> Self {
        Self::NoAddressFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(msg.into())
    }

    /// Create a transport-level provider error
    pub fn unreachable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnreachable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a provider rejection error
    pub fn rejected(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ProviderRejected {
            provider: provider.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an address source error
    pub fn address_source(msg: impl Into<String>) -> Self {
        Self::AddressSource(msg.into())
    }

    /// Whether this error happened before any work could start
    ///
    /// Configuration problems (including an unreadable config file) are
    /// reported with a distinct exit code by the CLI.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigurationInvalid(_) | Self::Io(_))
    }

    /// Whether this error came from the DNS provider
    pub fn is_provider(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnreachable { .. } | Self::ProviderRejected { .. }
        )
    }
}
