// # Address Source Trait
//
// Defines the interface for enumerating the host's IPv6 addresses.
//
// ## Implementations
//
// - Interface enumeration: `v6sync-ip-local::InterfaceAddressSource`
// - Hostname lookup: `v6sync-ip-local::HostnameAddressSource`
//
// ## Usage
//
// ```rust,ignore
// use v6sync_core::{AddressSource, resolver};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* AddressSource implementation */;
//
//     // Every IPv6 address the host knows about, any scope
//     let all = source.candidates().await?;
//
//     // The one global address the engine will publish
//     let current = resolver::resolve(&source).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv6Addr;

/// Trait for local address source implementations
///
/// Sources are observers only: they report what the host has and never
/// decide which address is authoritative. Scope filtering and selection
/// belong to [`crate::resolver`].
///
/// # Constraints
///
/// - No network calls to remote services
/// - No retry or polling; a single enumeration per call
/// - Blocking OS calls are bounded by the OS, not by the source
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Enumerate the host's IPv6 addresses
    ///
    /// The returned list may contain addresses of any scope (loopback,
    /// link-local, ...) and may contain duplicates.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Ipv6Addr>)`: Every IPv6 address found, possibly empty
    /// - `Err(Error)`: If the OS enumeration itself failed
    async fn candidates(&self) -> Result<Vec<Ipv6Addr>, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
