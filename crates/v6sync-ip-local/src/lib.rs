// # Local Address Sources
//
// This crate provides the two ways v6sync learns the host's IPv6
// addresses. Neither makes a network call to a remote service.
//
// - `InterfaceAddressSource`: addresses bound to local interfaces
//   (getifaddrs via the `network-interface` crate), optionally restricted
//   to one interface.
// - `HostnameAddressSource`: addresses the system resolver returns for the
//   local hostname. Lookup time is bounded by the resolver configuration.
//
// Both report every IPv6 address they see; scope filtering and selection
// happen in `v6sync_core::resolver`. The one exception: on Linux the
// interface source drops addresses the kernel marks deprecated, so an
// old prefix kept alive after a renumbering is never published. getifaddrs
// carries no lifetime state, so elsewhere deprecated addresses are
// reported like any other.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use async_trait::async_trait;
use network_interface::{Addr, NetworkInterface, NetworkInterfaceConfig};
use tracing::debug;
use v6sync_core::traits::AddressSource;
use v6sync_core::{Error, Result};

/// Which address source to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressSourceKind {
    /// Enumerate interface addresses
    #[default]
    Interface,
    /// Resolve the local hostname
    Hostname,
}

impl FromStr for AddressSourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "interface" => Ok(Self::Interface),
            "hostname" => Ok(Self::Hostname),
            other => Err(Error::config(format!(
                "address source '{}' is not supported. Supported sources: interface, hostname",
                other
            ))),
        }
    }
}

/// Build the address source for `kind`
///
/// `interface` only applies to [`AddressSourceKind::Interface`].
pub fn create(kind: AddressSourceKind, interface: Option<String>) -> Box<dyn AddressSource> {
    match kind {
        AddressSourceKind::Interface => Box::new(InterfaceAddressSource::new(interface)),
        AddressSourceKind::Hostname => Box::new(HostnameAddressSource),
    }
}

/// Addresses bound to local network interfaces
#[derive(Debug, Clone, Default)]
pub struct InterfaceAddressSource {
    interface: Option<String>,
}

impl InterfaceAddressSource {
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl AddressSource for InterfaceAddressSource {
    async fn candidates(&self) -> Result<Vec<Ipv6Addr>> {
        let interfaces = tokio::task::spawn_blocking(NetworkInterface::show)
            .await
            .map_err(|e| Error::address_source(format!("interface enumeration task failed: {}", e)))?
            .map_err(|e| Error::address_source(format!("failed to list network interfaces: {}", e)))?;

        let mut addrs = v6_addresses(&interfaces, self.interface.as_deref());

        let deprecated = deprecated_addresses().await;
        addrs.retain(|addr| {
            let keep = !deprecated.contains(addr);
            if !keep {
                debug!("Skipping deprecated address {}", addr);
            }
            keep
        });
        Ok(addrs)
    }

    fn source_name(&self) -> &'static str {
        "interface"
    }
}

fn v6_addresses(interfaces: &[NetworkInterface], only: Option<&str>) -> Vec<Ipv6Addr> {
    interfaces
        .iter()
        .filter(|iface| only.is_none_or(|name| iface.name == name))
        .flat_map(|iface| {
            iface.addr.iter().filter_map(move |addr| match addr {
                Addr::V6(v6) => {
                    debug!("{}: {}", iface.name, v6.ip);
                    Some(v6.ip)
                }
                Addr::V4(_) => None,
            })
        })
        .collect()
}

/// Kernel address table with per-address flags
#[cfg(target_os = "linux")]
const IF_INET6_PATH: &str = "/proc/net/if_inet6";

/// `IFA_F_DEPRECATED` from linux/if_addr.h
const IFA_F_DEPRECATED: u32 = 0x20;

/// Addresses the kernel currently marks deprecated
///
/// An unreadable table means nothing is known to be deprecated.
#[cfg(target_os = "linux")]
async fn deprecated_addresses() -> HashSet<Ipv6Addr> {
    match tokio::fs::read_to_string(IF_INET6_PATH).await {
        Ok(table) => parse_deprecated(&table),
        Err(e) => {
            debug!("Cannot read {}: {}", IF_INET6_PATH, e);
            HashSet::new()
        }
    }
}

#[cfg(not(target_os = "linux"))]
async fn deprecated_addresses() -> HashSet<Ipv6Addr> {
    HashSet::new()
}

/// Parse `/proc/net/if_inet6` rows and keep the deprecated addresses
///
/// Each row is `<32 hex digits> <ifindex> <prefixlen> <scope> <flags> <name>`,
/// numbers in hex.
fn parse_deprecated(table: &str) -> HashSet<Ipv6Addr> {
    table
        .lines()
        .filter_map(|row| {
            let fields: Vec<&str> = row.split_whitespace().collect();
            let [addr, _ifindex, _prefix, _scope, flags, ..] = fields.as_slice() else {
                return None;
            };
            let flags = u32::from_str_radix(flags, 16).ok()?;
            if flags & IFA_F_DEPRECATED == 0 || addr.len() != 32 {
                return None;
            }
            u128::from_str_radix(addr, 16).ok().map(Ipv6Addr::from)
        })
        .collect()
}

/// Addresses the system resolver returns for the local hostname
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameAddressSource;

#[async_trait]
impl AddressSource for HostnameAddressSource {
    async fn candidates(&self) -> Result<Vec<Ipv6Addr>> {
        let host = hostname()?;
        debug!("Resolving local hostname {}", host);

        let resolved = tokio::net::lookup_host((host.as_str(), 0))
            .await
            .map_err(|e| Error::address_source(format!("cannot resolve hostname {}: {}", host, e)))?;

        Ok(resolved
            .filter_map(|addr| match addr.ip() {
                IpAddr::V6(v6) => Some(v6),
                IpAddr::V4(_) => None,
            })
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "hostname"
    }
}

/// The local hostname
pub fn hostname() -> Result<String> {
    let name = gethostname::gethostname()
        .into_string()
        .map_err(|raw| Error::address_source(format!("hostname {:?} is not valid UTF-8", raw)))?;
    if name.is_empty() {
        return Err(Error::address_source("hostname is empty"));
    }
    Ok(name)
}
