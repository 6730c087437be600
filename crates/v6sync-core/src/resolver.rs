//! Local address resolution
//!
//! Picks the one IPv6 address a run publishes. Sources may report any
//! number of addresses of any scope; only global-scope addresses are
//! considered. Native addresses are preferred over 6to4 relay addresses,
//! and among equals the numerically smallest wins so that repeated runs on
//! an unchanged host pick the same address.

use std::net::Ipv6Addr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::AddressSource;

/// Resolve the authoritative local address from `source`
///
/// # Returns
///
/// - `Ok(Ipv6Addr)`: The selected global address
/// - `Err(Error::NoAddressFound)`: No global address exists
/// - `Err(Error)`: The source itself failed
pub async fn resolve(source: &dyn AddressSource) -> Result<Ipv6Addr> {
    let candidates = source.candidates().await?;
    debug!(
        "{} address source reported {} IPv6 address(es)",
        source.source_name(),
        candidates.len()
    );

    select(&candidates).ok_or_else(|| {
        Error::no_address(format!(
            "{} address source reported {} IPv6 address(es), none of global scope",
            source.source_name(),
            candidates.len()
        ))
    })
}

/// Select the representative global address from `candidates`
///
/// Native addresses win over 6to4 relay addresses; within each group the
/// numerically smallest is chosen.
pub fn select(candidates: &[Ipv6Addr]) -> Option<Ipv6Addr> {
    candidates
        .iter()
        .copied()
        .filter(is_global)
        .min_by_key(|addr| (is_6to4(addr), *addr))
}

/// Whether `addr` is routable on the public Internet
///
/// Excludes unspecified, loopback, IPv4-mapped, NAT64 local-use,
/// discard-only, IETF protocol assignments (Teredo included),
/// documentation, unique-local, link-local, site-local and multicast
/// ranges. 6to4 addresses count as global.
pub fn is_global(addr: &Ipv6Addr) -> bool {
    let seg = addr.segments();

    if addr.is_unspecified() || addr.is_loopback() || addr.is_multicast() {
        return false;
    }

    // ::ffff:0:0/96
    if addr.to_ipv4_mapped().is_some() {
        return false;
    }

    // 64:ff9b:1::/48
    if seg[0] == 0x0064 && seg[1] == 0xff9b && seg[2] == 0x0001 {
        return false;
    }

    // 100::/64
    if seg[0] == 0x0100 && seg[1] == 0 && seg[2] == 0 && seg[3] == 0 {
        return false;
    }

    // 2001::/23, minus the assignments that are globally reachable
    if seg[0] == 0x2001 && seg[1] < 0x0200 {
        return is_global_protocol_assignment(addr);
    }

    // 2001:db8::/32
    if seg[0] == 0x2001 && seg[1] == 0x0db8 {
        return false;
    }

    // 3fff::/20
    if seg[0] == 0x3fff && seg[1] & 0xf000 == 0 {
        return false;
    }

    // fc00::/7
    if seg[0] & 0xfe00 == 0xfc00 {
        return false;
    }

    // fe80::/10 and fec0::/10
    if seg[0] & 0xffc0 == 0xfe80 || seg[0] & 0xffc0 == 0xfec0 {
        return false;
    }

    true
}

/// Globally reachable exceptions inside 2001::/23
fn is_global_protocol_assignment(addr: &Ipv6Addr) -> bool {
    let seg = addr.segments();

    // 2001:1::1 and 2001:1::2
    if *addr == Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 1)
        || *addr == Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 2)
    {
        return true;
    }

    // 2001:3::/32 (AMT), 2001:4:112::/48 (AS112), 2001:20::/28 and 2001:30::/28
    seg[1] == 0x0003
        || (seg[1] == 0x0004 && seg[2] == 0x0112)
        || seg[1] & 0xfff0 == 0x0020
        || seg[1] & 0xfff0 == 0x0030
}

/// Whether `addr` is a 6to4 relay address (2002::/16)
pub fn is_6to4(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] == 0x2002
}
