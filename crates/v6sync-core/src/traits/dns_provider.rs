// # DNS Provider Trait
//
// Defines the interface for reading and modifying DNS records via a
// provider API.
//
// ## Implementations
//
// - DNSPod (Tencent Cloud): `v6sync-provider-dnspod` crate
//
// ## Usage
//
// ```rust,ignore
// use v6sync_core::{DnsProvider, UpdateBatch};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let records = provider.list_records("example.com").await?;
//
//     let batch = UpdateBatch::new([records[0].id], "2001:db8::1".parse()?);
//     let ack = provider.batch_update_records(&batch).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::net::Ipv6Addr;

/// Record type managed by v6sync
pub const AAAA_RECORD_TYPE: &str = "AAAA";

/// Field replaced by a batch update (whole value replacement)
pub const CHANGE_FIELD_VALUE: &str = "value";

/// Whether the provider is currently serving a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Enabled,
    Disabled,
}

/// One DNS record as known to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    /// Provider-assigned identifier, unique within the domain
    pub id: u64,
    /// Record type ("AAAA", "A", "CNAME", ...)
    pub record_type: String,
    /// Subdomain label ("www", "@")
    pub name: String,
    /// Value as stored remotely
    pub value: String,
    /// Enabled or disabled at the provider
    pub status: RecordStatus,
}

impl RemoteRecord {
    /// Whether the stored value already points at `address`
    ///
    /// Values that parse as IPv6 are compared as addresses, so differences
    /// in case or zero compression do not count as a mismatch. A value
    /// that does not parse never matches.
    pub fn points_at(&self, address: Ipv6Addr) -> bool {
        self.value
            .trim()
            .parse::<Ipv6Addr>()
            .is_ok_and(|stored| stored == address)
    }
}

/// The single mutation issued by a run
///
/// Record identifiers are kept sorted and unique regardless of the order
/// they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBatch {
    ids: Vec<u64>,
    change_to: Ipv6Addr,
}

impl UpdateBatch {
    /// Create a batch setting every listed record's value to `change_to`
    pub fn new(ids: impl IntoIterator<Item = u64>, change_to: Ipv6Addr) -> Self {
        let ids: BTreeSet<u64> = ids.into_iter().collect();
        Self {
            ids: ids.into_iter().collect(),
            change_to,
        }
    }

    /// Record identifiers to modify
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Field being replaced; always the record value
    pub fn change(&self) -> &'static str {
        CHANGE_FIELD_VALUE
    }

    /// New value for every listed record
    pub fn change_to(&self) -> Ipv6Addr {
        self.change_to
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Provider acknowledgment of a batch update
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgment {
    /// Provider request identifier
    pub request_id: String,
    /// Asynchronous job identifier, if the provider queues batch jobs
    pub job_id: Option<u64>,
    /// Raw response body, for observability
    pub raw: serde_json::Value,
}

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Parse provider-specific responses
/// - ✅ Return success or failure
///
/// ## Forbidden Capabilities
/// - ❌ Implement retry logic or backoff (a failure ends the run)
/// - ❌ Decide which records need an update (owned by the engine)
/// - ❌ Create or delete records
/// - ❌ Cache state beyond a single request
///
/// ## Error Reporting
///
/// - Transport failures map to [`crate::Error::ProviderUnreachable`]
/// - Provider-side errors map to [`crate::Error::ProviderRejected`] with the
///   provider's code and message preserved verbatim
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record in `domain`
    ///
    /// Read-only. Returns all records, of every type and status; the
    /// engine does the filtering.
    async fn list_records(&self, domain: &str) -> Result<Vec<RemoteRecord>, crate::Error>;

    /// Apply `batch` in one call
    ///
    /// Any error means the batch is not confirmed applied. The engine does
    /// not assume partial success.
    async fn batch_update_records(
        &self,
        batch: &UpdateBatch,
    ) -> Result<Acknowledgment, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
