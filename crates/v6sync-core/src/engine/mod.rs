//! Reconciliation engine
//!
//! The engine is responsible for:
//! - Resolving the authoritative local IPv6 address
//! - Fetching the provider's record set for the domain
//! - Selecting the records whose value is out of date
//! - Issuing at most one batch update
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐
//! │ AddressSource │─── Ipv6Addr ───┐
//! └───────────────┘                │
//!                                  ▼
//!                         ┌──────────────┐
//!     SyncConfig ────────▶│  SyncEngine  │
//!                         └──────────────┘
//!                                  │
//!                 ┌────────────────┴────────────────┐
//!                 ▼                                 ▼
//!        ┌─────────────────┐              ┌──────────────────┐
//!        │  list_records   │─── filter ──▶│ batch_update     │
//!        │  (always, once) │              │ (0 or 1 time)    │
//!        └─────────────────┘              └──────────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Resolve the local address (no provider call if this fails)
//! 2. Fetch every record in the domain
//! 3. Keep records that are AAAA, managed, enabled and out of date
//! 4. Nothing kept: in sync, no write
//! 5. Otherwise: one batch update to the local address, never retried

use std::net::Ipv6Addr;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::resolver;
use crate::traits::{
    AAAA_RECORD_TYPE, Acknowledgment, AddressSource, DnsProvider, RecordStatus, RemoteRecord,
    UpdateBatch,
};

/// Result of a reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// Every managed record already points at the local address
    InSync {
        /// Number of records returned by the provider
        examined: usize,
    },

    /// One batch update was applied
    Updated {
        /// The batch that was sent
        batch: UpdateBatch,
        /// The provider's response
        acknowledgment: Acknowledgment,
    },
}

impl ReconcileOutcome {
    /// Number of records changed by this run
    pub fn changed(&self) -> usize {
        match self {
            Self::InSync { .. } => 0,
            Self::Updated { batch, .. } => batch.len(),
        }
    }

    pub fn is_in_sync(&self) -> bool {
        matches!(self, Self::InSync { .. })
    }
}

/// Report of a full run (resolution + reconciliation)
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Address published by this run
    pub address: Ipv6Addr,
    /// What the engine did
    pub outcome: ReconcileOutcome,
}

/// Whether `record` must be rewritten to `current`
///
/// This is the only selection rule: the record is an AAAA record, its
/// name is a managed subdomain, it is enabled, and its value differs from
/// the local address.
pub fn is_eligible(record: &RemoteRecord, config: &SyncConfig, current: Ipv6Addr) -> bool {
    record.record_type == AAAA_RECORD_TYPE
        && config.manages(&record.name)
        && record.status == RecordStatus::Enabled
        && !record.points_at(current)
}

/// Select the records that need an update
pub fn select_candidates<'a>(
    records: &'a [RemoteRecord],
    config: &SyncConfig,
    current: Ipv6Addr,
) -> Vec<&'a RemoteRecord> {
    records
        .iter()
        .filter(|record| is_eligible(record, config, current))
        .collect()
}

/// Reconcile the provider's records for `config.domain` with `current`
///
/// Issues exactly one read and at most one write. Errors from either call
/// are returned as-is; nothing is retried.
pub async fn reconcile(
    config: &SyncConfig,
    current: Ipv6Addr,
    provider: &dyn DnsProvider,
) -> Result<ReconcileOutcome> {
    let records = provider.list_records(&config.domain).await?;
    debug!(
        "{} returned {} record(s) for {}",
        provider.provider_name(),
        records.len(),
        config.domain
    );

    let candidates = select_candidates(&records, config, current);
    if candidates.is_empty() {
        info!("All managed records already point at {}", current);
        return Ok(ReconcileOutcome::InSync {
            examined: records.len(),
        });
    }

    for record in &candidates {
        info!(
            "Record {} ({}.{}) is stale: {} -> {}",
            record.id, record.name, config.domain, record.value, current
        );
    }

    let batch = UpdateBatch::new(candidates.iter().map(|record| record.id), current);
    let acknowledgment = provider.batch_update_records(&batch).await?;
    info!(
        "Updated {} record(s) to {} (request {})",
        batch.len(),
        current,
        acknowledgment.request_id
    );

    Ok(ReconcileOutcome::Updated {
        batch,
        acknowledgment,
    })
}

/// One-shot sync engine
///
/// Owns the address source, the provider client and the configuration for
/// a single invocation.
///
/// ## Lifecycle
///
/// 1. Create with [`SyncEngine::new()`]
/// 2. Call [`SyncEngine::run_once()`], which consumes the engine
/// 3. The provider client is dropped when `run_once` returns, on every path
pub struct SyncEngine {
    /// Source of local addresses
    address_source: Box<dyn AddressSource>,

    /// DNS provider client
    provider: Box<dyn DnsProvider>,

    /// Domain, credentials and managed subdomains
    config: SyncConfig,
}

impl SyncEngine {
    /// Create a new engine
    ///
    /// # Returns
    ///
    /// - `Ok(SyncEngine)`: Ready to run
    /// - `Err(Error::ConfigurationInvalid)`: If `config` fails validation
    pub fn new(
        address_source: Box<dyn AddressSource>,
        provider: Box<dyn DnsProvider>,
        config: SyncConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            address_source,
            provider,
            config,
        })
    }

    /// Resolve the local address and reconcile the domain once
    pub async fn run_once(self) -> Result<SyncReport> {
        let address = resolver::resolve(self.address_source.as_ref()).await?;
        info!("Local IPv6 address: {}", address);
        info!(
            "Domain: {} (subdomains: {})",
            self.config.domain,
            self.config
                .subdomains
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",")
        );

        let outcome = reconcile(&self.config, address, self.provider.as_ref()).await?;
        Ok(SyncReport { address, outcome })
    }
}
