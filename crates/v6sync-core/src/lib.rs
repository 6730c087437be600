// # v6sync-core
//
// Core library for keeping DNS AAAA records in sync with the host's
// global IPv6 address.
//
// ## Architecture Overview
//
// - **AddressSource**: Trait for enumerating the host's IPv6 addresses
// - **resolver**: Global-scope filtering and deterministic address selection
// - **DnsProvider**: Trait for listing and batch-modifying records via a provider API
// - **SyncEngine** / **reconcile**: Fetch, diff, and apply at most one batch update
// - **SyncConfig**: Immutable per-run configuration
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **One-Shot**: Each invocation resolves, reads once, writes at most once
// 3. **No Hidden Retries**: A provider failure ends the run
// 4. **Library-First**: All core functionality can be used as a library
// 5. **Idempotency**: A run against an in-sync zone performs no write

pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod traits;

// Re-export core types for convenience
pub use config::SyncConfig;
pub use engine::{ReconcileOutcome, SyncEngine, SyncReport, reconcile};
pub use error::{Error, Result};
pub use traits::{
    Acknowledgment, AddressSource, DnsProvider, RecordStatus, RemoteRecord, UpdateBatch,
};
