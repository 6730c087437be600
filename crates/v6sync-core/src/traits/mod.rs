//! Core traits for v6sync
//!
//! This module defines the abstract interfaces the engine consumes.
//!
//! - [`AddressSource`]: Enumerate the host's IPv6 addresses
//! - [`DnsProvider`]: List and batch-modify records via a provider API

pub mod address_source;
pub mod dns_provider;

pub use address_source::AddressSource;
pub use dns_provider::{
    Acknowledgment, DnsProvider, RecordStatus, RemoteRecord, UpdateBatch, AAAA_RECORD_TYPE,
    CHANGE_FIELD_VALUE,
};
