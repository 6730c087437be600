//! Test doubles and common utilities for contract tests
//!
//! These doubles record how the engine drives them without doing any real
//! network or OS work.

#![allow(dead_code)]

use std::net::Ipv6Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use v6sync_core::error::{Error, Result};
use v6sync_core::traits::{
    Acknowledgment, AddressSource, DnsProvider, RecordStatus, RemoteRecord, UpdateBatch,
};
use v6sync_core::SyncConfig;

/// How a mock provider call should behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Unreachable,
    Rejected,
}

impl Behavior {
    fn into_result<T>(self, ok: T) -> Result<T> {
        match self {
            Behavior::Succeed => Ok(ok),
            Behavior::Unreachable => Err(Error::unreachable("mock", "connection refused")),
            Behavior::Rejected => Err(Error::rejected(
                "mock",
                "AuthFailure.SignatureFailure",
                "The provided credentials could not be validated.",
            )),
        }
    }
}

/// A mock DnsProvider that serves a fixed record set and tracks calls
pub struct MockDnsProvider {
    records: Vec<RemoteRecord>,
    list_behavior: Behavior,
    update_behavior: Behavior,
    /// Call counter for list_records()
    list_call_count: Arc<AtomicUsize>,
    /// Call counter for batch_update_records()
    update_call_count: Arc<AtomicUsize>,
    /// Domains passed to list_records()
    listed_domains: Arc<Mutex<Vec<String>>>,
    /// Batches passed to batch_update_records()
    batches: Arc<Mutex<Vec<UpdateBatch>>>,
}

impl MockDnsProvider {
    pub fn new(records: Vec<RemoteRecord>) -> Self {
        Self {
            records,
            list_behavior: Behavior::Succeed,
            update_behavior: Behavior::Succeed,
            list_call_count: Arc::new(AtomicUsize::new(0)),
            update_call_count: Arc::new(AtomicUsize::new(0)),
            listed_domains: Arc::new(Mutex::new(Vec::new())),
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_list_behavior(mut self, behavior: Behavior) -> Self {
        self.list_behavior = behavior;
        self
    }

    pub fn with_update_behavior(mut self, behavior: Behavior) -> Self {
        self.update_behavior = behavior;
        self
    }

    /// Create a provider that shares counters with an existing one
    ///
    /// The engine takes ownership of its provider; tests keep the first instance
    /// to inspect the counters afterwards.
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: other.records.clone(),
            list_behavior: other.list_behavior,
            update_behavior: other.update_behavior,
            list_call_count: Arc::clone(&other.list_call_count),
            update_call_count: Arc::clone(&other.update_call_count),
            listed_domains: Arc::clone(&other.listed_domains),
            batches: Arc::clone(&other.batches),
        }
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    pub fn listed_domains(&self) -> Vec<String> {
        self.listed_domains.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<UpdateBatch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<RemoteRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        self.listed_domains.lock().unwrap().push(domain.to_string());
        self.list_behavior.into_result(self.records.clone())
    }

    async fn batch_update_records(&self, batch: &UpdateBatch) -> Result<Acknowledgment> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(batch.clone());
        self.update_behavior.into_result(Acknowledgment {
            request_id: format!("req-{}", self.update_call_count()),
            job_id: Some(42),
            raw: serde_json::json!({ "JobId": 42 }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An address source that reports a fixed list
pub struct StaticAddressSource {
    addresses: Vec<Ipv6Addr>,
    call_count: Arc<AtomicUsize>,
}

impl StaticAddressSource {
    pub fn new(addresses: &[&str]) -> Self {
        Self {
            addresses: addresses.iter().map(|s| s.parse().unwrap()).collect(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AddressSource for StaticAddressSource {
    async fn candidates(&self) -> Result<Vec<Ipv6Addr>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.addresses.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// An address source whose OS enumeration fails
pub struct FailingAddressSource;

#[async_trait::async_trait]
impl AddressSource for FailingAddressSource {
    async fn candidates(&self) -> Result<Vec<Ipv6Addr>> {
        Err(Error::address_source("getifaddrs: permission denied"))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// Build a record
pub fn record(id: u64, record_type: &str, name: &str, value: &str, enabled: bool) -> RemoteRecord {
    RemoteRecord {
        id,
        record_type: record_type.to_string(),
        name: name.to_string(),
        value: value.to_string(),
        status: if enabled {
            RecordStatus::Enabled
        } else {
            RecordStatus::Disabled
        },
    }
}

/// Configuration used by the scenarios: example.com, subdomains {www, @}
pub fn scenario_config() -> SyncConfig {
    SyncConfig::new("example.com", "test-id", "test-secret", ["www", "@"])
        .expect("scenario config is valid")
}

pub fn addr(s: &str) -> Ipv6Addr {
    s.parse().expect("valid IPv6 literal")
}
