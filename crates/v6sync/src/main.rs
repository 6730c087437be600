// # v6sync - one-shot AAAA record sync
//
// This binary is a THIN integration layer: it reads runtime options,
// sets up logging, builds the address source and the provider, runs the
// engine once, and turns the outcome into an exit code. All sync logic
// lives in v6sync-core.
//
// Typically installed as a NetworkManager dispatcher hook so it runs
// whenever an interface changes state.
//
// ## Configuration
//
// Domain, credentials and subdomains come from a `key=value` file (see
// `v6sync_core::config`). Its path is the first CLI argument, or
// `V6SYNC_CONFIG`, or the dispatcher default.
//
// Runtime options are environment variables:
// - `V6SYNC_CONFIG`: Config file path
// - `V6SYNC_ADDRESS_SOURCE`: `interface` (default) or `hostname`
// - `V6SYNC_INTERFACE`: Only consider addresses on this interface
// - `V6SYNC_MODE`: `dry-run` to list records without modifying them
// - `V6SYNC_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export V6SYNC_INTERFACE=eth0
// v6sync /etc/v6sync/ddns.conf
// ```

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use v6sync_core::config::DEFAULT_CONFIG_PATH;
use v6sync_core::{ReconcileOutcome, SyncConfig, SyncEngine, SyncReport};
use v6sync_ip_local::AddressSourceKind;

/// Exit codes for the possible outcomes of a run
///
/// - 0: Records in sync (updated or already correct)
/// - 1: Configuration error
/// - 2: Runtime error (no address, provider failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<SyncExitCode> for ExitCode {
    fn from(code: SyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&v6sync_core::Error> for SyncExitCode {
    fn from(err: &v6sync_core::Error) -> Self {
        if err.is_config() {
            SyncExitCode::ConfigError
        } else {
            SyncExitCode::RuntimeError
        }
    }
}

/// Runtime options
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    config_path: String,
    address_source: AddressSourceKind,
    interface: Option<String>,
    dry_run: bool,
    log_level: Level,
}

impl Options {
    /// Load options from the environment and command line
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), env::args().nth(1))
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>, arg: Option<String>) -> Result<Self> {
        let config_path = arg
            .or_else(|| var("V6SYNC_CONFIG"))
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        if config_path.is_empty() {
            anyhow::bail!("Config file path cannot be empty");
        }

        let address_source = match var("V6SYNC_ADDRESS_SOURCE") {
            Some(kind) => kind.parse()?,
            None => AddressSourceKind::default(),
        };

        let interface = var("V6SYNC_INTERFACE").filter(|s| !s.trim().is_empty());
        if interface.is_some() && address_source != AddressSourceKind::Interface {
            anyhow::bail!("V6SYNC_INTERFACE only applies to V6SYNC_ADDRESS_SOURCE=interface");
        }

        let dry_run = match var("V6SYNC_MODE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("") | Some("live") => false,
            Some("dry-run") => true,
            Some(other) => anyhow::bail!(
                "V6SYNC_MODE '{}' is not valid. Valid modes: live, dry-run",
                other
            ),
        };

        let log_level = match var("V6SYNC_LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            other => anyhow::bail!(
                "V6SYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        };

        Ok(Self {
            config_path,
            address_source,
            interface,
            dry_run,
            log_level,
        })
    }
}

fn main() -> ExitCode {
    let options = match Options::from_env() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(options.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SyncExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SyncExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(&options).await {
            Ok(report) => {
                log_report(&report);
                SyncExitCode::Success
            }
            Err(e) => {
                error!("{}", e);
                SyncExitCode::from(&e)
            }
        }
    });

    code.into()
}

/// Load the config, build the collaborators and run the engine once
async fn run(options: &Options) -> v6sync_core::Result<SyncReport> {
    let config = SyncConfig::from_file(&options.config_path)?;
    info!("Loaded config from {}", options.config_path);

    let provider = create_provider(&config, options.dry_run)?;
    let source = v6sync_ip_local::create(options.address_source, options.interface.clone());

    SyncEngine::new(source, provider, config)?.run_once().await
}

#[cfg(feature = "dnspod")]
fn create_provider(
    config: &SyncConfig,
    dry_run: bool,
) -> v6sync_core::Result<Box<dyn v6sync_core::DnsProvider>> {
    let provider = v6sync_provider_dnspod::DnspodProvider::from_config(config, dry_run)?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "dnspod"))]
fn create_provider(
    _config: &SyncConfig,
    _dry_run: bool,
) -> v6sync_core::Result<Box<dyn v6sync_core::DnsProvider>> {
    Err(v6sync_core::Error::config(
        "v6sync was built without a DNS provider; enable the `dnspod` feature",
    ))
}

fn log_report(report: &SyncReport) {
    match &report.outcome {
        ReconcileOutcome::InSync { examined } => {
            info!(
                "DNS already in sync with {} ({} record(s) examined)",
                report.address, examined
            );
        }
        ReconcileOutcome::Updated {
            batch,
            acknowledgment,
        } => {
            info!(
                "Set {} record(s) {:?} to {}",
                batch.len(),
                batch.ids(),
                report.address
            );
            info!("Provider response: {}", acknowledgment.raw);
        }
    }
}
