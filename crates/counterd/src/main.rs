// # counterd - Counter Store Runner
//
// Thin integration layer over counter-core. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the runtime
// 3. Building the IP lookup
// 4. Driving the store through its actions and flows once
//
// All state logic lives in counter-core.
//
// ## Configuration
//
// - `COUNTER_IP_ENDPOINT`: URL returning `{"ip": "..."}` (default http://ip.jsontest.com/)
// - `COUNTER_INCREMENT_DELAY_MS`: Delay for the delayed increment (default 1000)
// - `COUNTER_REQUEST_TIMEOUT_SECS`: Optional lookup timeout (unset = none)
// - `COUNTER_INCREMENT_AMOUNT`: Amount for the delayed increment (default 10)
// - `COUNTER_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export COUNTER_INCREMENT_AMOUNT=5
// export COUNTER_LOG_LEVEL=debug
//
// counterd
// ```

use anyhow::{Context, Result};
use counter_core::{Action, CounterConfig, CounterStore, increment_after};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum CounterExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (a flow failed)
    RuntimeError = 2,
}

impl From<CounterExitCode> for ExitCode {
    fn from(code: CounterExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    store: CounterConfig,
    /// Whether `COUNTER_IP_ENDPOINT` overrode the default endpoint
    endpoint_overridden: bool,
    increment_amount: i64,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let mut store = CounterConfig::new();

        let endpoint_overridden = match env::var("COUNTER_IP_ENDPOINT") {
            Ok(url) => {
                store.ip_endpoint = url;
                true
            }
            Err(_) => false,
        };

        if let Ok(delay) = env::var("COUNTER_INCREMENT_DELAY_MS") {
            store.increment_delay_ms = delay
                .parse()
                .with_context(|| format!("COUNTER_INCREMENT_DELAY_MS is not a number: {}", delay))?;
        }

        if let Ok(timeout) = env::var("COUNTER_REQUEST_TIMEOUT_SECS") {
            store.request_timeout_secs = Some(timeout.parse().with_context(|| {
                format!("COUNTER_REQUEST_TIMEOUT_SECS is not a number: {}", timeout)
            })?);
        }

        let increment_amount = match env::var("COUNTER_INCREMENT_AMOUNT") {
            Ok(amount) => amount
                .parse()
                .with_context(|| format!("COUNTER_INCREMENT_AMOUNT is not an integer: {}", amount))?,
            Err(_) => 10,
        };

        Ok(Self {
            store,
            endpoint_overridden,
            increment_amount,
            log_level: env::var("COUNTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if let Some(url) = self.plain_http_override() {
            eprintln!("WARNING: COUNTER_IP_ENDPOINT uses HTTP (not HTTPS): {}", url);
        }

        self.level()?;
        Ok(())
    }

    /// Endpoint worth warning about: set explicitly and not using HTTPS
    ///
    /// The built-in default endpoint is plain HTTP and is not reported.
    fn plain_http_override(&self) -> Option<&str> {
        let url = self.store.ip_endpoint.as_str();
        (self.endpoint_overridden && url.starts_with("http://")).then_some(url)
    }

    /// Parse the configured log level
    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "COUNTER_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CounterExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return CounterExitCode::ConfigError.into();
    }

    let log_level = config.level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CounterExitCode::ConfigError.into();
    }

    info!("Starting counterd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CounterExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        tokio::select! {
            outcome = run(config) => match outcome {
                Ok(()) => CounterExitCode::CleanShutdown,
                Err(e) => {
                    error!("Run failed: {:#}", e);
                    CounterExitCode::RuntimeError
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down");
                CounterExitCode::CleanShutdown
            }
        }
    });

    result.into()
}

/// Drive the store through every action and both flows
async fn run(config: Config) -> Result<()> {
    let store = CounterStore::new();

    store.dispatch(Action::increment());
    store.dispatch(Action::decrement());
    let state = store.dispatch(Action::increment_by_amount(config.increment_amount));
    info!("After synchronous actions: count={}", state.value);

    let pending = increment_after(
        &store,
        config.increment_amount,
        config.store.increment_delay(),
    );
    info!(
        "Scheduled delayed increment of {} ({:?})",
        pending.amount(),
        config.store.increment_delay()
    );
    let state = pending.wait().await?;
    info!("After delayed increment: count={}", state.value);

    request_ip(&store, &config).await?;

    info!(
        "Final state: count={}, ip={:?}",
        store.select_count(),
        store.select_ip()
    );
    Ok(())
}

#[cfg(feature = "http")]
async fn request_ip(store: &CounterStore, config: &Config) -> Result<()> {
    use counter_core::traits::IpLookupFactory;

    let lookup = counter_ip_http::HttpFactory.create(&config.store)?;
    info!("Requesting IP from {}", config.store.ip_endpoint);

    let state = counter_core::async_request(store, &lookup, config.increment_amount).await?;
    info!("Stored IP: {}", state.ip_address);
    Ok(())
}

#[cfg(not(feature = "http"))]
async fn request_ip(_store: &CounterStore, _config: &Config) -> Result<()> {
    tracing::warn!("Built without the `http` feature; skipping IP request");
    Ok(())
}
