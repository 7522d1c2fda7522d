//! Test doubles and common utilities for flow contract tests

#![allow(dead_code)]

use counter_core::error::{Error, Result};
use serde::Deserialize;
use counter_core::traits::IpLookup;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Body shape the lookup decodes, same as the HTTP endpoint's
#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// What a [`ControlledIpLookup`] answers with
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// Resolve with this IP string
    Ip(String),
    /// Fail as if the connection was refused
    NetworkFailure,
    /// Fail as if the body was not `{ "ip": string }`
    ParseFailure(&'static str),
}

/// A controlled IpLookup that answers with a fixed outcome
pub struct ControlledIpLookup {
    outcome: LookupOutcome,
    /// Call counter for lookup()
    call_count: Arc<AtomicUsize>,
    /// When set, lookup() blocks until the gate is opened
    gate: Option<Arc<Notify>>,
}

impl ControlledIpLookup {
    pub fn resolving(ip: &str) -> Self {
        Self::with_outcome(LookupOutcome::Ip(ip.to_string()))
    }

    pub fn failing_network() -> Self {
        Self::with_outcome(LookupOutcome::NetworkFailure)
    }

    pub fn failing_parse(body: &'static str) -> Self {
        Self::with_outcome(LookupOutcome::ParseFailure(body))
    }

    pub fn with_outcome(outcome: LookupOutcome) -> Self {
        Self {
            outcome,
            call_count: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Make lookup() wait until the returned gate is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Get the number of times lookup() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpLookup for ControlledIpLookup {
    async fn lookup(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.outcome {
            LookupOutcome::Ip(ip) => Ok(ip.clone()),
            LookupOutcome::NetworkFailure => Err(Error::network("connection refused")),
            LookupOutcome::ParseFailure(body) => {
                let parsed: IpResponse = serde_json::from_str(body)?;
                Ok(parsed.ip)
            }
        }
    }

    fn name(&self) -> &'static str {
        "controlled"
    }
}
