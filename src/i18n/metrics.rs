//! Translation metrics and observability.
//!
//! Counters are per chat session so a logout starts from a clean slate and
//! tests never observe each other's traffic.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Translation counters for one orchestrator.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Translation requests sent to the model
    api_calls: AtomicUsize,

    /// Translation requests that failed
    api_failures: AtomicUsize,

    /// Turns where the user's text went to the model untranslated
    inbound_fallbacks: AtomicUsize,

    /// Turns where the reply was shown untranslated
    outbound_fallbacks: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inbound_fallback(&self) {
        self.inbound_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outbound_fallback(&self) {
        self.outbound_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls();
        let failures = self.api_failures();
        let api_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls: calls,
            api_failures: failures,
            api_success_rate,
            inbound_fallbacks: self.inbound_fallbacks.load(Ordering::Relaxed),
            outbound_fallbacks: self.outbound_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub api_calls: usize,
    pub api_failures: usize,

    /// API success rate as a percentage (0-100)
    pub api_success_rate: f64,

    pub inbound_fallbacks: usize,
    pub outbound_fallbacks: usize,
}
