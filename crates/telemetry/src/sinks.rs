// Path: crates/telemetry/src/sinks.rs
//! Metrics sink traits for the vesting service and the process-wide sink slot.
//!
//! Until `prometheus::install` fills `SINK`, every accessor hands out a no-op sink.

use once_cell::sync::OnceCell;

/// Discards every observation.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// The installed backend, set at most once per process.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Error counters.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_error_sink(),
        None => &NOP_SINK,
    }
}

/// Dispatch latency and failure counters.
pub fn service_metrics() -> &'static dyn ServiceMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_service_sink(),
        None => &NOP_SINK,
    }
}

/// Account creation and donation metrics.
pub fn vesting_metrics() -> &'static dyn VestingMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_vesting_sink(),
        None => &NOP_SINK,
    }
}

/// Account creation and donation metrics.
pub trait VestingMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of vesting accounts created, labeled by schedule kind.
    fn inc_new_account(&self, kind: &str);
    /// Sets the gauge of the amount moved by the last message of type `msg`, per denomination.
    fn set_msg_amount(&self, msg: &str, denom: &str, amount: i64);
    /// Increments the counter of completed donations and the donated amount, per denomination.
    fn inc_donation(&self, denom: &str, amount: u64);
}
impl VestingMetricsSink for NopSink {
    fn inc_new_account(&self, _kind: &str) {}
    fn set_msg_amount(&self, _msg: &str, _denom: &str, _amount: i64) {}
    fn inc_donation(&self, _denom: &str, _amount: u64) {}
}

/// Rejected-operation counters.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Counts one error of taxonomy `kind` with stable code `variant`.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// Metrics around `BlockchainService::handle_service_call`.
pub trait ServiceMetricsSink: Send + Sync + std::fmt::Debug {
    /// Records how long one dispatched call took.
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64);
    /// Counts one failed dispatched call, labeled by error kind.
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str);
}
impl ServiceMetricsSink for NopSink {
    fn observe_service_dispatch_latency(
        &self,
        _service_id: &str,
        _method: &str,
        _duration_secs: f64,
    ) {
    }
    fn inc_dispatch_error(&self, _service_id: &str, _method: &str, _reason: &'static str) {}
}

/// Everything a backend must implement to be installed into `SINK`.
pub trait MetricsSink: VestingMetricsSink + ErrorMetricsSink + ServiceMetricsSink {
    /// This sink viewed as an error sink.
    fn as_error_sink(&self) -> &dyn ErrorMetricsSink;
    /// This sink viewed as a service dispatch sink.
    fn as_service_sink(&self) -> &dyn ServiceMetricsSink;
    /// This sink viewed as a vesting sink.
    fn as_vesting_sink(&self) -> &dyn VestingMetricsSink;
}

impl<T> MetricsSink for T
where
    T: VestingMetricsSink + ErrorMetricsSink + ServiceMetricsSink,
{
    fn as_error_sink(&self) -> &dyn ErrorMetricsSink {
        self
    }
    fn as_service_sink(&self) -> &dyn ServiceMetricsSink {
        self
    }
    fn as_vesting_sink(&self) -> &dyn VestingMetricsSink {
        self
    }
}
