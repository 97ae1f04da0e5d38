// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGaugeVec,
};

// --- Metric Statics ---
// Collectors are held in OnceCells and initialized exactly once by `install`.

static VESTING_NEW_ACCOUNTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static VESTING_MSG_AMOUNT: OnceCell<IntGaugeVec> = OnceCell::new();
static VESTING_DONATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static VESTING_DONATED_AMOUNT_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SVC_DISPATCH_LATENCY_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static SVC_DISPATCH_ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// The Prometheus-backed sink returned by [`install`].
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` with the collector bound to `$m`. Metrics recorded before
/// `install()` are dropped.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl VestingMetricsSink for PrometheusSink {
    fn inc_new_account(&self, kind: &str) {
        with_metric!(VESTING_NEW_ACCOUNTS_TOTAL, |m| m.with_label_values(&[kind]).inc());
    }
    fn set_msg_amount(&self, msg: &str, denom: &str, amount: i64) {
        with_metric!(VESTING_MSG_AMOUNT, |m| m
            .with_label_values(&[msg, denom])
            .set(amount));
    }
    fn inc_donation(&self, denom: &str, amount: u64) {
        with_metric!(VESTING_DONATIONS_TOTAL, |m| m.with_label_values(&[denom]).inc());
        with_metric!(VESTING_DONATED_AMOUNT_TOTAL, |m| m
            .with_label_values(&[denom])
            .inc_by(amount));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

impl ServiceMetricsSink for PrometheusSink {
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64) {
        with_metric!(SVC_DISPATCH_LATENCY_SECONDS, |m| m
            .with_label_values(&[service_id, method])
            .observe(duration_secs));
    }
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str) {
        with_metric!(SVC_DISPATCH_ERRORS_TOTAL, |m| m
            .with_label_values(&[service_id, method, reason])
            .inc());
    }
}

fn set_once<T>(cell: &OnceCell<T>, value: T) -> Result<(), prometheus::Error> {
    cell.set(value).map_err(|_| prometheus::Error::AlreadyReg)
}

/// Registers all collectors with the default registry and publishes the sink
/// as the global [`SINK`]. A second call fails with `AlreadyReg`.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    set_once(
        &VESTING_NEW_ACCOUNTS_TOTAL,
        register_int_counter_vec!(
            "vestal_vesting_new_accounts_total",
            "Total vesting accounts created, by schedule kind.",
            &["kind"]
        )?,
    )?;
    set_once(
        &VESTING_MSG_AMOUNT,
        register_int_gauge_vec!(
            "vestal_vesting_msg_amount",
            "Amount moved by the last vesting message, by message type and denomination.",
            &["msg", "denom"]
        )?,
    )?;
    set_once(
        &VESTING_DONATIONS_TOTAL,
        register_int_counter_vec!(
            "vestal_vesting_donations_total",
            "Total completed donations, by denomination.",
            &["denom"]
        )?,
    )?;
    set_once(
        &VESTING_DONATED_AMOUNT_TOTAL,
        register_int_counter_vec!(
            "vestal_vesting_donated_amount_total",
            "Total amount donated to the community pool, by denomination.",
            &["denom"]
        )?,
    )?;
    set_once(
        &ERRORS_TOTAL,
        register_int_counter_vec!(
            "vestal_errors_total",
            "Total number of errors, categorized by kind and variant.",
            &["kind", "variant"]
        )?,
    )?;
    set_once(
        &SVC_DISPATCH_LATENCY_SECONDS,
        register_histogram_vec!(
            "vestal_service_dispatch_latency_seconds",
            "Latency of dispatched calls to on-chain services.",
            &["service_id", "method"],
            exponential_buckets(0.0001, 2.0, 16)?
        )?,
    )?;
    set_once(
        &SVC_DISPATCH_ERRORS_TOTAL,
        register_int_counter_vec!(
            "vestal_service_dispatch_errors_total",
            "Total errors returned from service dispatch calls.",
            &["service_id", "method", "reason"]
        )?,
    )?;

    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    SINK.set(sink).map_err(|_| prometheus::Error::AlreadyReg)?;
    Ok(sink)
}
