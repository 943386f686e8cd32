//! Observability hooks for migration runs.
//!
//! With the `metrics` feature, [`METRICS`] exports step and statement counters
//! through the Prometheus exporter. With the `tracing` feature,
//! [`tracing_helpers`] builds the spans the step executor and backends enter.

#[cfg(feature = "metrics")]
pub use prometheus_metrics::{StrataMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        metrics::{Counter, Histogram, MeterProvider},
        KeyValue,
    };
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<StrataMetrics> = Lazy::new(StrataMetrics::init);

    pub struct StrataMetrics {
        pub registry: Registry,
        _provider: SdkMeterProvider,
        pub steps_total: Counter<u64>,
        pub step_failures_total: Counter<u64>,
        pub step_duration: Histogram<f64>,
        pub statements_total: Counter<u64>,
        pub statement_errors_total: Counter<u64>,
        pub statement_duration: Histogram<f64>,
    }

    impl StrataMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let exporter = opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
                .expect("failed to build prometheus exporter");
            let provider = SdkMeterProvider::builder().with_reader(exporter).build();
            let meter = provider.meter("strata");

            let steps_total = meter
                .u64_counter("strata_steps_total")
                .with_description("Migration steps committed")
                .build();

            let step_failures_total = meter
                .u64_counter("strata_step_failures_total")
                .with_description("Migration steps rolled back or aborted")
                .build();

            let step_duration = meter
                .f64_histogram("strata_step_duration_seconds")
                .with_description("Duration of migration steps")
                .build();

            let statements_total = meter
                .u64_counter("strata_statements_total")
                .with_description("Statements executed inside migration steps")
                .build();

            let statement_errors_total = meter
                .u64_counter("strata_statement_errors_total")
                .with_description("Statements rejected by the backend")
                .build();

            let statement_duration = meter
                .f64_histogram("strata_statement_duration_seconds")
                .with_description("Duration of individual statements")
                .build();

            Self {
                registry,
                _provider: provider,
                steps_total,
                step_failures_total,
                step_duration,
                statements_total,
                statement_errors_total,
                statement_duration,
            }
        }

        pub fn record_step(&self, direction: &'static str, elapsed: Duration) {
            let attrs = [KeyValue::new("direction", direction)];
            self.steps_total.add(1, &attrs);
            self.step_duration.record(elapsed.as_secs_f64(), &attrs);
        }

        pub fn record_step_failure(&self, direction: &'static str) {
            self.step_failures_total
                .add(1, &[KeyValue::new("direction", direction)]);
        }

        pub fn record_statement(&self, elapsed: Duration) {
            self.statements_total.add(1, &[]);
            self.statement_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_statement_error(&self) {
            self.statement_errors_total.add(1, &[]);
        }

        /// Current values in the Prometheus text exposition format
        pub fn render(&self) -> String {
            TextEncoder::new()
                .encode_to_string(&self.registry.gather())
                .unwrap_or_else(|e| {
                    log::warn!("Failed to encode metrics: {e}");
                    String::new()
                })
        }
    }

}

/// Span constructors shared by the step executor and the backends
#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::Span;

    pub fn migration_step_span(timestamp: i64, direction: &'static str) -> Span {
        tracing::info_span!("strata.step", timestamp, direction)
    }

    pub fn open_connection_span(provider: &str) -> Span {
        tracing::debug_span!("strata.connect", provider)
    }

    pub fn begin_transaction_span() -> Span {
        tracing::debug_span!("strata.begin")
    }

    pub fn commit_transaction_span() -> Span {
        tracing::debug_span!("strata.commit")
    }

    pub fn rollback_transaction_span() -> Span {
        tracing::debug_span!("strata.rollback")
    }

    /// Statement span; only the first line of the SQL is recorded
    pub fn execute_statement_span(sql: &str) -> Span {
        let first_line = sql.lines().next().unwrap_or_default();
        tracing::debug_span!("strata.execute", sql = first_line)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_spans_can_be_entered_without_subscriber() {
            let _step = migration_step_span(20240101000000, "up").entered();
            let _stmt = execute_statement_span("CREATE TABLE \"A\" (\n\"Id\" INT)").entered();
        }

        #[test]
        fn test_spans_are_recorded_by_registry() {
            tracing::subscriber::with_default(tracing_subscriber::registry(), || {
                assert!(!migration_step_span(1, "down").is_disabled());
                assert!(!open_connection_span("SQLite").is_disabled());
            });
        }
    }
}
