// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::{health_handler, metrics_handler};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order placement outcomes (placed, rejected by reason)
// - Inventory check latency
// - Error responses emitted by the web boundary
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    // Order Placement Metrics
    pub orders_placed: IntCounter,
    pub orders_rejected: IntCounterVec,

    // Inventory Metrics
    pub inventory_check_duration: HistogramVec,

    // Web Boundary Metrics
    pub error_responses: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Order Placement Metrics
        let orders_placed = IntCounter::new("orders_placed_total", "Total orders placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Total order placements that did not persist an order"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        // Inventory Metrics
        let inventory_check_duration = HistogramVec::new(
            HistogramOpts::new("inventory_check_duration_seconds", "Inventory availability check duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(inventory_check_duration.clone()))?;

        // Web Boundary Metrics
        let error_responses = IntCounterVec::new(
            Opts::new("error_responses_total", "Error responses produced by the error translator"),
            &["kind", "status"],
        )?;
        registry.register(Box::new(error_responses.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            orders_rejected,
            inventory_check_duration,
            error_responses,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self) {
        self.orders_placed.inc();
    }

    pub fn record_order_rejected(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    /// `outcome` is one of "in_stock", "out_of_stock", "error"
    pub fn record_inventory_check(&self, outcome: &str, duration_secs: f64) {
        self.inventory_check_duration
            .with_label_values(&[outcome])
            .observe(duration_secs);
    }

    pub fn record_error_response(&self, kind: &str, status: u16) {
        let status = status.to_string();
        self.error_responses
            .with_label_values(&[kind, status.as_str()])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_order_outcomes() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_placed();
        metrics.record_order_placed();
        metrics.record_order_rejected("out_of_stock");

        let gathered = metrics.registry.gather();
        let placed = gathered.iter().find(|m| m.name() == "orders_placed_total").unwrap();
        assert_eq!(placed.metric[0].counter.value, Some(2.0));

        let rejected = gathered.iter().find(|m| m.name() == "orders_rejected_total").unwrap();
        assert_eq!(rejected.metric.len(), 1);
    }

    #[test]
    fn test_record_error_responses_by_status() {
        let metrics = Metrics::new().unwrap();
        metrics.record_error_response("not_found", 404);
        metrics.record_error_response("field_validation", 400);
        metrics.record_error_response("not_found", 404);

        let gathered = metrics.registry.gather();
        let errors = gathered.iter().find(|m| m.name() == "error_responses_total").unwrap();
        assert_eq!(errors.metric.len(), 2); // Two different label sets
    }

    #[test]
    fn test_record_inventory_check() {
        let metrics = Metrics::new().unwrap();
        metrics.record_inventory_check("in_stock", 0.02);

        let gathered = metrics.registry.gather();
        let histogram = gathered
            .iter()
            .find(|m| m.name() == "inventory_check_duration_seconds")
            .unwrap();
        assert_eq!(histogram.metric.len(), 1);
    }
}
