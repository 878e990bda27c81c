//! GC Metrics - Export Metrics
//!
//! Exports phase averages to monitoring systems
//! (Prometheus text format, JSON). Insertion order is preserved so
//! phases come out in enumeration order.

use indexmap::IndexMap;
use parking_lot::Mutex;

/// GcMetrics - metrics exporter
pub struct GcMetrics {
    metrics: Mutex<IndexMap<String, MetricValue>>,
}

impl GcMetrics {
    pub fn new() -> Self {
        Self {
            metrics: Mutex::new(IndexMap::new()),
        }
    }

    /// Add or replace metric
    pub fn add(&self, name: String, value: MetricValue) {
        self.metrics.lock().insert(name, value);
    }

    /// Get metric
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.metrics.lock().get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.metrics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.lock().is_empty()
    }

    /// Export to Prometheus format
    pub fn to_prometheus(&self) -> String {
        let metrics = self.metrics.lock();
        let mut output = String::new();

        for (name, value) in metrics.iter() {
            output.push_str(&format!("# TYPE {} {}\n", name, value.kind()));
            output.push_str(&format!("{} {}\n", name, value.as_f64()));
        }

        output
    }

    /// Export to JSON
    pub fn to_json(&self) -> String {
        let metrics = self.metrics.lock();
        let map: serde_json::Map<String, serde_json::Value> = metrics
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::json!(value.as_f64())))
            .collect();

        serde_json::Value::Object(map).to_string()
    }
}

impl Default for GcMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Gauge(v) => *v,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            MetricValue::Gauge(_) => "gauge",
        }
    }
}
