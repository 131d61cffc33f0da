//! Lightweight in-process metrics.
//!
//! Business series (simulated sales, orders, inventory) plus per-route request
//! counts, stored as atomics and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::{DashboardMetrics, MetricSnapshot, EXPOSITION_CONTENT_TYPE};
