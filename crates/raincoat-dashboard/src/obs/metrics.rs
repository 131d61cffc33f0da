//! Metrics registry for the dashboard.
//!
//! Counter and gauge types with dynamic labels backed by `DashMap`. Labels are
//! flattened into sorted key vectors to keep deterministic ordering. Series
//! with no labels render as a bare `name value` line.

use dashmap::DashMap;
use rand::Rng;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Content type for the Prometheus text exposition format 0.0.4.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Probability that a dashboard view simulates a sale.
pub const SALE_PROBABILITY: f64 = 0.3;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn series(name: &str, key: &[(String, String)]) -> String {
    if key.is_empty() {
        return name.to_string();
    }
    let label_str = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}{{{}}}", name, label_str)
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value. Adding 0 registers the series.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value (0 for an unregistered series).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (series(name, r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (s, val) in rows {
            let _ = writeln!(out, "{} {}", s, val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicI64>,
}

impl GaugeVec {
    /// Overwrite the current value.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let mut rows: Vec<(String, i64)> = self
            .map
            .iter()
            .map(|r| (series(name, r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (s, val) in rows {
            let _ = writeln!(out, "{} {}", s, val);
        }
    }
}

/// Point-in-time copy of the business series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub sales_total: u64,
    pub orders_total: u64,
    pub inventory_current: i64,
}

/// Process-wide registry. Created once at startup, never persisted.
pub struct DashboardMetrics {
    pub sales: CounterVec,
    pub orders: CounterVec,
    pub inventory: GaugeVec,
    pub http_requests: CounterVec,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardMetrics {
    pub fn new() -> Self {
        let m = Self {
            sales: CounterVec::default(),
            orders: CounterVec::default(),
            inventory: GaugeVec::default(),
            http_requests: CounterVec::default(),
        };
        // Unlabeled series always render, starting at zero.
        m.sales.add(&[], 0);
        m.orders.add(&[], 0);
        m.inventory.set(&[], 0);
        m
    }

    /// Simulated sale: with probability 0.3 add 1..=3 to sales and 1 to orders.
    /// Returns the sales increment when a sale was recorded.
    pub fn record_sale_event<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u64> {
        if !rng.gen_bool(SALE_PROBABILITY) {
            return None;
        }
        let qty = rng.gen_range(1..=3u64);
        self.sales.add(&[], qty);
        self.orders.inc(&[]);
        Some(qty)
    }

    /// Overwrite the inventory gauge with a value in 50..=200 and return it.
    pub fn set_inventory<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let n = rng.gen_range(50..=200i64);
        self.inventory.set(&[], n);
        n
    }

    pub fn observe_request(&self, route: &str) {
        self.http_requests.inc(&[("route", route)]);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            sales_total: self.sales.get(&[]),
            orders_total: self.orders.get(&[]),
            inventory_current: self.inventory.get(&[]),
        }
    }

    /// Render all registered series in exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.sales.render("raincoat_sales_total", "Total raincoat sales", &mut out);
        self.inventory.render(
            "raincoat_inventory_current",
            "Current raincoat inventory",
            &mut out,
        );
        self.orders.render("raincoat_orders_total", "Total raincoat orders", &mut out);
        self.http_requests.render(
            "raincoat_http_requests_total",
            "HTTP requests handled, by route",
            &mut out,
        );
        out
    }
}
