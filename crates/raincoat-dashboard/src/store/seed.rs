//! Synthetic rows for an empty store.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const SEED_ROWS: usize = 20;

pub const CUSTOMERS: [&str; 10] = [
    "John Smith",
    "Jane Doe",
    "Bob Johnson",
    "Alice Brown",
    "Charlie Wilson",
    "Diana Prince",
    "Edward Norton",
    "Fiona Green",
    "George Miller",
    "Hannah Lee",
];

const PRICE_MIN: f64 = 25.99;
const PRICE_MAX: f64 = 89.99;
const MAX_AGE_DAYS: i64 = 30;

/// A seed row with its backdated timestamp.
#[derive(Debug, Clone)]
pub struct SeedOrder {
    pub customer: &'static str,
    pub quantity: i64,
    pub price: f64,
    pub timestamp: String,
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn synthetic_order<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SeedOrder {
    let customer = CUSTOMERS.choose(rng).copied().unwrap_or(CUSTOMERS[0]);
    let quantity = rng.gen_range(1..=5i64);
    let price = (rng.gen_range(PRICE_MIN..=PRICE_MAX) * 100.0).round() / 100.0;
    let age = Duration::days(rng.gen_range(0..=MAX_AGE_DAYS));

    SeedOrder {
        customer,
        quantity,
        price,
        timestamp: iso_timestamp(now - age),
    }
}
