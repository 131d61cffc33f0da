//! SQLite-backed order store.
//!
//! One `orders` table in a single file. A connection is opened for each
//! operation and dropped when it returns; there is no pool. Every rusqlite
//! failure surfaces as `RaincoatError::Store` with no retry.

pub mod seed;

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use rusqlite::types::Value;
use rusqlite::{params, Connection, TransactionBehavior};

use raincoat_core::error::{Result, RaincoatError};
use raincoat_core::{FieldValue, Order, OrderTotals};

pub use seed::{CUSTOMERS, SEED_ROWS};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer TEXT,
    quantity INTEGER,
    price REAL,
    timestamp TEXT
)";

const INSERT_ORDER: &str =
    "INSERT INTO orders (customer, quantity, price, timestamp) VALUES (?1, ?2, ?3, ?4)";

fn store_err(ctx: &'static str) -> impl Fn(rusqlite::Error) -> RaincoatError {
    move |e| RaincoatError::Store(format!("{ctx}: {e}"))
}

/// Bind a submitted value as-is. The untyped columns take any storage class.
fn sql_value(v: &FieldValue) -> Value {
    match v {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Integer(i64::from(*b)),
        FieldValue::Integer(n) => Value::Integer(*n),
        FieldValue::Real(x) => Value::Real(*x),
        FieldValue::Text(s) => Value::Text(s.clone()),
        FieldValue::Json(j) => Value::Text(j.to_string()),
    }
}

fn field_value(v: Value) -> FieldValue {
    match v {
        Value::Null => FieldValue::Null,
        Value::Integer(n) => FieldValue::Integer(n),
        Value::Real(x) => FieldValue::Real(x),
        Value::Text(s) => FieldValue::Text(s),
        Value::Blob(b) => FieldValue::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}

#[derive(Debug, Clone)]
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file (also the file the transfer job ships).
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(store_err("open failed"))
    }

    /// Create the table if needed and seed it when empty.
    /// Returns the number of rows seeded (0 if the table already had rows).
    pub fn ensure_initialized(&self) -> Result<usize> {
        self.ensure_initialized_with(&mut rand::thread_rng())
    }

    pub fn ensure_initialized_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let mut conn = self.open()?;
        conn.execute_batch(SCHEMA).map_err(store_err("create table failed"))?;

        // IMMEDIATE takes the write lock before the emptiness check, so two
        // processes racing on a fresh file cannot both seed.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(store_err("begin failed"))?;

        let existing: i64 = tx
            .query_row("SELECT COUNT(*) FROM orders", [], |r| r.get(0))
            .map_err(store_err("count failed"))?;
        if existing > 0 {
            return Ok(0);
        }

        let now = Utc::now();
        {
            let mut stmt = tx.prepare(INSERT_ORDER).map_err(store_err("prepare failed"))?;
            for _ in 0..SEED_ROWS {
                let s = seed::synthetic_order(rng, now);
                stmt.execute(params![s.customer, s.quantity, s.price, s.timestamp])
                    .map_err(store_err("seed insert failed"))?;
            }
        }
        tx.commit().map_err(store_err("commit failed"))?;

        tracing::info!(
            path = %self.path.display(),
            rows = SEED_ROWS,
            "seeded empty order store"
        );
        Ok(SEED_ROWS)
    }

    pub fn count_orders(&self) -> Result<u64> {
        let conn = self.open()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM orders", [], |r| r.get(0))
            .map_err(store_err("count failed"))?;
        Ok(n.max(0) as u64)
    }

    /// `SUM(quantity * price)` over all rows, 0 when empty.
    pub fn sum_revenue(&self) -> Result<f64> {
        let conn = self.open()?;
        conn.query_row(
            "SELECT COALESCE(SUM(quantity * price), 0.0) FROM orders",
            [],
            |r| r.get(0),
        )
        .map_err(store_err("revenue query failed"))
    }

    pub fn totals(&self) -> Result<OrderTotals> {
        Ok(OrderTotals {
            count: self.count_orders()?,
            revenue: self.sum_revenue()?,
        })
    }

    /// Append one order stamped with the current time. Values are stored
    /// exactly as given; nothing is type- or range-checked.
    pub fn insert_order(
        &self,
        customer: impl Into<FieldValue>,
        quantity: impl Into<FieldValue>,
        price: impl Into<FieldValue>,
    ) -> Result<i64> {
        let (customer, quantity, price) = (customer.into(), quantity.into(), price.into());
        let conn = self.open()?;
        let timestamp = seed::iso_timestamp(Utc::now());
        conn.execute(
            INSERT_ORDER,
            params![
                sql_value(&customer),
                sql_value(&quantity),
                sql_value(&price),
                timestamp
            ],
        )
        .map_err(store_err("insert failed"))?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, %customer, %quantity, %price, "order inserted");
        Ok(id)
    }

    /// Newest orders first.
    pub fn recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, customer, quantity, price, timestamp FROM orders \
                 ORDER BY id DESC LIMIT ?1",
            )
            .map_err(store_err("prepare failed"))?;
        let rows = stmt
            .query_map(params![limit as i64], |r| {
                Ok(Order {
                    id: r.get(0)?,
                    customer: field_value(r.get(1)?),
                    quantity: field_value(r.get(2)?),
                    price: field_value(r.get(3)?),
                    timestamp: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
                })
            })
            .map_err(store_err("list failed"))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_err("row decode failed"))
    }
}
