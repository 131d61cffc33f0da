//! raincoat core: error types and the order model.
//!
//! This crate defines the data contracts and error surface shared by the
//! dashboard service and any tooling. It carries no HTTP, storage, or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths must surface as `RaincoatError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{Result, RaincoatError};
pub use model::{FieldValue, NewOrder, Order, OrderTotals};
