//! Raincoat dashboard library entry.
//!
//! This crate wires the metrics registry, the SQLite order store, the SFTP
//! transfer job, and the HTTP handlers into one service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transfer;
pub mod web;
