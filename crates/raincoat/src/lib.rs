//! Top-level facade crate for raincoat.
//!
//! Re-exports core types and the dashboard library so users can depend on a single crate.

pub mod core {
    pub use raincoat_core::*;
}

pub mod dashboard {
    pub use raincoat_dashboard::*;
}
