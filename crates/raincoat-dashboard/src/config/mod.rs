//! Dashboard config loader (strict parsing).

pub mod schema;

use std::fs;

use raincoat_core::error::{Result, RaincoatError};

pub use schema::{DashboardConfig, ServerSection, StoreSection, TransferConfig};

pub fn load_from_file(path: &str) -> Result<DashboardConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RaincoatError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DashboardConfig> {
    let cfg: DashboardConfig = serde_yaml::from_str(s)
        .map_err(|e| RaincoatError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
