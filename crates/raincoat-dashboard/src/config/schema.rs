use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use raincoat_core::error::{Result, RaincoatError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub transfer: TransferConfig,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RaincoatError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.store.validate()?;
        self.transfer.validate()?;

        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            transfer: TransferConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RaincoatError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "127.0.0.1:5000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(RaincoatError::BadRequest("store.path must not be empty".into()));
        }
        Ok(())
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("raincoat_orders.db")
}

/// Remote push target and credentials.
///
/// Host-key trust is opt-in: with `trust_unknown_host_keys: false` the server
/// key must be listed in `known_hosts`.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferConfig {
    #[serde(default = "default_transfer_host")]
    pub host: String,

    #[serde(default = "default_transfer_port")]
    pub port: u16,

    #[serde(default = "default_transfer_username")]
    pub username: String,

    /// Inline password. Mutually exclusive with `password_env`.
    #[serde(default)]
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,

    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    #[serde(default)]
    pub trust_unknown_host_keys: bool,

    #[serde(default)]
    pub known_hosts: Option<PathBuf>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            host: default_transfer_host(),
            port: default_transfer_port(),
            username: default_transfer_username(),
            password: None,
            password_env: None,
            remote_path: default_remote_path(),
            trust_unknown_host_keys: false,
            known_hosts: None,
        }
    }
}

// Keeps the password out of Debug output (and therefore out of logs).
impl std::fmt::Debug for TransferConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("password_env", &self.password_env)
            .field("remote_path", &self.remote_path)
            .field("trust_unknown_host_keys", &self.trust_unknown_host_keys)
            .field("known_hosts", &self.known_hosts)
            .finish()
    }
}

impl TransferConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(RaincoatError::BadRequest("transfer.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(RaincoatError::BadRequest("transfer.port must not be 0".into()));
        }
        if !self.remote_path.starts_with('/') {
            return Err(RaincoatError::BadRequest(
                "transfer.remote_path must be an absolute path".into(),
            ));
        }
        if self.trust_unknown_host_keys && self.known_hosts.is_some() {
            return Err(RaincoatError::BadRequest(
                "transfer.known_hosts is ignored when trust_unknown_host_keys is true".into(),
            ));
        }
        if self.password.is_some() && self.password_env.is_some() {
            return Err(RaincoatError::BadRequest(
                "transfer.password and transfer.password_env are mutually exclusive".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the password at call time (env lookup happens per transfer).
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(var) = &self.password_env {
            return std::env::var(var).map_err(|e| {
                RaincoatError::Transfer(format!("password env {var} unavailable: {e}"))
            });
        }
        Ok(self.password.clone().unwrap_or_default())
    }
}

fn default_transfer_host() -> String {
    "localhost".into()
}
fn default_transfer_port() -> u16 {
    22
}
fn default_transfer_username() -> String {
    "raincoat".into()
}
fn default_remote_path() -> String {
    "/upload/raincoat_orders.db".into()
}
