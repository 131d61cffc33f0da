//! One-shot SFTP push of the order store file.
//!
//! Blocking for its whole duration: no connect timeout, no retry, no
//! cancellation. Callers only ever see a boolean; the failure reason is
//! logged here and then dropped.

use std::fs::File;
use std::io;
use std::net::TcpStream;
use std::path::Path;

use ssh2::{CheckResult, KnownHostFileKind, Session};

use raincoat_core::error::{Result, RaincoatError};

use crate::config::TransferConfig;

fn transfer_err<E: std::fmt::Display>(step: &'static str) -> impl Fn(E) -> RaincoatError {
    move |e| RaincoatError::Transfer(format!("{step}: {e}"))
}

#[derive(Debug, Clone)]
pub struct SftpPusher {
    cfg: TransferConfig,
}

impl SftpPusher {
    pub fn new(cfg: TransferConfig) -> Self {
        Self { cfg }
    }

    pub fn target(&self) -> &TransferConfig {
        &self.cfg
    }

    /// Copy `local` to the configured remote path. `true` only if every step
    /// succeeded. `local` is opened read-only.
    pub fn push_store(&self, local: &Path) -> bool {
        match self.try_push(local) {
            Ok(bytes) => {
                tracing::info!(
                    host = %self.cfg.host,
                    remote_path = %self.cfg.remote_path,
                    bytes,
                    "store transfer complete"
                );
                true
            }
            Err(e) => {
                tracing::warn!(host = %self.cfg.host, error = %e, "store transfer failed");
                false
            }
        }
    }

    fn try_push(&self, local: &Path) -> Result<u64> {
        let password = self.cfg.resolve_password()?;

        let tcp = TcpStream::connect((self.cfg.host.as_str(), self.cfg.port))
            .map_err(transfer_err("connect"))?;

        let mut sess = Session::new().map_err(transfer_err("session init"))?;
        sess.set_tcp_stream(tcp);
        sess.handshake().map_err(transfer_err("handshake"))?;

        self.verify_host_key(&sess)?;

        sess.userauth_password(&self.cfg.username, &password)
            .map_err(transfer_err("auth"))?;
        if !sess.authenticated() {
            return Err(RaincoatError::Transfer("auth: rejected".into()));
        }

        let sftp = sess.sftp().map_err(transfer_err("sftp channel"))?;
        let mut src = File::open(local).map_err(transfer_err("open local store"))?;
        let mut dst = sftp
            .create(Path::new(&self.cfg.remote_path))
            .map_err(transfer_err("create remote file"))?;
        let bytes = io::copy(&mut src, &mut dst).map_err(transfer_err("copy"))?;

        drop(dst);
        drop(sftp);
        sess.disconnect(None, "transfer complete", None)
            .map_err(transfer_err("disconnect"))?;

        Ok(bytes)
    }

    fn verify_host_key(&self, sess: &Session) -> Result<()> {
        if self.cfg.trust_unknown_host_keys {
            tracing::debug!(
                host = %self.cfg.host,
                "host key not checked (trust_unknown_host_keys)"
            );
            return Ok(());
        }

        let known_hosts = self.cfg.known_hosts.as_ref().ok_or_else(|| {
            RaincoatError::Transfer("host key: no known_hosts file configured".into())
        })?;

        let mut known = sess.known_hosts().map_err(transfer_err("known_hosts init"))?;
        known
            .read_file(known_hosts, KnownHostFileKind::OpenSSH)
            .map_err(transfer_err("known_hosts read"))?;

        let (key, _) = sess
            .host_key()
            .ok_or_else(|| RaincoatError::Transfer("host key: server sent none".into()))?;

        match known.check_port(&self.cfg.host, self.cfg.port, key) {
            CheckResult::Match => Ok(()),
            CheckResult::NotFound => {
                Err(RaincoatError::Transfer("host key: unknown host".into()))
            }
            CheckResult::Mismatch => {
                Err(RaincoatError::Transfer("host key: mismatch".into()))
            }
            CheckResult::Failure => {
                Err(RaincoatError::Transfer("host key: check failed".into()))
            }
        }
    }
}
