use crate::error::Result;
use chrono::{DateTime, Utc};
use leadgate_core::rules::RuleDecision;
use leadgate_core::time::{now_utc, CreatedAt};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only record of rule decisions.
///
/// Lines carry a SHA-256 of the normalized phone instead of the number itself.
/// Without a path the line goes to the log output at warn level.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    path: Option<PathBuf>,
}

impl DecisionLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, offer_id: &str, normalized_phone: &str, decision: &RuleDecision) -> Result<()> {
        self.record_at(now_utc(), offer_id, normalized_phone, decision)
    }

    pub fn record_at(
        &self,
        at: DateTime<Utc>,
        offer_id: &str,
        normalized_phone: &str,
        decision: &RuleDecision,
    ) -> Result<()> {
        let line = format_line(at, offer_id, normalized_phone, decision);
        let Some(path) = self.path.as_deref() else {
            warn!("{line}");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = open_append(path)?;
        file.write_all(format!("{line}\n").as_bytes())?;
        Ok(())
    }
}

pub fn hash_phone(normalized_phone: &str) -> String {
    format!("{:x}", Sha256::digest(normalized_phone.as_bytes()))
}

pub fn format_line(
    at: DateTime<Utc>,
    offer_id: &str,
    normalized_phone: &str,
    decision: &RuleDecision,
) -> String {
    format!(
        "{} offer={} telHash={} blocked={} reason={}",
        CreatedAt::from_datetime(at),
        offer_id,
        hash_phone(normalized_phone),
        decision.is_blocked(),
        decision.reason().map(|reason| reason.as_str()).unwrap_or("")
    )
}

#[cfg(unix)]
fn open_append(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_append(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}
