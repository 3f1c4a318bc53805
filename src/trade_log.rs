use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::trade::Trade;

/// Append-only trade log persisted as one JSON array.
#[derive(Debug, Clone)]
pub struct TradeLog {
    path: PathBuf,
}

pub fn trade_log_path(configured: &str) -> PathBuf {
    std::env::var("SD_TRADE_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(configured))
}

impl TradeLog {
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current log contents; a missing file is an empty log.
    pub fn load(&self) -> Result<Vec<Trade>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let payload = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if payload.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&payload)
            .with_context(|| format!("failed to parse trade log {}", self.path.display()))
    }

    /// Append `trade` and rewrite the whole log. Returns the updated log.
    pub fn append(&self, trade: Trade) -> Result<Vec<Trade>> {
        let mut trades = self.load()?;
        trades.push(trade);
        self.persist(&trades)?;
        tracing::info!(
            path = %self.path.display(),
            entries = trades.len(),
            "Trade appended"
        );
        Ok(trades)
    }

    /// Write to a sibling temp file, then rename over the log so a failed
    /// write leaves the previous contents in place.
    fn persist(&self, trades: &[Trade]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json =
            serde_json::to_string_pretty(trades).context("failed to serialize trade log json")?;
        let tmp_path = self.tmp_path();
        let write_tmp = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()
        };
        if let Err(e) = write_tmp() {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("failed to write {}", tmp_path.display()));
        }
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("failed to replace {}", self.path.display()));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "trades.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
