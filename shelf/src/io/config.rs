//! Library configuration stored at `<data dir>/shelf.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::loan::LoanPolicy;

/// Library configuration (TOML).
///
/// Missing fields default to the values a fresh install uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShelfConfig {
    /// Days from issue to due date.
    pub loan_period_days: u32,

    /// Fine charged per whole day a return is late.
    pub fine_per_day: u64,

    /// Prefix printed before fine amounts.
    pub currency: String,

    /// Catalog file, relative to the data directory.
    pub catalog_file: String,

    /// Default export destination, relative to the data directory.
    pub export_file: String,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        let policy = LoanPolicy::default();
        Self {
            loan_period_days: policy.loan_period_days,
            fine_per_day: policy.fine_per_day,
            currency: "₹".to_string(),
            catalog_file: "library.json".to_string(),
            export_file: "books_export.txt".to_string(),
        }
    }
}

impl ShelfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.loan_period_days == 0 {
            return Err(anyhow!("loan_period_days must be > 0"));
        }
        if self.catalog_file.trim().is_empty() {
            return Err(anyhow!("catalog_file must be non-empty"));
        }
        if self.export_file.trim().is_empty() {
            return Err(anyhow!("export_file must be non-empty"));
        }
        Ok(())
    }

    pub fn policy(&self) -> LoanPolicy {
        LoanPolicy {
            loan_period_days: self.loan_period_days,
            fine_per_day: self.fine_per_day,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ShelfConfig::default()`.
pub fn load_config(path: &Path) -> Result<ShelfConfig> {
    if !path.exists() {
        let cfg = ShelfConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ShelfConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn render_config(cfg: &ShelfConfig) -> Result<String> {
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    Ok(buf)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ShelfConfig) -> Result<()> {
    cfg.validate()?;
    let buf = render_config(cfg)?;
    write_atomic(path, &buf)
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);
    fs::write(tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
