use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::DiscoverConfig;

const STORE_DIR: &str = ".discover";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "discover.log";

/// The `.discover` directory holding client configuration.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        let dir = Self::store_dir(root);
        if !dir.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `discover init`)",
                STORE_DIR,
                dir.display()
            ));
        }
        Ok(Self { root: dir })
    }

    /// Walks up from `start` to the nearest directory containing `.discover`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::store_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!(
            "No {} directory found (run `discover init`)",
            STORE_DIR
        ))
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let dir = Self::store_dir(root);
        if dir.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                dir.display()
            ));
        }
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let store = Self { root: dir };
        store.write_config(&DiscoverConfig::default())?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn read_config(&self) -> Result<DiscoverConfig> {
        let bytes = fs::read(self.root.join(CONFIG_FILE)).context("read config.json")?;
        let cfg: DiscoverConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        if cfg.page_size == 0 {
            anyhow::bail!("config.json: page_size must be positive");
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &DiscoverConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
