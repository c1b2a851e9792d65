//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::InfracheckConfig;

/// Config file looked up in the current directory when nothing else is set.
pub const DEFAULT_CONFIG_FILE: &str = "infracheck.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file.
///
/// Lookup order: explicit path, `INFRACHECK_CONFIG`, `./infracheck.yaml`.
/// An explicit path that does not exist is an error; the implicit one is not.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    fn requested(&self) -> Option<PathBuf> {
        self.explicit.clone().or_else(|| {
            std::env::var_os("INFRACHECK_CONFIG")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InfracheckConfig> {
        let path = self.path();
        if !path.exists() {
            if self.requested().is_some() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            return Ok(InfracheckConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(InfracheckConfig::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> PathBuf {
        self.requested()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
