//! Application context: unified state passed to every command handler.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::InfracheckConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Explicit config file path.
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Quiet in JSON mode so stdout stays parseable.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Optional YAML config file.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore::new(flags.config),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Load the config file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file is missing or invalid.
    pub fn load_config(&self) -> Result<InfracheckConfig> {
        let config = self.config_store.load()?;
        debug!(path = %self.config_store.path().display(), "config loaded");
        Ok(config)
    }
}
