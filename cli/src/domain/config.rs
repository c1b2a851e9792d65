//! Domain types for the optional `infracheck.yaml` file.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::options::{
    DEFAULT_BINARY, DEFAULT_OUTPUT_NAME, DEFAULT_TERRAFORM_DIR, TerraformOptions, VerifyRequest,
    parse_var,
};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration file schema.
///
/// Every field is optional; command-line flags override whatever is set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InfracheckConfig {
    pub terraform_dir: Option<PathBuf>,
    pub output: Option<String>,
    pub binary: Option<String>,
    pub vars: BTreeMap<String, String>,
    pub var_files: Vec<PathBuf>,
    pub env: BTreeMap<String, String>,
    pub no_color: Option<bool>,
    pub lock: Option<bool>,
    pub timeout_secs: Option<u64>,
}

/// Command-line overrides, already parsed by clap.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub terraform_dir: Option<PathBuf>,
    pub output: Option<String>,
    pub binary: Option<String>,
    /// Raw `key=value` strings.
    pub vars: Vec<String>,
    pub var_files: Vec<PathBuf>,
    pub timeout_secs: Option<u64>,
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Merges flags over file values over defaults.
///
/// Flag `vars` are layered on top of file `vars` key by key; flag `var_files`
/// are appended after file `var_files`.
///
/// # Errors
///
/// Returns an error if a var is malformed, the directory is empty, or the
/// output name is invalid.
pub fn resolve(
    config: &InfracheckConfig,
    overrides: &Overrides,
) -> Result<(TerraformOptions, VerifyRequest)> {
    let dir = overrides
        .terraform_dir
        .clone()
        .or_else(|| config.terraform_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TERRAFORM_DIR));

    let mut opts = TerraformOptions::new(dir)?;
    opts.binary = overrides
        .binary
        .clone()
        .or_else(|| config.binary.clone())
        .unwrap_or_else(|| DEFAULT_BINARY.to_string());
    opts.vars.clone_from(&config.vars);
    for raw in &overrides.vars {
        let (k, v) = parse_var(raw)?;
        opts.vars.insert(k, v);
    }
    opts.var_files = config
        .var_files
        .iter()
        .chain(overrides.var_files.iter())
        .cloned()
        .collect();
    opts.env.clone_from(&config.env);
    opts.no_color = config.no_color.unwrap_or(true);
    opts.lock = config.lock.unwrap_or(false);
    opts.timeout = overrides
        .timeout_secs
        .or(config.timeout_secs)
        .map(Duration::from_secs);

    let name = overrides
        .output
        .as_deref()
        .or(config.output.as_deref())
        .unwrap_or(DEFAULT_OUTPUT_NAME);
    let request = VerifyRequest::new(name)?;

    Ok((opts, request))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
