//! Provisioning configuration passed to every engine operation.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use regex::Regex;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_TERRAFORM_DIR: &str = "../terraform";
pub const DEFAULT_BINARY: &str = "terraform";
pub const DEFAULT_OUTPUT_NAME: &str = "vpc_id";

/// Environment applied to every engine invocation, before user-supplied env.
pub const AUTOMATION_ENV: &[(&str, &str)] = &[("TF_IN_AUTOMATION", "1"), ("TF_INPUT", "0")];

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static OUTPUT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("valid regex"));

// ── Provisioning configuration ───────────────────────────────────────────────

/// Where the definition bundle lives and how to drive the engine against it.
///
/// Built once per run and only ever borrowed by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformOptions {
    /// Directory holding the declarative definitions.
    pub terraform_dir: PathBuf,
    /// Engine executable.
    pub binary: String,
    /// `-var` inputs. Ordered so command lines are deterministic.
    pub vars: BTreeMap<String, String>,
    /// `-var-file` paths, in the order given.
    pub var_files: Vec<PathBuf>,
    /// Extra environment for every invocation.
    pub env: BTreeMap<String, String>,
    /// Pass `-no-color`.
    pub no_color: bool,
    /// State locking during apply/destroy.
    pub lock: bool,
    /// Optional wall-clock bound per invocation.
    pub timeout: Option<Duration>,
}

impl TerraformOptions {
    /// Options for `terraform_dir` with every other field at its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDir`] if `terraform_dir` is empty.
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Result<Self> {
        let terraform_dir = terraform_dir.into();
        if terraform_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDir.into());
        }
        Ok(Self {
            terraform_dir,
            binary: DEFAULT_BINARY.to_string(),
            vars: BTreeMap::new(),
            var_files: Vec::new(),
            env: BTreeMap::new(),
            no_color: true,
            lock: false,
            timeout: None,
        })
    }

    /// The `-chdir=<dir>` global flag.
    #[must_use]
    pub fn chdir_arg(&self) -> String {
        format!("-chdir={}", self.terraform_dir.display())
    }

    /// Automation env followed by user env; later entries win.
    #[must_use]
    pub fn command_env(&self) -> Vec<(String, String)> {
        AUTOMATION_ENV
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .chain(self.env.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }
}

// ── Verification request ─────────────────────────────────────────────────────

/// What to check once the infrastructure is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub output_name: String,
}

impl VerifyRequest {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOutputName`] if `name` is not a valid
    /// terraform identifier.
    pub fn new(name: &str) -> Result<Self> {
        validate_output_name(name)?;
        Ok(Self {
            output_name: name.to_string(),
        })
    }
}

impl Default for VerifyRequest {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates an output name against terraform identifier rules.
///
/// # Errors
///
/// Returns an error if the name does not match `^[A-Za-z_][A-Za-z0-9_-]*$`.
pub fn validate_output_name(name: &str) -> Result<()> {
    if !OUTPUT_NAME_RE.is_match(name) {
        return Err(ConfigError::InvalidOutputName(name.to_string()).into());
    }
    Ok(())
}

/// Splits a `key=value` pair on the first `=`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_var(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::InvalidVar(raw.to_string()).into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
