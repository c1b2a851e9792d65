//! Command implementations

pub mod destroy;
pub mod verify;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::domain::{Overrides, TerraformOptions};

/// Engine flags shared by every command that talks to terraform.
#[derive(Args, Debug, Default, Clone)]
pub struct EngineArgs {
    /// Directory holding the terraform definitions [default: ../terraform]
    #[arg(short, long, env = "INFRACHECK_DIR", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Terraform executable [default: terraform]
    #[arg(long, env = "INFRACHECK_TERRAFORM_BIN", value_name = "PATH")]
    pub terraform_bin: Option<String>,

    /// Input variable, repeatable
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Variable definitions file, repeatable
    #[arg(long = "var-file", value_name = "PATH")]
    pub var_files: Vec<PathBuf>,

    /// Kill any single terraform invocation after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl EngineArgs {
    /// Convert flags into config overrides.
    #[must_use]
    pub fn overrides(&self, output: Option<String>) -> Overrides {
        Overrides {
            terraform_dir: self.dir.clone(),
            output,
            binary: self.terraform_bin.clone(),
            vars: self.vars.clone(),
            var_files: self.var_files.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Fail early, before anything is provisioned, if the bundle is missing.
///
/// # Errors
///
/// Returns an error if `opts.terraform_dir` is not a directory.
pub fn ensure_terraform_dir(opts: &TerraformOptions) -> Result<()> {
    if !opts.terraform_dir.is_dir() {
        anyhow::bail!(
            "terraform directory {} does not exist",
            opts.terraform_dir.display()
        );
    }
    Ok(())
}
