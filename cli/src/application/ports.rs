//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;

use crate::domain::{InfracheckConfig, TerraformOptions};

// ── Provisioning Engine Port ──────────────────────────────────────────────────

/// The external provisioning engine: realize, inspect, tear down.
///
/// Every operation borrows the same options; none of them mutate it.
#[allow(async_fn_in_trait)]
pub trait Provisioner {
    /// Prepare the working directory (providers, modules, backend).
    async fn init(&self, opts: &TerraformOptions) -> Result<()>;
    /// Realize the infrastructure. Blocks until the engine finishes.
    async fn apply(&self, opts: &TerraformOptions) -> Result<()>;
    /// Read the named output from the realized infrastructure's state.
    async fn output(&self, opts: &TerraformOptions, name: &str) -> Result<String>;
    /// Destroy everything the engine created.
    async fn destroy(&self, opts: &TerraformOptions) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with extra environment and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or does not finish
    /// within the implementation's configured timeout.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &[(String, String)],
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the optional configuration file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<InfracheckConfig>;
    /// The file that was (or would be) read.
    fn path(&self) -> PathBuf;
}
