//! Infrastructure implementation of the `Provisioner` port.
//!
//! `TerraformProvisioner<R>` builds terraform command lines and routes them
//! through a `CommandRunner`. Every invocation uses `-chdir` so the working
//! directory of the host process never changes.

use std::process::Output;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::{CommandRunner, Provisioner};
use crate::domain::output::decode_output;
use crate::domain::{ProvisionError, Stage, TerraformOptions};
use crate::infra::command_runner::TokioCommandRunner;

/// Lines of stderr kept in a `CommandFailed` error.
const STDERR_TAIL_LINES: usize = 20;

/// Infrastructure adapter that drives the terraform CLI.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct TerraformProvisioner<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> TerraformProvisioner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn invoke(
        &self,
        stage: Stage,
        opts: &TerraformOptions,
        args: &[String],
    ) -> Result<Output> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        info!(%stage, dir = %opts.terraform_dir.display(), "terraform");
        let output = self
            .runner
            .run(&opts.binary, &args, &opts.command_env())
            .await
            .with_context(|| format!("terraform {stage}"))?;
        check_status(stage, &output)?;
        Ok(output)
    }
}

impl TerraformProvisioner<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(opts: &TerraformOptions) -> Self {
        Self::new(TokioCommandRunner::new(opts.timeout))
    }
}

impl<R: CommandRunner> Provisioner for TerraformProvisioner<R> {
    async fn init(&self, opts: &TerraformOptions) -> Result<()> {
        self.invoke(Stage::Init, opts, &init_args(opts)).await?;
        Ok(())
    }

    async fn apply(&self, opts: &TerraformOptions) -> Result<()> {
        self.invoke(Stage::Apply, opts, &apply_args(opts)).await?;
        Ok(())
    }

    async fn output(&self, opts: &TerraformOptions, name: &str) -> Result<String> {
        let output = self
            .invoke(Stage::Output, opts, &output_args(opts, name))
            .await?;
        Ok(decode_output(name, &output.stdout)?)
    }

    async fn destroy(&self, opts: &TerraformOptions) -> Result<()> {
        self.invoke(Stage::Destroy, opts, &destroy_args(opts)).await?;
        Ok(())
    }
}

// ── Argument construction ─────────────────────────────────────────────────────

/// `-chdir=<dir> init -input=false [-no-color]`
#[must_use]
pub fn init_args(opts: &TerraformOptions) -> Vec<String> {
    let mut args = vec![opts.chdir_arg(), "init".into(), "-input=false".into()];
    push_no_color(&mut args, opts);
    args
}

/// `-chdir=<dir> apply -input=false -auto-approve -lock=<b> [-no-color] [vars]`
#[must_use]
pub fn apply_args(opts: &TerraformOptions) -> Vec<String> {
    mutating_args("apply", opts)
}

/// `-chdir=<dir> destroy -input=false -auto-approve -lock=<b> [-no-color] [vars]`
#[must_use]
pub fn destroy_args(opts: &TerraformOptions) -> Vec<String> {
    mutating_args("destroy", opts)
}

/// `-chdir=<dir> output [-no-color] -json <name>`
#[must_use]
pub fn output_args(opts: &TerraformOptions, name: &str) -> Vec<String> {
    let mut args = vec![opts.chdir_arg(), "output".into()];
    push_no_color(&mut args, opts);
    args.push("-json".into());
    args.push(name.into());
    args
}

fn mutating_args(command: &str, opts: &TerraformOptions) -> Vec<String> {
    let mut args = vec![
        opts.chdir_arg(),
        command.into(),
        "-input=false".into(),
        "-auto-approve".into(),
        format!("-lock={}", opts.lock),
    ];
    push_no_color(&mut args, opts);
    for (key, value) in &opts.vars {
        args.push("-var".into());
        args.push(format!("{key}={value}"));
    }
    for file in &opts.var_files {
        args.push("-var-file".into());
        args.push(file.display().to_string());
    }
    args
}

fn push_no_color(args: &mut Vec<String>, opts: &TerraformOptions) {
    if opts.no_color {
        args.push("-no-color".into());
    }
}

fn check_status(stage: Stage, output: &Output) -> Result<(), ProvisionError> {
    if output.status.success() {
        return Ok(());
    }
    let code = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    Err(ProvisionError::CommandFailed {
        stage: stage.to_string(),
        code,
        stderr: stderr_tail(&output.stderr),
    })
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
