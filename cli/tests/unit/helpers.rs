//! Shared test helpers: mock ports and output constructors.

#![allow(dead_code, clippy::expect_used)]

use std::cell::RefCell;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use anyhow::{Result, bail};
use infracheck::application::ports::{ProgressReporter, Provisioner};
use infracheck::domain::{ProvisionError, TerraformOptions};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

pub fn opts() -> TerraformOptions {
    TerraformOptions::new("../terraform").expect("options")
}

// ── Mock: provisioning engine ────────────────────────────────────────────────

/// What `MockProvisioner::output` does when called.
pub enum OutputBehaviour {
    Value(&'static str),
    Undefined,
    Panic,
}

/// A `Provisioner` that records every call and fails where told to.
pub struct MockProvisioner {
    calls: Mutex<Vec<String>>,
    pub fail_init: bool,
    pub fail_apply: bool,
    pub fail_destroy: bool,
    pub output: OutputBehaviour,
}

impl MockProvisioner {
    pub fn returning(value: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_init: false,
            fail_apply: false,
            fail_destroy: false,
            output: OutputBehaviour::Value(value),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(op)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("mutex poisoned").push(call);
    }
}

impl Provisioner for MockProvisioner {
    async fn init(&self, _: &TerraformOptions) -> Result<()> {
        self.record("init".into());
        if self.fail_init {
            bail!("Error: Failed to query available provider packages");
        }
        Ok(())
    }

    async fn apply(&self, _: &TerraformOptions) -> Result<()> {
        self.record("apply".into());
        if self.fail_apply {
            return Err(ProvisionError::CommandFailed {
                stage: "apply".into(),
                code: "1".into(),
                stderr: "Error: creating EC2 VPC: VpcLimitExceeded".into(),
            }
            .into());
        }
        Ok(())
    }

    async fn output(&self, _: &TerraformOptions, name: &str) -> Result<String> {
        self.record(format!("output:{name}"));
        match self.output {
            OutputBehaviour::Value(v) => Ok(v.to_string()),
            OutputBehaviour::Undefined => Err(ProvisionError::OutputUndefined(name.into()).into()),
            OutputBehaviour::Panic => panic!("engine exploded"),
        }
    }

    async fn destroy(&self, _: &TerraformOptions) -> Result<()> {
        self.record("destroy".into());
        if self.fail_destroy {
            bail!("Error: deleting EC2 VPC: DependencyViolation");
        }
        Ok(())
    }
}

// ── Mock: progress reporter ──────────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

/// Records warnings so tests can assert on what the user was told.
#[derive(Default)]
pub struct RecordingReporter {
    pub warnings: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
