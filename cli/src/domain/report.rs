//! Verification report: the verdict of one lifecycle run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::phase::Phase;

/// Engine stage at which a fatal provisioning error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    Apply,
    Output,
    Destroy,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Apply => "apply",
            Stage::Output => "output",
            Stage::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the provision-and-verify body concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    AssertionFailed { message: String },
    ProvisioningFailed { stage: Stage, message: String },
}

/// How teardown concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Teardown {
    Destroyed,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub output_name: String,
    pub output_value: Option<String>,
    pub outcome: Outcome,
    pub teardown: Teardown,
    pub phases: Vec<Phase>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl VerifyReport {
    /// Teardown failures are reported but never change the verdict.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    #[must_use]
    pub fn teardown_ok(&self) -> bool {
        self.teardown == Teardown::Destroyed
    }

    /// Human-readable failure lines, verdict first then teardown.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        let mut out = Vec::new();
        match &self.outcome {
            Outcome::Passed => {}
            Outcome::AssertionFailed { message } => out.push(format!("FAIL: {message}")),
            Outcome::ProvisioningFailed { stage, message } => {
                out.push(format!("FAIL: terraform {stage}: {message}"));
            }
        }
        if let Teardown::Failed { message } = &self.teardown {
            out.push(format!("Teardown failed: {message}"));
        }
        out
    }
}
