//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::phase::Phase;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Fatal errors reported by the provisioning engine.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("terraform {stage} failed (exit code {code}):\n{stderr}")]
    CommandFailed {
        stage: String,
        code: String,
        stderr: String,
    },

    #[error("terraform output '{0}' is not defined")]
    OutputUndefined(String),

    #[error("cannot parse terraform output '{name}': {reason}")]
    OutputParse { name: String, reason: String },
}

// ── Assertion errors ──────────────────────────────────────────────────────────

/// A failed verification check. Never aborts the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    #[error("expected output '{0}' to be non-empty")]
    EmptyOutput(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to provisioning configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("terraform directory must not be empty")]
    EmptyDir,

    #[error("Invalid output name '{0}': must match ^[A-Za-z_][A-Za-z0-9_-]*$")]
    InvalidOutputName(String),

    #[error("Invalid variable '{0}': expected key=value")]
    InvalidVar(String),
}

// ── Lifecycle errors ──────────────────────────────────────────────────────────

/// Illegal lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal lifecycle transition: {from} -> {to}")]
pub struct PhaseError {
    pub from: Phase,
    pub to: Phase,
}
