//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod assert;
pub mod config;
pub mod error;
pub mod options;
pub mod output;
pub mod phase;
pub mod report;

pub use assert::assert_non_empty;
pub use config::{InfracheckConfig, Overrides};
pub use error::{AssertionFailure, ConfigError, PhaseError, ProvisionError};
pub use options::{TerraformOptions, VerifyRequest};
pub use phase::{Lifecycle, Phase};
pub use report::{Outcome, Stage, Teardown, VerifyReport};
