//! Application service: provision, verify, destroy.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All engine I/O is routed through the injected `Provisioner`.

use std::panic::AssertUnwindSafe;

use anyhow::Result;
use chrono::Utc;
use futures_util::FutureExt as _;
use tracing::{info, warn};

use crate::application::ports::{ProgressReporter, Provisioner};
use crate::domain::{
    Lifecycle, Outcome, Phase, Stage, Teardown, TerraformOptions, VerifyReport, VerifyRequest,
    assert_non_empty,
};

/// Run one full lifecycle against `opts` and report the verdict.
///
/// Teardown runs exactly once on every path: after a pass, after an
/// assertion failure, after a fatal engine error, and after a panic in the
/// body (the panic is resumed once teardown has finished). Fatal errors stop
/// the body early, so a failed apply never reaches the output lookup.
pub async fn verify(
    provisioner: &impl Provisioner,
    opts: &TerraformOptions,
    request: &VerifyRequest,
    reporter: &impl ProgressReporter,
) -> VerifyReport {
    let started_at = Utc::now();
    let mut lifecycle = Lifecycle::new();

    let body = AssertUnwindSafe(provision_and_check(
        provisioner,
        opts,
        request,
        reporter,
        &mut lifecycle,
    ))
    .catch_unwind()
    .await;

    let teardown = teardown(provisioner, opts, reporter, &mut lifecycle).await;

    let (output_value, outcome) = match body {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    };

    VerifyReport {
        output_name: request.output_name.clone(),
        output_value,
        outcome,
        teardown,
        phases: lifecycle.into_history(),
        started_at,
        finished_at: Utc::now(),
    }
}

/// Destroy the infrastructure described by `opts` without provisioning first.
///
/// # Errors
///
/// Returns the engine error if destroy fails.
pub async fn destroy_only(
    provisioner: &impl Provisioner,
    opts: &TerraformOptions,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("Destroying infrastructure...");
    provisioner.destroy(opts).await?;
    reporter.success("Infrastructure destroyed");
    Ok(())
}

async fn provision_and_check(
    provisioner: &impl Provisioner,
    opts: &TerraformOptions,
    request: &VerifyRequest,
    reporter: &impl ProgressReporter,
    lifecycle: &mut Lifecycle,
) -> (Option<String>, Outcome) {
    let value = match provision(provisioner, opts, request, reporter, lifecycle).await {
        Ok(v) => v,
        Err((stage, e)) => {
            let message = format!("{e:#}");
            warn!(%stage, error = %message, "provisioning failed");
            reporter.warn(&format!("terraform {stage} failed"));
            return (None, Outcome::ProvisioningFailed { stage, message });
        }
    };

    let outcome = match assert_non_empty(&request.output_name, &value) {
        Ok(()) => {
            reporter.success(&format!("{} = {value}", request.output_name));
            Outcome::Passed
        }
        Err(failure) => {
            reporter.warn(&failure.to_string());
            Outcome::AssertionFailed {
                message: failure.to_string(),
            }
        }
    };
    (Some(value), outcome)
}

async fn provision(
    provisioner: &impl Provisioner,
    opts: &TerraformOptions,
    request: &VerifyRequest,
    reporter: &impl ProgressReporter,
    lifecycle: &mut Lifecycle,
) -> Result<String, (Stage, anyhow::Error)> {
    enter(lifecycle, Phase::Provisioning).map_err(|e| (Stage::Init, e))?;

    reporter.step("Initializing terraform...");
    provisioner
        .init(opts)
        .await
        .map_err(|e| (Stage::Init, e))?;

    reporter.step("Applying infrastructure...");
    provisioner
        .apply(opts)
        .await
        .map_err(|e| (Stage::Apply, e))?;
    reporter.success("Infrastructure provisioned");

    enter(lifecycle, Phase::Verifying).map_err(|e| (Stage::Output, e))?;
    reporter.step(&format!("Reading output '{}'...", request.output_name));
    provisioner
        .output(opts, &request.output_name)
        .await
        .map_err(|e| (Stage::Output, e))
}

async fn teardown(
    provisioner: &impl Provisioner,
    opts: &TerraformOptions,
    reporter: &impl ProgressReporter,
    lifecycle: &mut Lifecycle,
) -> Teardown {
    // Destroy is attempted even if the transition is refused.
    if let Err(e) = enter(lifecycle, Phase::Destroying) {
        warn!(error = %e, "entering teardown from unexpected phase");
    }

    reporter.step("Destroying infrastructure...");
    let teardown = match provisioner.destroy(opts).await {
        Ok(()) => {
            reporter.success("Infrastructure destroyed");
            Teardown::Destroyed
        }
        Err(e) => {
            let message = format!("{e:#}");
            warn!(error = %message, "teardown failed");
            reporter.warn(&format!("Destroy failed: {message}"));
            Teardown::Failed { message }
        }
    };

    if let Err(e) = enter(lifecycle, Phase::Done) {
        warn!(error = %e, "lifecycle did not reach done");
    }
    teardown
}

fn enter(lifecycle: &mut Lifecycle, next: Phase) -> Result<()> {
    let from = lifecycle.current();
    lifecycle.advance(next)?;
    info!(%from, to = %next, "lifecycle transition");
    Ok(())
}
