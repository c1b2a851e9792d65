//! Verify command: provision, check one output, destroy.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::verify::verify;
use crate::commands::{EngineArgs, ensure_terraform_dir};
use crate::domain::config::resolve;
use crate::infra::terraform::TerraformProvisioner;
use crate::output::{TerminalReporter, json};

/// Arguments for the verify command.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output that must be non-empty after apply [default: vpc_id]
    #[arg(short, long, env = "INFRACHECK_OUTPUT", value_name = "NAME")]
    pub output: Option<String>,
}

/// Run the verify command.
///
/// Exit code is success only when the output check passed; a failed
/// teardown is reported but does not change it.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the terraform directory
/// does not exist. Engine failures land in the report instead.
pub async fn run(app: &AppContext, args: &VerifyArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let (opts, request) = resolve(&config, &args.engine.overrides(args.output.clone()))?;
    ensure_terraform_dir(&opts)?;

    let provisioner = TerraformProvisioner::default_runner(&opts);
    let report = {
        let reporter = TerminalReporter::new(&app.output);
        verify(&provisioner, &opts, &request, &reporter).await
    };

    if app.is_json() {
        println!("{}", json::format_report(&report)?);
    } else {
        app.renderer().render_report(&report);
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
