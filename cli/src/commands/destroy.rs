//! Destroy command: tear down without provisioning, for leaked stacks.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::verify::destroy_only;
use crate::commands::{EngineArgs, ensure_terraform_dir};
use crate::domain::config::resolve;
use crate::infra::terraform::TerraformProvisioner;
use crate::output::TerminalReporter;

/// Run the destroy command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or terraform destroy fails.
pub async fn run(app: &AppContext, args: &EngineArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let (opts, _) = resolve(&config, &args.overrides(None))?;
    ensure_terraform_dir(&opts)?;

    let provisioner = TerraformProvisioner::default_runner(&opts);
    let reporter = TerminalReporter::new(&app.output);
    destroy_only(&provisioner, &opts, &reporter).await?;

    if app.is_json() {
        println!(
            r#"{{"destroyed":true,"terraform_dir":{}}}"#,
            serde_json::to_string(&opts.terraform_dir.display().to_string())?
        );
    }
    Ok(ExitCode::SUCCESS)
}
