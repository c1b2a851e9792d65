//! Infracheck - provision, verify and tear down terraform stacks

use std::process::ExitCode;

use clap::Parser;
use infracheck::cli::Cli;
use infracheck::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    infracheck::logging::init(cli.verbose);
    let json_mode = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json_mode.then(|| json::format_error(&message, "ERROR")) {
                Some(Ok(obj)) => println!("{obj}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
