//! CLI Adapter.

mod deploy;
mod render;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::app::api::ToolOptions;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "aca-deploy")]
#[command(version)]
#[command(
    about = "Render and deploy Azure Container Apps from per-application configuration",
    long_about = None
)]
struct Cli {
    /// Settings file (defaults to ./aca-deploy.toml when present)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Azure CLI executable
    #[arg(long = "az", global = true, env = "ACA_DEPLOY_AZ")]
    az_bin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy an application folder, or every discovered application with `all`
    #[clap(visible_alias = "d")]
    Deploy {
        /// Application folder, or `all`
        target: String,
        /// Resource group the configuration must declare
        resource_group: String,
        /// Render and print the deployment command without submitting it
        #[arg(long)]
        dry_run: bool,
        /// Search root for `all` (defaults to current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Render the template and parameters documents for a configuration file
    #[clap(visible_alias = "r")]
    Render {
        /// Path to the application configuration document
        config: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let options = ToolOptions { settings: cli.settings, az_bin: cli.az_bin };

    let result: Result<i32, AppError> = match cli.command {
        Commands::Deploy { target, resource_group, dry_run, root } => {
            deploy::run_deploy(&target, &resource_group, root, dry_run, &options)
        }
        Commands::Render { config } => render::run_render(&config, &options).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
