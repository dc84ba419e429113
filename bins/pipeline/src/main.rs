//! poflow pipeline runner.
//!
//! Usage:
//!   poflow run [--stage 1|2|3] [--snapshot-date YYYY-MM-DD] [--data-dir DIR]
//!   poflow config

mod cli;
mod pipeline;

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poflow_shared::{AppError, PipelineConfig};

use crate::cli::{Cli, Command};
use crate::pipeline::Pipeline;

const DEFAULT_FILTER: &str = "poflow=info,poflow_core=info,poflow_data=info";
const VERBOSE_FILTER: &str = "poflow=debug,poflow_core=debug,poflow_data=debug";

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<AppError>() {
                Some(app) => {
                    error!(error_code = app.error_code(), "{app}");
                    app.exit_code()
                }
                None => {
                    error!("{err:#}");
                    1
                }
            };
            ExitCode::from(code)
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Run(args) => {
            if let Some(data_dir) = &args.data_dir {
                config.paths = config.paths.rooted_at(data_dir);
            }
            let snapshot_date = args
                .snapshot_date
                .or(config.snapshot_date)
                .unwrap_or_else(|| Local::now().date_naive());

            Pipeline::new(config, snapshot_date).run(args.stage)?;
        }
    }
    Ok(())
}
