//! Command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::pipeline::Stage;

#[derive(Debug, Parser)]
#[command(name = "poflow")]
#[command(about = "PO cost recognition and GRIR exposure pipeline")]
#[command(version)]
pub struct Cli {
    /// Configuration file layered over config/default and config/{RUN_MODE}
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pipeline; all stages unless --stage is given
    Run(RunArgs),

    /// Print the resolved configuration as JSON
    Config,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Run a single stage: 1 (clean), 2 (transform), or 3 (prepare)
    #[arg(long, value_enum)]
    pub stage: Option<Stage>,

    /// GRIR aging reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub snapshot_date: Option<NaiveDate>,

    /// Data root containing raw/, intermediate/, and import-ready/
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_all_options() {
        let cli = Cli::try_parse_from([
            "poflow",
            "run",
            "--stage",
            "2",
            "--snapshot-date",
            "2024-01-31",
            "--data-dir",
            "/tmp/poflow",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.stage, Some(Stage::Transform));
        assert_eq!(args.snapshot_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/poflow")));
    }

    #[test]
    fn test_stage_accepts_names() {
        let cli = Cli::try_parse_from(["poflow", "run", "--stage", "prepare"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.stage, Some(Stage::Prepare));
    }

    #[test]
    fn test_rejects_bad_stage_and_date() {
        assert!(Cli::try_parse_from(["poflow", "run", "--stage", "4"]).is_err());
        assert!(Cli::try_parse_from(["poflow", "run", "--snapshot-date", "31/01/2024"]).is_err());
    }

    #[test]
    fn test_config_subcommand_with_global_file() {
        let cli = Cli::try_parse_from(["poflow", "config", "--config", "poflow.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.config, Some(PathBuf::from("poflow.toml")));
    }
}
