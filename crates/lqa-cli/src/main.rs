//! Feature layer QA CLI.

use clap::Parser;
use lqa_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{ExportStatus, run_check_command, run_fields};
use crate::summary::print_check_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Check(args) => match run_check_command(args) {
            Ok(result) => {
                print_check_summary(&result);
                let export_failed = matches!(result.export, ExportStatus::Failed(_));
                let has_issues = !result.run.outcome.report.is_empty();
                if export_failed || (args.fail_on_issues && has_issues) {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Fields(args) => match run_fields(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
