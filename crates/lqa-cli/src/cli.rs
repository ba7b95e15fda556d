//! CLI argument definitions for the layer QA tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use lqa_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "layer-qa",
    version,
    about = "Feature layer QA - Check attribute and geometry quality",
    long_about = "Run quality checks over a feature layer export.\n\n\
                  Flags null values, duplicate values, values outside coded-value\n\
                  domains, and missing geometry, then writes the findings to a CSV report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration for this invocation.
    ///
    /// `--log-level` wins over `-v`/`-q`. Either one turns off `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level = self
            .log_level
            .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from);
        let mut config = LogConfig::default()
            .with_level(level)
            .with_format(self.log_format.into())
            .with_ansi(self.ansi_logs())
            .with_log_file(self.log_file.clone());
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        config
    }

    /// Colored log output only goes to an interactive stderr.
    fn ansi_logs(&self) -> bool {
        match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the QA checks and export the report.
    Check(CheckArgs),

    /// List the fields of a layer definition.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Layer definition JSON (fields and domains).
    #[arg(long = "layer", value_name = "LAYER_JSON")]
    pub layer: PathBuf,

    /// Feature query response JSON with the attribute records.
    #[arg(long = "features", value_name = "FEATURES_JSON")]
    pub features: PathBuf,

    /// Feature query response JSON to take geometry from.
    #[arg(long = "geometry", value_name = "FEATURES_JSON", conflicts_with = "with_geometry")]
    pub geometry: Option<PathBuf>,

    /// Take geometry from the features file itself.
    #[arg(long = "with-geometry")]
    pub with_geometry: bool,

    /// Validation config (TOML).
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Output directory for the CSV report.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Layer name used in the report file name (default: the layer's own name).
    #[arg(long = "layer-name", value_name = "NAME")]
    pub layer_name: Option<String>,

    /// Run the checks without writing the CSV report.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 1 when any issue is found.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Layer definition JSON.
    #[arg(value_name = "LAYER_JSON")]
    pub layer: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("layer-qa").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_logging_follows_env() {
        let config = parse(&["fields", "layer.json"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.use_env_filter);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_log_level_wins_over_verbosity() {
        let config = parse(&[
            "-v",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--color",
            "never",
            "fields",
            "layer.json",
        ])
        .log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_verbosity_flags() {
        let config = parse(&["-vv", "fields", "layer.json"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);

        let config = parse(&["-q", "fields", "layer.json"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::ERROR);
    }

    #[test]
    fn test_log_file_has_no_color() {
        let config = parse(&["--log-file", "qa.log", "fields", "layer.json"]).log_config();
        assert_eq!(config.log_file, Some(PathBuf::from("qa.log")));
        assert!(!config.with_ansi);
    }
}
