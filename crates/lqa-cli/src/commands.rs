use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Table};
use lqa_cli::pipeline::{CheckInputs, CheckRun, GeometrySource, export_report, load_layer, run_check};
use lqa_report::ExportOutcome;
use tracing::warn;

use crate::cli::{CheckArgs, FieldsArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

/// What happened to the CSV report.
#[derive(Debug)]
pub enum ExportStatus {
    DryRun,
    Skipped,
    Written(PathBuf),
    Failed(String),
}

pub struct CheckResult {
    pub run: CheckRun,
    pub export: ExportStatus,
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let layer = load_layer(&args.layer)?;
    if let Some(name) = &layer.name {
        println!("Layer: {name}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Alias"),
        header_cell("Type"),
        header_cell("Domain"),
    ]);
    apply_table_style(&mut table);
    for field in &layer.catalog {
        table.add_row(vec![
            Cell::new(&field.name),
            field
                .alias
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(field.field_type.label()),
            field
                .domain
                .as_ref()
                .map_or_else(|| dim_cell("-"), |domain| {
                    Cell::new(domain.describe_codes())
                }),
        ]);
    }
    println!("{table}");

    for diagnostic in &layer.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    Ok(())
}

pub fn run_check_command(args: &CheckArgs) -> Result<CheckResult> {
    let geometry = match (&args.geometry, args.with_geometry) {
        (Some(path), _) => GeometrySource::File(path.clone()),
        (None, true) => GeometrySource::Features,
        (None, false) => GeometrySource::None,
    };
    let inputs = CheckInputs {
        layer: args.layer.clone(),
        features: args.features.clone(),
        geometry,
        config: args.config.clone(),
        layer_name: args.layer_name.clone(),
    };

    let run = run_check(&inputs)?;

    let export = if args.dry_run {
        ExportStatus::DryRun
    } else {
        match export_report(&run, &args.output_dir, Local::now().date_naive()) {
            Ok(ExportOutcome::Skipped) => ExportStatus::Skipped,
            Ok(ExportOutcome::Written(path)) => ExportStatus::Written(path),
            Err(error) => {
                warn!(%error, "report export failed");
                ExportStatus::Failed(error.to_string())
            }
        }
    };

    Ok(CheckResult { run, export })
}
