//! Load, validate and assemble one layer.
//!
//! The stages mirror the `check` command: load the layer definition and the
//! feeds, run the engine, then assemble the tabular report. Export is a
//! separate step so a dry run can stop before touching the file system.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lqa_ingest::{FeatureOptions, LayerDefinition, load_feature_set, load_layer_definition};
use lqa_model::{Diagnostic, GeometryRecord};
use lqa_report::{AssembledReport, CsvExporter, ExportError, ExportOutcome, assemble};
use lqa_validate::{ValidationConfig, ValidationEngine, ValidationInput, ValidationOutcome};
use tracing::{info, info_span};

/// Where the geometry feed comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeometrySource {
    /// No geometry feed; the geometry check is skipped.
    #[default]
    None,
    /// Geometry of the features file.
    Features,
    /// Geometry of a separate feature query response.
    File(PathBuf),
}

/// Inputs for one check run.
#[derive(Debug, Clone)]
pub struct CheckInputs {
    pub layer: PathBuf,
    pub features: PathBuf,
    pub geometry: GeometrySource,
    pub config: Option<PathBuf>,
    /// Overrides the layer's own name in the report file name.
    pub layer_name: Option<String>,
}

impl CheckInputs {
    pub fn new(layer: impl Into<PathBuf>, features: impl Into<PathBuf>) -> Self {
        Self {
            layer: layer.into(),
            features: features.into(),
            geometry: GeometrySource::None,
            config: None,
            layer_name: None,
        }
    }
}

/// Result of loading and validating one layer.
#[derive(Debug, Clone)]
pub struct CheckRun {
    pub layer_name: String,
    pub record_count: usize,
    /// Loader diagnostics followed by engine diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: ValidationOutcome,
    pub assembled: AssembledReport,
}

/// Load a layer definition, with file context on failure.
pub fn load_layer(path: &Path) -> Result<LayerDefinition> {
    load_layer_definition(path)
        .with_context(|| format!("load layer definition {}", path.display()))
}

/// Load the inputs and run the QA checks.
pub fn run_check(inputs: &CheckInputs) -> Result<CheckRun> {
    let layer = load_layer(&inputs.layer)?;
    let layer_name = resolve_layer_name(inputs, &layer);
    let span = info_span!("check", layer = %layer_name);
    let _guard = span.enter();

    let config = match &inputs.config {
        Some(path) => ValidationConfig::load(path).context("load validation config")?,
        None => ValidationConfig::default(),
    };

    let mut options = FeatureOptions::default();
    if let Some(field) = &layer.object_id_field {
        options = options.with_object_id_field(field.clone());
    }
    if inputs.geometry == GeometrySource::Features {
        options = options.with_geometry();
    }
    let features = load_feature_set(&inputs.features, &layer.catalog, &options)
        .with_context(|| format!("load features {}", inputs.features.display()))?;
    info!(records = features.len(), "features loaded");

    let (geometry, geometry_diagnostics): (Option<Vec<GeometryRecord>>, Vec<Diagnostic>) =
        match &inputs.geometry {
            GeometrySource::None => (None, Vec::new()),
            GeometrySource::Features => (features.geometry.clone(), Vec::new()),
            GeometrySource::File(path) => {
                let shapes =
                    load_feature_set(path, &layer.catalog, &options.clone().with_geometry())
                        .with_context(|| format!("load geometry {}", path.display()))?;
                (shapes.geometry, shapes.diagnostics)
            }
        };

    let mut input = ValidationInput::new(&layer.catalog, &features.records);
    if let Some(shapes) = geometry.as_deref() {
        input = input.with_geometry(shapes);
    }
    let outcome = ValidationEngine::new(config)
        .run(&input)
        .context("validate layer")?;
    let assembled = assemble(&outcome.report).context("assemble report")?;

    let mut diagnostics = layer.diagnostics;
    diagnostics.extend(features.diagnostics);
    diagnostics.extend(geometry_diagnostics);
    diagnostics.extend(outcome.diagnostics.iter().cloned());

    Ok(CheckRun {
        layer_name,
        record_count: features.records.len(),
        diagnostics,
        outcome,
        assembled,
    })
}

/// Write the report of a run as `{layer}_QA_{date}.csv` under `output_dir`.
pub fn export_report(
    run: &CheckRun,
    output_dir: &Path,
    date: NaiveDate,
) -> std::result::Result<ExportOutcome, ExportError> {
    CsvExporter::new(output_dir).export(&run.assembled, &run.layer_name, date)
}

fn resolve_layer_name(inputs: &CheckInputs, layer: &LayerDefinition) -> String {
    inputs
        .layer_name
        .clone()
        .or_else(|| layer.name.clone())
        .or_else(|| {
            inputs
                .layer
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "layer".to_string())
}
