//! Feature set loading.
//!
//! Reads a feature query response (`{ "objectIdFieldName": ..., "features":
//! [{ "attributes": {...}, "geometry": {...} }] }`) into attribute records and,
//! when requested, a geometry feed.

use std::path::Path;

use lqa_model::{Diagnostic, FieldCatalog, GeometryRecord, Record, Value};
use serde::Deserialize;
use serde_json::{Map, Value as Json};

use crate::convert::{geometry_present, to_record_id, to_value};
use crate::error::{IngestError, Result};

/// Object id field used when neither the response nor the caller names one.
pub const DEFAULT_OBJECT_ID_FIELD: &str = "OBJECTID";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeatureSet {
    object_id_field_name: Option<String>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    attributes: Map<String, Json>,
    #[serde(default)]
    geometry: Option<Json>,
}

/// Options for reading a feature set.
#[derive(Debug, Clone, Default)]
pub struct FeatureOptions {
    /// Object id field to fall back on when the response does not name one.
    pub object_id_field: Option<String>,
    /// Build a geometry feed from the features' geometries.
    pub with_geometry: bool,
}

impl FeatureOptions {
    #[must_use]
    pub fn with_object_id_field(mut self, field: impl Into<String>) -> Self {
        self.object_id_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_geometry(mut self) -> Self {
        self.with_geometry = true;
        self
    }
}

/// Records read from one feature query response.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    /// Object id field the records are keyed by.
    pub object_id_field: String,
    pub records: Vec<Record>,
    /// Geometry feed, `None` unless requested.
    pub geometry: Option<Vec<GeometryRecord>>,
    /// Values that could not be read and were taken as null.
    pub diagnostics: Vec<Diagnostic>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a feature set from JSON text.
///
/// Attribute values are converted by the catalog's field types. A value that
/// does not fit its field is stored as null with an
/// [`Diagnostic::UnreadableValue`]. A feature without an object id fails the
/// whole set.
pub fn parse_feature_set(
    text: &str,
    catalog: &FieldCatalog,
    options: &FeatureOptions,
) -> Result<FeatureSet> {
    let raw: RawFeatureSet = serde_json::from_str(text)?;
    let object_id_field = raw
        .object_id_field_name
        .or_else(|| options.object_id_field.clone())
        .unwrap_or_else(|| DEFAULT_OBJECT_ID_FIELD.to_string());

    let mut records = Vec::with_capacity(raw.features.len());
    let mut geometry = options
        .with_geometry
        .then(|| Vec::with_capacity(raw.features.len()));
    let mut diagnostics = Vec::new();

    for (index, feature) in raw.features.into_iter().enumerate() {
        let id = match feature.attributes.get(&object_id_field) {
            None | Some(Json::Null) => {
                return Err(IngestError::MissingObjectId {
                    index,
                    field: object_id_field,
                });
            }
            Some(raw_id) => to_record_id(raw_id).ok_or_else(|| IngestError::InvalidObjectId {
                index,
                field: object_id_field.clone(),
                value: raw_id.to_string(),
            })?,
        };

        let mut record = Record::new(id);
        for (name, json) in &feature.attributes {
            let field_type = catalog.get(name).map(|field| field.field_type);
            let value = match to_value(json, field_type) {
                Some(value) => value,
                None => {
                    tracing::debug!(object_id = %record.id, field = %name, "unreadable value");
                    diagnostics.push(Diagnostic::UnreadableValue {
                        object_id: record.id.clone(),
                        field: name.clone(),
                    });
                    Value::Null
                }
            };
            record.insert(name.clone(), value);
        }

        if let Some(shapes) = geometry.as_mut() {
            shapes.push(GeometryRecord::new(
                record.id.clone(),
                geometry_present(feature.geometry.as_ref()),
            ));
        }
        records.push(record);
    }

    tracing::debug!(
        records = records.len(),
        object_id_field = %object_id_field,
        unreadable = diagnostics.len(),
        "parsed feature set"
    );

    Ok(FeatureSet {
        object_id_field,
        records,
        geometry,
        diagnostics,
    })
}

/// Load a feature set file.
pub fn load_feature_set(
    path: &Path,
    catalog: &FieldCatalog,
    options: &FeatureOptions,
) -> Result<FeatureSet> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feature_set(&text, catalog, options).map_err(|err| err.in_file(path))
}
