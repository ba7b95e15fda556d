//! Layer definition loading.
//!
//! Reads the properties document of a feature layer:
//!
//! ```json
//! {
//!   "name": "Roads",
//!   "objectIdField": "OBJECTID",
//!   "fields": [
//!     { "name": "Status", "type": "esriFieldTypeString",
//!       "domain": { "type": "codedValue", "name": "RoadStatus",
//!                   "codedValues": [{ "name": "Open", "code": "O" }] } }
//!   ]
//! }
//! ```

use std::path::Path;

use lqa_model::{CodedDomain, Diagnostic, Field, FieldCatalog, FieldType, Value};
use serde::Deserialize;
use serde_json::Value as Json;

use crate::convert::to_value;
use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayer {
    name: Option<String>,
    object_id_field: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    alias: Option<String>,
    domain: Option<RawDomain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDomain {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    coded_values: Option<Vec<RawCodedValue>>,
}

#[derive(Debug, Deserialize)]
struct RawCodedValue {
    code: Json,
}

/// A parsed layer definition.
#[derive(Debug, Clone)]
pub struct LayerDefinition {
    /// Layer name, when the document declares one.
    pub name: Option<String>,
    /// Object id field declared by the layer.
    pub object_id_field: Option<String>,
    pub catalog: FieldCatalog,
    /// Malformed domain descriptors found while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a layer definition from JSON text.
///
/// Fields whose type carries no checkable attribute (geometry, blob, raster)
/// are left out of the catalog.
pub fn parse_layer_definition(text: &str) -> Result<LayerDefinition> {
    let raw: RawLayer = serde_json::from_str(text)?;
    let mut diagnostics = Vec::new();
    let mut fields = Vec::with_capacity(raw.fields.len());

    for raw_field in raw.fields {
        let Some(field_type) = FieldType::parse(&raw_field.field_type) else {
            tracing::debug!(
                field = %raw_field.name,
                field_type = %raw_field.field_type,
                "skipping field without checkable values"
            );
            continue;
        };

        let mut field = Field::new(raw_field.name, field_type);
        if let Some(alias) = raw_field.alias {
            field = field.with_alias(alias);
        }
        if let Some(raw_domain) = raw_field.domain {
            match coded_domain(raw_domain, field_type) {
                Ok(Some(domain)) => field = field.with_domain(domain),
                Ok(None) => {}
                Err(reason) => {
                    let diagnostic = Diagnostic::MalformedDomain {
                        field: field.name.clone(),
                        reason,
                    };
                    tracing::warn!(field = %field.name, "{diagnostic}");
                    diagnostics.push(diagnostic);
                }
            }
        }
        fields.push(field);
    }

    let catalog = FieldCatalog::new(fields)?;
    tracing::debug!(
        layer = raw.name.as_deref().unwrap_or("<unnamed>"),
        fields = catalog.len(),
        domains = catalog.domain_fields().count(),
        "parsed layer definition"
    );

    Ok(LayerDefinition {
        name: raw.name,
        object_id_field: raw.object_id_field,
        catalog,
        diagnostics,
    })
}

/// Load a layer definition file.
pub fn load_layer_definition(path: &Path) -> Result<LayerDefinition> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer_definition(&text).map_err(|err| err.in_file(path))
}

/// Build a coded domain, `Ok(None)` for non-coded domains.
///
/// Codes are read as the field's type so they compare equal to the
/// attribute values loaded for that field.
fn coded_domain(
    raw: RawDomain,
    field_type: FieldType,
) -> std::result::Result<Option<CodedDomain>, String> {
    let is_coded = raw
        .kind
        .as_deref()
        .is_none_or(|kind| kind.eq_ignore_ascii_case("codedValue"));
    if !is_coded {
        return Ok(None);
    }

    let Some(coded_values) = raw.coded_values else {
        return Err("no codedValues list".to_string());
    };

    let mut codes = Vec::with_capacity(coded_values.len());
    for coded in &coded_values {
        let code = match to_value(&coded.code, Some(field_type)) {
            Some(Value::Null) | None => {
                return Err(format!("unusable {} code {}", field_type.label(), coded.code));
            }
            Some(code) => code,
        };
        codes.push(code);
    }

    let domain = match raw.name {
        Some(name) => CodedDomain::named(name, codes),
        None => CodedDomain::new(codes),
    };
    domain.map(Some).map_err(|err| err.to_string())
}
