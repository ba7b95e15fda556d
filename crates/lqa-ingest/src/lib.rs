//! Feature layer ingestion.
//!
//! Turns the JSON documents a feature service returns into the validation
//! model:
//!
//! - **Layer definitions**: field catalog with coded-value domains
//! - **Feature sets**: attribute records and an optional geometry feed
//!
//! Per-value problems never abort a load. Unusable domains and unreadable
//! values come back as [`lqa_model::Diagnostic`]s next to the data.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lqa_ingest::{FeatureOptions, load_feature_set, load_layer_definition};
//!
//! let layer = load_layer_definition(Path::new("data/roads_layer.json"))?;
//! let options = FeatureOptions::default().with_geometry();
//! let features = load_feature_set(Path::new("data/roads.json"), &layer.catalog, &options)?;
//!
//! println!("{} records", features.len());
//! ```

mod convert;
mod error;
mod features;
mod layer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Layer Definitions ===
pub use layer::{LayerDefinition, load_layer_definition, parse_layer_definition};

// === Feature Sets ===
pub use features::{
    DEFAULT_OBJECT_ID_FIELD, FeatureOptions, FeatureSet, load_feature_set, parse_feature_set,
};
