//! CLI library components for the layer QA tool.

pub mod logging;
pub mod pipeline;
