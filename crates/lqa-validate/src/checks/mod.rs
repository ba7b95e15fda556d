//! QA check modules.
//!
//! Each module implements one rule. Checks return their issues in a private
//! vector; the engine appends them to its sink in fixed order.

pub mod domain;
pub mod duplicate;
pub mod geometry;
pub mod null;
