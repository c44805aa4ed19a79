//! Logic Module - Scoring Engine & Supporting Pieces
//!
//! - `features/` - Field layout, record type, form collector
//! - `preprocess/` - Fitted preprocessor (scaling, one-hot encoding)
//! - `model/` - ONNX classifier and decision metadata
//! - `risk/` - Orchestration and verdict mapping
//! - `artifacts` - One-time artifact loading and the process-wide cache

pub mod artifacts;
pub mod features;
pub mod model;
pub mod preprocess;
pub mod risk;

#[cfg(test)]
pub(crate) mod testing;
