//! Model Module - Classifier Inference Engine
//!
//! Loads the ONNX classifier and turns one preprocessed row into a label
//! plus a positive-class probability. Decision metadata (threshold, class
//! ordering) is kept separate so it can be validated at load time.

pub mod decision;
pub mod inference;

// Re-export common types
pub use decision::DecisionMetadata;
pub use inference::{Classifier, InferenceError, Prediction};
