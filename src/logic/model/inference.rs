//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the ONNX classifier and runs it on one preprocessed row. Label and
//! probability always come from the same session run.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::decision::DecisionMetadata;

/// Preferred name of the probability output in exported classifiers
pub const PROBABILITIES_OUTPUT: &str = "probabilities";

// ============================================================================
// STATE
// ============================================================================

/// Latency stats across all predictions this process
static LATENCY_SUM: AtomicU64 = AtomicU64::new(0);
static INFERENCE_COUNT: AtomicU64 = AtomicU64::new(0);

/// Average latency (ms) and total prediction count
pub fn latency_stats() -> (f32, u64) {
    let sum = LATENCY_SUM.load(Ordering::Relaxed);
    let count = INFERENCE_COUNT.load(Ordering::Relaxed);
    let avg = if count > 0 {
        (sum as f32 / count as f32) / 1000.0
    } else {
        0.0
    };
    (avg, count)
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output for one record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// 0 = low risk, 1 = high risk
    pub label: u8,
    /// Probability of the positive (high risk) class, 0.0 - 1.0
    pub probability: f32,
    /// Cutoff the label was derived with
    pub threshold: f32,
    /// Microseconds
    pub inference_time_us: u64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// The loaded ONNX classifier.
///
/// `Session::run` needs `&mut`, so the session sits behind a Mutex and
/// predictions serialize; request-per-click traffic never contends.
pub struct Classifier {
    session: Mutex<Session>,
    output_name: String,
    input_dim: usize,
    decision: DecisionMetadata,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("output_name", &self.output_name)
            .field("input_dim", &self.input_dim)
            .field("decision", &self.decision)
            .finish()
    }
}

impl Classifier {
    /// Load the ONNX model from a file.
    ///
    /// `input_dim` is the dense width the preprocessor produces; rows of any
    /// other width are rejected before they reach the session.
    pub fn load(
        model_path: &Path,
        input_dim: usize,
        decision: DecisionMetadata,
    ) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX classifier from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        // Exported classifiers list the label output first and the
        // probability output second; prefer the well-known name.
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITIES_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("Model defines no outputs".to_string()))?;

        log::info!(
            "ONNX classifier loaded (probability output: '{}')",
            output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            input_dim,
            decision,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn decision(&self) -> &DecisionMetadata {
        &self.decision
    }

    /// Run the classifier on one preprocessed row.
    ///
    /// One session run yields the probability vector; the label is the
    /// threshold decision over the same probability, so the pair can never
    /// disagree.
    pub fn predict(&self, row: &[f32]) -> Result<Prediction, InferenceError> {
        let start_time = std::time::Instant::now();

        if row.len() != self.input_dim {
            return Err(InferenceError(format!(
                "Expected {} input columns, got {}",
                self.input_dim,
                row.len()
            )));
        }

        // Input tensor: shape (1, input_dim)
        let input_array = Array2::<f32>::from_shape_vec((1, self.input_dim), row.to_vec())
            .map_err(|e| InferenceError(format!("Failed to create array: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Failed to create tensor: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No probability output from model".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Failed to extract output: {}", e)))?;

        let data = output_tensor.1;

        let positive_index = self.decision.positive_index();
        let probability = data
            .get(positive_index)
            .copied()
            .ok_or_else(|| {
                InferenceError(format!(
                    "Probability output has {} values, need index {}",
                    data.len(),
                    positive_index
                ))
            })?
            .clamp(0.0, 1.0);

        let inference_time = start_time.elapsed().as_micros() as u64;

        // Track metrics
        LATENCY_SUM.fetch_add(inference_time, Ordering::Relaxed);
        INFERENCE_COUNT.fetch_add(1, Ordering::Relaxed);

        Ok(Prediction {
            label: self.decision.label_for(probability),
            probability,
            threshold: self.decision.threshold,
            inference_time_us: inference_time,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
