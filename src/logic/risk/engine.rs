//! Scoring Engine - Inference Orchestration
//!
//! The one place that chains preprocessor and classifier. Owns both loaded
//! artifacts explicitly; nothing here reaches into global state.

use crate::logic::features::record::FeatureRecord;
use crate::logic::model::inference::{Classifier, InferenceError};
use crate::logic::preprocess::transform::{Preprocessor, TransformError};
use super::types::RiskAssessment;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Recoverable per-request scoring failure
#[derive(Debug)]
pub enum ScoringError {
    Transform(TransformError),
    Inference(InferenceError),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::Transform(e) => write!(f, "{}", e),
            ScoringError::Inference(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoringError::Transform(e) => Some(e),
            ScoringError::Inference(e) => Some(e),
        }
    }
}

impl From<TransformError> for ScoringError {
    fn from(e: TransformError) -> Self {
        ScoringError::Transform(e)
    }
}

impl From<InferenceError> for ScoringError {
    fn from(e: InferenceError) -> Self {
        ScoringError::Inference(e)
    }
}

// ============================================================================
// SCORING ENGINE
// ============================================================================

/// Preprocessor + classifier, loaded once and shared read-only
#[derive(Debug)]
pub struct ScoringEngine {
    preprocessor: Preprocessor,
    classifier: Classifier,
}

impl ScoringEngine {
    pub fn new(preprocessor: Preprocessor, classifier: Classifier) -> Self {
        Self {
            preprocessor,
            classifier,
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Probability cutoff currently in effect
    pub fn threshold(&self) -> f32 {
        self.classifier.decision().threshold
    }

    /// Score one application: transform, classify, map to a verdict.
    ///
    /// Both error arms are recoverable; the engine and its artifacts stay
    /// valid for the next request.
    pub fn assess(&self, record: &FeatureRecord) -> Result<RiskAssessment, ScoringError> {
        let row = self.preprocessor.transform(record)?;
        let prediction = self.classifier.predict(&row)?;

        log::debug!(
            "Scored application: label={} p={:.4} ({}us)",
            prediction.label,
            prediction.probability,
            prediction.inference_time_us
        );

        Ok(RiskAssessment::from_prediction(&prediction))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::record::FeatureRecord;
    use crate::logic::preprocess::transform::{Preprocessor, TransformError};
    use crate::logic::testing::fitted_preprocessor_artifact;

    #[test]
    fn test_transform_error_converts() {
        let err: ScoringError = TransformError::MissingField("age".to_string()).into();
        assert!(matches!(err, ScoringError::Transform(_)));
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_inference_error_converts() {
        let err: ScoringError = InferenceError("boom".to_string()).into();
        assert!(matches!(err, ScoringError::Inference(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_transform_failure_leaves_preprocessor_usable() {
        // A failed request must not poison state for the next one
        let pp = Preprocessor::from_artifact(fitted_preprocessor_artifact());
        let empty = FeatureRecord::new();
        assert!(pp.transform(&empty).is_err());

        let good = crate::logic::features::form::collect(
            &crate::logic::features::form::ApplicantInput::default(),
            &crate::logic::features::form::ProfileDefaults::default(),
        );
        assert!(pp.transform(&good).is_ok());
    }
}
